use docvault_crypto::{
    decrypt, derive_key, encrypt, CipherAlgorithm, DerivedKey, DigestAlgorithm, KdfParams, Salt,
    NONCE_SIZE, TAG_SIZE,
};

const ALGORITHMS: [CipherAlgorithm; 2] =
    [CipherAlgorithm::Aes256Gcm, CipherAlgorithm::ChaCha20Poly1305];

fn test_params() -> KdfParams {
    // Full-strength iteration counts are pointless in tests
    KdfParams { iterations: 1_000, digest: DigestAlgorithm::Sha256 }
}

fn key_for(password: &str, salt: &Salt) -> DerivedKey {
    derive_key(password, salt, &test_params()).unwrap()
}

#[test]
fn encrypt_decrypt_roundtrip() {
    for algorithm in ALGORITHMS {
        let key = key_for("correct-horse-battery-staple", &Salt::random());
        let payload = encrypt(&key, b"the quick brown fox", algorithm).unwrap();
        let plaintext = decrypt(&key, &payload, algorithm).unwrap();
        assert_eq!(plaintext, b"the quick brown fox");
    }
}

#[test]
fn payload_has_fixed_size_components() {
    let key = key_for("pw", &Salt::random());
    let payload = encrypt(&key, b"hello", CipherAlgorithm::Aes256Gcm).unwrap();
    assert_eq!(payload.nonce.len(), NONCE_SIZE);
    assert_eq!(payload.tag.len(), TAG_SIZE);
    // Detached tag: ciphertext length matches plaintext length for GCM-class ciphers
    assert_eq!(payload.ciphertext.len(), 5);
}

#[test]
fn large_plaintext_roundtrips() {
    for algorithm in ALGORITHMS {
        let key = key_for("pw", &Salt::random());
        let plaintext = vec![0xABu8; 64 * 1024];
        let payload = encrypt(&key, &plaintext, algorithm).unwrap();
        let recovered = decrypt(&key, &payload, algorithm).unwrap();
        assert_eq!(recovered, plaintext);
    }
}

#[test]
fn wrong_key_fails_to_decrypt() {
    for algorithm in ALGORITHMS {
        let salt = Salt::random();
        let payload = encrypt(&key_for("right", &salt), b"secret", algorithm).unwrap();
        let result = decrypt(&key_for("wrong", &salt), &payload, algorithm);
        assert!(result.is_err());
    }
}

#[test]
fn tampered_ciphertext_fails() {
    for algorithm in ALGORITHMS {
        let key = key_for("pw", &Salt::random());
        let mut payload = encrypt(&key, b"tamper me", algorithm).unwrap();
        payload.ciphertext[0] ^= 0xFF;
        assert!(decrypt(&key, &payload, algorithm).is_err());
    }
}

#[test]
fn tampered_tag_fails() {
    for algorithm in ALGORITHMS {
        let key = key_for("pw", &Salt::random());
        let mut payload = encrypt(&key, b"tamper me", algorithm).unwrap();
        payload.tag[TAG_SIZE - 1] ^= 0x01;
        assert!(decrypt(&key, &payload, algorithm).is_err());
    }
}

#[test]
fn tampered_nonce_fails() {
    for algorithm in ALGORITHMS {
        let key = key_for("pw", &Salt::random());
        let mut payload = encrypt(&key, b"tamper me", algorithm).unwrap();
        payload.nonce[0] ^= 0xFF;
        assert!(decrypt(&key, &payload, algorithm).is_err());
    }
}

#[test]
fn wrong_algorithm_fails_to_decrypt() {
    let key = key_for("pw", &Salt::random());
    let payload = encrypt(&key, b"cross-cipher", CipherAlgorithm::Aes256Gcm).unwrap();
    assert!(decrypt(&key, &payload, CipherAlgorithm::ChaCha20Poly1305).is_err());
}

#[test]
fn each_encryption_produces_different_output() {
    let key = key_for("pw", &Salt::random());
    let p1 = encrypt(&key, b"same plaintext", CipherAlgorithm::Aes256Gcm).unwrap();
    let p2 = encrypt(&key, b"same plaintext", CipherAlgorithm::Aes256Gcm).unwrap();

    // Fresh nonce per call, so ciphertext differs too
    assert_ne!(p1.nonce, p2.nonce);
    assert_ne!(p1.ciphertext, p2.ciphertext);

    // Both still decrypt to the same plaintext
    assert_eq!(decrypt(&key, &p1, CipherAlgorithm::Aes256Gcm).unwrap(), b"same plaintext");
    assert_eq!(decrypt(&key, &p2, CipherAlgorithm::Aes256Gcm).unwrap(), b"same plaintext");
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn seal_open_always_roundtrips(plaintext in proptest::collection::vec(any::<u8>(), 0..512)) {
            let key = key_for("prop-password", &Salt::random());
            for algorithm in ALGORITHMS {
                let payload = encrypt(&key, &plaintext, algorithm).unwrap();
                let recovered = decrypt(&key, &payload, algorithm).unwrap();
                prop_assert_eq!(&recovered, &plaintext);
            }
        }

        #[test]
        fn flipping_any_ciphertext_byte_fails(
            plaintext in proptest::collection::vec(any::<u8>(), 1..64),
            flip in any::<proptest::sample::Index>(),
        ) {
            let key = key_for("prop-password", &Salt::random());
            let mut payload = encrypt(&key, &plaintext, CipherAlgorithm::Aes256Gcm).unwrap();
            let i = flip.index(payload.ciphertext.len());
            payload.ciphertext[i] ^= 0xFF;
            prop_assert!(decrypt(&key, &payload, CipherAlgorithm::Aes256Gcm).is_err());
        }
    }
}
