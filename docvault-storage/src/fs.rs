//! Filesystem helper for atomic store rewrites.

use std::fs;
use std::io;
use std::path::Path;

/// Atomically replace `destination` with `temp_path` via rename.
///
/// On platforms where rename refuses to overwrite an existing target
/// (notably Windows), the destination is removed first and the rename
/// retried. The temp file is cleaned up if the rename ultimately fails.
pub(crate) fn replace_file(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!("atomic replace failed (initial: {initial_err}, retry: {retry_err})"),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn replaces_a_fresh_destination() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("store.json.tmp");
        let dest = dir.path().join("store.json");

        File::create(&temp).unwrap().write_all(b"[]").unwrap();
        replace_file(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "[]");
    }

    #[test]
    fn replaces_an_existing_destination() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("store.json.tmp");
        let dest = dir.path().join("store.json");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&temp).unwrap().write_all(b"new").unwrap();
        replace_file(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
