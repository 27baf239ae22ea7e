//! Document model: open-ended JSON objects with a reserved integer id.

use serde_json::{Map, Value};

/// A stored record. Open-ended field→value mapping; the reserved
/// [`ID_FIELD`] holds the store-assigned integer id.
pub type Document = Map<String, Value>;

/// Reserved field name for the store-assigned id.
pub const ID_FIELD: &str = "id";

/// The document's id, if it carries a valid one.
pub(crate) fn document_id(document: &Document) -> Option<u64> {
    document.get(ID_FIELD)?.as_u64()
}

/// Flat equality match: every query field must be present in the document
/// and strictly equal. Documents lacking a queried field do not match; an
/// empty query matches everything.
pub(crate) fn matches_query(document: &Document, query: &Document) -> bool {
    query
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}
