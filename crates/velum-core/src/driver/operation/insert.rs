use super::Operation;
use crate::doc::Document;

/// Persist a new document. The document carries its own identifier in the
/// reserved `_id` field.
#[derive(Debug)]
pub struct Insert {
    /// Which model collection to insert into
    pub model: String,

    /// The document to persist
    pub document: Document,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
