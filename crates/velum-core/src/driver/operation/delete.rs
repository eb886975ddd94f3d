use super::Operation;
use crate::doc::Id;

/// Delete the document identified by `id`, if it exists.
#[derive(Debug)]
pub struct Delete {
    /// Which model collection to delete from
    pub model: String,

    /// Which document to delete
    pub id: Id,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
