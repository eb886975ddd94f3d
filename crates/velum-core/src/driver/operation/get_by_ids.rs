use super::Operation;
use crate::doc::Id;

/// Fetch every document whose identifier is in `ids`, in a single round
/// trip. Result order is driver order, not input order.
#[derive(Debug)]
pub struct GetByIds {
    /// Which model collection to fetch from
    pub model: String,

    /// Which identifiers to fetch
    pub ids: Vec<Id>,
}

impl From<GetByIds> for Operation {
    fn from(value: GetByIds) -> Self {
        Self::GetByIds(value)
    }
}
