use super::Operation;
use crate::doc::{Id, Value};

/// Run a named read method against a model with an implicit
/// `identifier ∈ ids` filter.
///
/// This is the delegation escape hatch behind association-scoped calls like
/// counts and custom finders; the driver decides which methods it supports.
#[derive(Debug)]
pub struct QueryScoped {
    /// Which model collection to query
    pub model: String,

    /// The identifier set restricting the query
    pub ids: Vec<Id>,

    /// Name of the read method to run
    pub method: String,

    /// Method arguments
    pub args: Vec<Value>,
}

impl From<QueryScoped> for Operation {
    fn from(value: QueryScoped) -> Self {
        Self::QueryScoped(value)
    }
}
