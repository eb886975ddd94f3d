use crate::doc::{Document, Value};
use crate::Result;

/// Result of a driver operation.
#[derive(Debug)]
pub enum Response {
    /// Documents returned by a lookup
    Documents(Vec<Document>),

    /// Scalar result of a scoped query
    Value(Value),

    /// Operation completed with no interesting result
    Unit,
}

impl Response {
    pub fn is_documents(&self) -> bool {
        matches!(self, Self::Documents(_))
    }

    pub fn into_documents(self) -> Result<Vec<Document>> {
        match self {
            Self::Documents(documents) => Ok(documents),
            other => crate::bail!("driver response is not a document set; response={other:?}"),
        }
    }

    pub fn into_value(self) -> Result<Value> {
        match self {
            Self::Value(value) => Ok(value),
            other => crate::bail!("driver response is not a value; response={other:?}"),
        }
    }
}
