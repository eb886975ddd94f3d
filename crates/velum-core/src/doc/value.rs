use super::{Document, Id};
use crate::Result;

/// A dynamically typed document value.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// A document identifier
    Id(Id),

    /// Null value
    #[default]
    Null,

    /// A nested document
    Document(Document),

    /// A list of values
    List(Vec<Value>),

    /// String value
    String(String),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_id(&self) -> bool {
        matches!(self, Self::Id(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_document(&self) -> bool {
        matches!(self, Self::Document(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Truthiness as used by query-style attribute methods: null, `false`,
    /// the empty string, and the empty list are blank.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::String(value) => !value.is_empty(),
            Self::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&Id> {
        match self {
            Self::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(value),
            _ => crate::bail!("cannot convert value to bool; value={self:?}"),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(value) => Ok(value),
            _ => crate::bail!("cannot convert value to i64; value={self:?}"),
        }
    }

    pub fn to_id(self) -> Result<Id> {
        match self {
            Self::Id(id) => Ok(id),
            // Ids round-trip through drivers that only know strings.
            Self::String(value) => Ok(Id::from(value)),
            _ => crate::bail!("cannot convert value to Id; value={self:?}"),
        }
    }

    pub fn to_option_id(self) -> Result<Option<Id>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_id().map(Some),
        }
    }

    pub fn to_list(self) -> Result<Vec<Self>> {
        match self {
            Self::List(items) => Ok(items),
            _ => crate::bail!("cannot convert value to list; value={self:?}"),
        }
    }

    pub fn to_document(self) -> Result<Document> {
        match self {
            Self::Document(document) => Ok(document),
            _ => crate::bail!("cannot convert value to document; value={self:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_follows_blankness() {
        assert!(!Value::Null.is_present());
        assert!(!Value::Bool(false).is_present());
        assert!(!Value::from("").is_present());
        assert!(!Value::List(vec![]).is_present());

        assert!(Value::Bool(true).is_present());
        assert!(Value::from("x").is_present());
        assert!(Value::I64(0).is_present());
        assert!(Value::List(vec![Value::Null]).is_present());
    }

    #[test]
    fn id_round_trips_through_string() {
        let id = Id::generate();
        let value = Value::String(id.to_string());
        assert_eq!(value.to_id().unwrap(), id);
    }

    #[test]
    fn checked_conversions_fail_loudly() {
        assert!(Value::Null.to_bool().is_err());
        assert!(Value::from("nope").to_list().is_err());
        assert_eq!(Value::Null.to_option_id().unwrap(), None);
    }
}
