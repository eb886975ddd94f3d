use super::Value;

use std::fmt;

/// A document identifier.
///
/// Identifiers are generated client side when an instance is constructed,
/// so a not-yet-persisted instance is already addressable by id.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Id {
    fn from(src: &str) -> Self {
        Self(src.to_string())
    }
}

impl From<String> for Id {
    fn from(src: String) -> Self {
        Self(src)
    }
}

impl From<Id> for Value {
    fn from(src: Id) -> Self {
        Self::Id(src)
    }
}

impl From<&Id> for Value {
    fn from(src: &Id) -> Self {
        Self::Id(src.clone())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(Id::generate(), Id::generate());
    }
}
