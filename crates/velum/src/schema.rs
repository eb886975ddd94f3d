use crate::model::ModelClass;

use velum_core::doc::Value;

use std::sync::Arc;

/// Value types a property can be declared with.
///
/// Coercion between storage representations and these types belongs to the
/// storage collaborator; the mapper only records the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Bool,
    F64,
    I64,
    Id,
    List,
    Document,
    String,
}

/// A declared property on a model class.
#[derive(Debug, Clone)]
pub struct Property {
    /// The property name
    pub name: String,

    /// Declared value type
    pub ty: PropertyType,

    /// Internal properties are persisted but hidden from public
    /// serialization.
    pub internal: bool,

    /// Default applied when constructing a new instance
    pub default: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            internal: false,
            default: Value::Null,
        }
    }

    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }
}

/// A has-many-by-ids association declaration.
///
/// The association stores its state in a hidden identifier array property
/// on the owning model, named after the singular form of the association
/// (`tags` → `tag_ids`).
#[derive(Debug, Clone)]
pub struct AssociationDef {
    /// Association name, e.g. `tags`
    pub name: String,

    /// Name of the hidden identifier array property, e.g. `tag_ids`
    pub property_name: String,

    /// The class resolved instances must be instances of
    pub target: Arc<ModelClass>,
}

impl AssociationDef {
    pub(crate) fn new(name: impl Into<String>, target: Arc<ModelClass>) -> Self {
        let name = name.into();
        let singular = pluralizer::pluralize(&name, 1, false);
        Self {
            property_name: format!("{singular}_ids"),
            name,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_property_name_uses_singular_form() {
        let target = ModelClass::new("Tag");
        assert_eq!(
            AssociationDef::new("tags", target.clone()).property_name,
            "tag_ids"
        );
        assert_eq!(
            AssociationDef::new("people", target).property_name,
            "person_ids"
        );
    }
}
