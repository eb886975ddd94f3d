use crate::schema::Property;

use indexmap::IndexMap;

/// Lazily generated attribute accessor table for a model class.
///
/// The table is built from the current property set the first time an
/// attribute-style method is dispatched and dropped again whenever the
/// property set changes, so accessors never go stale after a schema
/// change.
#[derive(Debug, Default)]
pub(crate) enum MethodSet {
    #[default]
    Uninitialized,
    Generated(IndexMap<String, AttributeMethod>),
}

/// One generated accessor: which property it touches and in which mode.
#[derive(Debug, Clone)]
pub(crate) struct AttributeMethod {
    pub(crate) property: String,
    pub(crate) kind: MethodKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    /// `name`: read the property value
    Reader,
    /// `name=`: assign the property value
    Writer,
    /// `name?`: ask whether the value is present and truthy
    Query,
}

impl MethodSet {
    pub(crate) fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    /// Build the accessor table for the given properties.
    pub(crate) fn generate<'a>(properties: impl Iterator<Item = &'a Property>) -> Self {
        let mut table = IndexMap::new();

        for property in properties {
            for (suffix, kind) in [
                ("", MethodKind::Reader),
                ("=", MethodKind::Writer),
                ("?", MethodKind::Query),
            ] {
                table.insert(
                    format!("{}{suffix}", property.name),
                    AttributeMethod {
                        property: property.name.clone(),
                        kind,
                    },
                );
            }
        }

        Self::Generated(table)
    }

    pub(crate) fn resolve(&self, method: &str) -> Option<&AttributeMethod> {
        match self {
            Self::Uninitialized => None,
            Self::Generated(table) => table.get(method),
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyType;

    #[test]
    fn generates_reader_writer_and_query_per_property() {
        let properties = [Property::new("title", PropertyType::String)];
        let methods = MethodSet::generate(properties.iter());

        assert!(methods.is_generated());
        assert_eq!(
            methods.resolve("title").unwrap().kind,
            MethodKind::Reader
        );
        assert_eq!(
            methods.resolve("title=").unwrap().kind,
            MethodKind::Writer
        );
        assert_eq!(methods.resolve("title?").unwrap().kind, MethodKind::Query);
        assert!(methods.resolve("body").is_none());
    }

    #[test]
    fn reset_returns_to_uninitialized() {
        let properties = [Property::new("title", PropertyType::String)];
        let mut methods = MethodSet::generate(properties.iter());

        methods.reset();
        assert!(!methods.is_generated());
        assert!(methods.resolve("title").is_none());
    }
}
