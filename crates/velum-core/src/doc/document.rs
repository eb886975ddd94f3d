use super::{Id, Value};

use indexmap::IndexMap;
use std::ops;

/// The reserved field that carries a document's identifier in storage.
pub const ID_FIELD: &str = "_id";

/// An ordered field-name to value map, the unit of storage exchange.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// The stored identifier, if the document carries one.
    pub fn id(&self) -> Option<&Id> {
        self.fields.get(ID_FIELD).and_then(Value::as_id)
    }

    pub fn set_id(&mut self, id: Id) {
        self.fields.insert(ID_FIELD.to_string(), id.into());
    }
}

impl ops::Deref for Document {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<Document> for Value {
    fn from(src: Document) -> Self {
        Self::Document(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_macro_builds_in_declaration_order() {
        let document = crate::doc! {
            "title" => "first",
            "rank" => 3_i64,
        };
        let names: Vec<_> = document.keys().cloned().collect();
        assert_eq!(names, ["title", "rank"]);
        assert_eq!(document.get("rank"), Some(&Value::I64(3)));
    }

    #[test]
    fn stored_id_is_reachable() {
        let mut document = Document::new();
        assert!(document.id().is_none());

        let id = Id::generate();
        document.set_id(id.clone());
        assert_eq!(document.id(), Some(&id));
    }
}
