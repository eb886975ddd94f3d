use crate::{
    attributes::MethodKind,
    model::ModelClass,
    relation::{AssociationState, Documents, HasManyByIds},
};

use indexmap::IndexMap;
use velum_core::doc::{Document, Id, Value, ID_FIELD};
use velum_core::{err, Error, Result};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An in-memory model instance bound to a stored document.
///
/// Attribute access goes through the class's lazily generated accessor
/// table; association access goes through per-association controller state
/// held privately by this instance.
#[derive(Clone)]
pub struct Instance {
    class: Arc<ModelClass>,
    id: Id,
    new_record: bool,
    attributes: IndexMap<String, Value>,
    associations: HashMap<String, AssociationState>,
}

impl Instance {
    /// Construct a new, unpersisted instance with property defaults applied
    /// and a freshly generated identifier.
    pub fn new(class: &Arc<ModelClass>) -> Self {
        let mut attributes = IndexMap::new();
        for property in class.properties() {
            attributes.insert(property.name.clone(), property.default.clone());
        }

        Self {
            class: class.clone(),
            id: Id::generate(),
            new_record: true,
            attributes,
            associations: HashMap::new(),
        }
    }

    /// Construct a new instance and assign the given attributes through the
    /// dispatch shim, so undeclared names fail with `UndefinedAttribute`.
    pub fn new_with(class: &Arc<ModelClass>, attrs: Document) -> Result<Self> {
        let mut instance = Self::new(class);
        for (name, value) in attrs {
            instance.set(&name, value)?;
        }
        Ok(instance)
    }

    /// Bind an instance to a document loaded from storage.
    pub fn load(class: &Arc<ModelClass>, document: Document) -> Result<Self> {
        let mut attributes = IndexMap::new();
        let mut id = None;

        for (name, value) in document {
            if name == ID_FIELD {
                id = Some(value.to_id()?);
            } else {
                attributes.insert(name, value);
            }
        }

        let id = id.ok_or_else(|| err!("stored document is missing `{ID_FIELD}`"))?;

        Ok(Self {
            class: class.clone(),
            id,
            new_record: false,
            attributes,
            associations: HashMap::new(),
        })
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.new_record = false;
    }

    /// True if this instance's class is `class` or a subclass of it.
    pub fn is_a(&self, class: &Arc<ModelClass>) -> bool {
        self.class.is_a(class)
    }

    /// Raw attribute read, bypassing the dispatch shim.
    pub fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Raw attribute write, bypassing the dispatch shim.
    pub fn write_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Read a property through the dispatch shim.
    pub fn attribute(&self, name: &str) -> Result<Value> {
        match self.class.resolve_method(name) {
            Some(method) if method.kind == MethodKind::Reader => Ok(self
                .read_attribute(&method.property)
                .cloned()
                .unwrap_or_default()),
            _ => Err(Error::undefined_attribute(self.class_name(), name)),
        }
    }

    /// Assign a property through the dispatch shim.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.send(&format!("{name}="), vec![value.into()])?;
        Ok(())
    }

    /// Ask whether a property is present and truthy, through the shim.
    pub fn query(&self, name: &str) -> Result<bool> {
        match self.class.resolve_method(&format!("{name}?")) {
            Some(method) if method.kind == MethodKind::Query => Ok(self
                .read_attribute(&method.property)
                .is_some_and(Value::is_present)),
            _ => Err(Error::undefined_attribute(self.class_name(), name)),
        }
    }

    /// Dynamic dispatch of an attribute-style method (`name`, `name=`,
    /// `name?`). Forces accessor generation on first use; an unresolved
    /// method after generation fails with `UndefinedAttribute`.
    pub fn send(&mut self, method: &str, mut args: Vec<Value>) -> Result<Value> {
        let Some(resolved) = self.class.resolve_method(method) else {
            return Err(Error::undefined_attribute(self.class_name(), method));
        };

        match resolved.kind {
            MethodKind::Reader => Ok(self
                .read_attribute(&resolved.property)
                .cloned()
                .unwrap_or_default()),
            MethodKind::Writer => {
                let value = if args.is_empty() {
                    Value::Null
                } else {
                    args.remove(0)
                };
                self.write_attribute(resolved.property, value);
                Ok(Value::Null)
            }
            MethodKind::Query => Ok(Value::Bool(
                self.read_attribute(&resolved.property)
                    .is_some_and(Value::is_present),
            )),
        }
    }

    /// Capability check. Forces accessor generation so the answer is
    /// accurate before any attribute access has happened.
    pub fn responds_to(&self, method: &str) -> bool {
        self.class.resolve_method(method).is_some()
    }

    /// The full persisted form, including the identifier and internal
    /// properties.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.set_id(self.id.clone());
        for (name, value) in &self.attributes {
            document.insert(name.clone(), value.clone());
        }
        document
    }

    /// The serialization-facing form: the public `id` plus every
    /// non-internal property. Identifier array properties stay hidden.
    pub fn to_public_document(&self) -> Document {
        let mut document = Document::new();
        document.insert("id".to_string(), Value::from(&self.id));
        for (name, value) in &self.attributes {
            let internal = self
                .class
                .property_def(name)
                .is_some_and(|property| property.internal);
            if !internal {
                document.insert(name.clone(), value.clone());
            }
        }
        document
    }

    /// The lazy collection proxy for a declared has-many-by-ids
    /// association.
    pub fn documents(&mut self, name: &str) -> Result<Documents<'_>> {
        let def = match self.class.association(name) {
            Some(def) => def,
            None => return Err(Error::unknown_association(self.class_name(), name)),
        };
        Ok(Documents::new(HasManyByIds::new(self, def)))
    }

    /// Assignment path for an association (`post.tags = docs`): controller
    /// replace, which validates, rewrites the identifier array, and resets
    /// association state.
    pub fn set_documents(&mut self, name: &str, docs: Vec<Instance>) -> Result<()> {
        self.documents(name)?.assign(docs)
    }

    pub(crate) fn association_state(&self, name: &str) -> Option<&AssociationState> {
        self.associations.get(name)
    }

    pub(crate) fn association_state_mut(&mut self, name: &str) -> &mut AssociationState {
        self.associations.entry(name.to_string()).or_default()
    }

    /// Mutable access to a list-typed property, used by the association
    /// controller for the identifier array.
    pub(crate) fn list_attribute_mut(&mut self, name: &str) -> &mut Vec<Value> {
        let value = self
            .attributes
            .entry(name.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if !value.is_list() {
            *value = Value::List(Vec::new());
        }
        match value {
            Value::List(items) => items,
            _ => unreachable!(),
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class)
            && self.id == other.id
            && self.attributes == other.attributes
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.class.name())
            .field("id", &self.id)
            .field("new_record", &self.new_record)
            .field("attributes", &self.attributes)
            .finish()
    }
}
