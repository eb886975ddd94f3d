use crate::{
    attributes::{AttributeMethod, MethodSet},
    schema::{AssociationDef, Property, PropertyType},
};

use indexmap::IndexMap;
use velum_core::doc::Value;

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A runtime model class descriptor.
///
/// Classes are shared behind `Arc` by every instance bound to them.
/// Property and association declarations may happen at any point, including
/// after instances exist; the attribute accessor table regenerates lazily
/// on the next dispatch after a declaration.
pub struct ModelClass {
    name: String,
    parent: Option<Arc<ModelClass>>,
    inner: RwLock<ClassInner>,
}

#[derive(Default)]
struct ClassInner {
    properties: IndexMap<String, Property>,
    associations: IndexMap<String, Arc<AssociationDef>>,
    methods: MethodSet,
}

impl ModelClass {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
            inner: RwLock::default(),
        })
    }

    /// Declare a subclass. The subclass starts with a copy of the parent's
    /// current properties and associations; later parent declarations do
    /// not flow down.
    pub fn subclass(name: impl Into<String>, parent: &Arc<Self>) -> Arc<Self> {
        let inherited = {
            let inner = parent.read();
            ClassInner {
                properties: inner.properties.clone(),
                associations: inner.associations.clone(),
                methods: MethodSet::Uninitialized,
            }
        };

        Arc::new(Self {
            name: name.into(),
            parent: Some(parent.clone()),
            inner: RwLock::new(inherited),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// True if `self` is `other` or a subclass of it.
    pub fn is_a(self: &Arc<Self>, other: &Arc<Self>) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if Arc::ptr_eq(class, other) {
                return true;
            }
            current = class.parent.as_ref();
        }
        false
    }

    /// Declare a public property.
    pub fn property(&self, name: impl Into<String>, ty: PropertyType) {
        self.declare_property(Property::new(name, ty));
    }

    /// Declare a persisted property hidden from public serialization.
    pub fn internal_property(&self, name: impl Into<String>, ty: PropertyType, default: Value) {
        self.declare_property(Property::new(name, ty).internal().with_default(default));
    }

    fn declare_property(&self, property: Property) {
        let mut inner = self.write();
        inner.properties.insert(property.name.clone(), property);
        // Any schema change invalidates the generated accessor set.
        inner.methods.reset();
    }

    /// Declare a has-many-by-ids association to `target`. Also declares the
    /// hidden identifier array property backing it.
    pub fn has_many(&self, name: impl Into<String>, target: &Arc<ModelClass>) {
        let def = AssociationDef::new(name, target.clone());
        self.internal_property(
            def.property_name.clone(),
            PropertyType::List,
            Value::List(Vec::new()),
        );
        self.write()
            .associations
            .insert(def.name.clone(), Arc::new(def));
    }

    pub fn association(&self, name: &str) -> Option<Arc<AssociationDef>> {
        self.read().associations.get(name).cloned()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.read().properties.contains_key(name)
    }

    pub fn properties(&self) -> Vec<Property> {
        self.read().properties.values().cloned().collect()
    }

    pub(crate) fn property_def(&self, name: &str) -> Option<Property> {
        self.read().properties.get(name).cloned()
    }

    /// Generate accessor methods for every declared property, once.
    pub fn define_attribute_methods(&self) {
        let mut inner = self.write();
        if inner.methods.is_generated() {
            return;
        }
        let methods = MethodSet::generate(inner.properties.values());
        inner.methods = methods;
    }

    pub fn attribute_methods_generated(&self) -> bool {
        self.read().methods.is_generated()
    }

    /// Drop the generated accessor set so it regenerates on next dispatch.
    pub fn undefine_attribute_methods(&self) {
        self.write().methods.reset();
    }

    /// Single checked entry point for attribute-style dispatch: forces
    /// generation, then resolves `method` against the accessor table.
    pub(crate) fn resolve_method(&self, method: &str) -> Option<AttributeMethod> {
        self.define_attribute_methods();
        self.read().methods.resolve(method).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, ClassInner> {
        self.inner.read().expect("model class lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, ClassInner> {
        self.inner.write().expect("model class lock poisoned")
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subclass_chain_satisfies_is_a() {
        let tag = ModelClass::new("Tag");
        let special = ModelClass::subclass("SpecialTag", &tag);
        let other = ModelClass::new("Comment");

        assert!(tag.is_a(&tag));
        assert!(special.is_a(&tag));
        assert!(!tag.is_a(&special));
        assert!(!other.is_a(&tag));
    }

    #[test]
    fn declaration_resets_generated_methods() {
        let post = ModelClass::new("Post");
        post.property("title", PropertyType::String);

        post.define_attribute_methods();
        assert!(post.attribute_methods_generated());

        post.property("body", PropertyType::String);
        assert!(!post.attribute_methods_generated());

        // next dispatch regenerates and sees the new property
        assert!(post.resolve_method("body=").is_some());
    }

    #[test]
    fn has_many_declares_hidden_identifier_property() {
        let tag = ModelClass::new("Tag");
        let post = ModelClass::new("Post");
        post.has_many("tags", &tag);

        assert!(post.association("tags").is_some());
        let property = post.property_def("tag_ids").unwrap();
        assert!(property.internal);
        assert_eq!(property.default, Value::List(Vec::new()));
    }
}
