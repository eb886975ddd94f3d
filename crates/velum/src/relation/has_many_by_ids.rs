use crate::{
    db::Db,
    model::{Instance, ModelClass},
    relation::AssociationState,
    schema::AssociationDef,
};

use velum_core::doc::{Document, Id, Value};
use velum_core::{Error, Result};

use std::collections::HashSet;
use std::sync::Arc;

/// The association controller for a has-many-by-ids association.
///
/// Owns the hidden identifier array property on the owning instance,
/// resolves identifiers to target instances, tracks not-yet-persisted
/// targets, and enforces target-class compatibility. The identifier array
/// property itself stays authoritative; the controller never holds an
/// independent copy.
pub struct HasManyByIds<'a> {
    instance: &'a mut Instance,
    def: Arc<AssociationDef>,
}

impl<'a> HasManyByIds<'a> {
    pub(crate) fn new(instance: &'a mut Instance, def: Arc<AssociationDef>) -> Self {
        Self { instance, def }
    }

    pub fn definition(&self) -> &AssociationDef {
        &self.def
    }

    pub(crate) fn target(&self) -> &Arc<ModelClass> {
        &self.def.target
    }

    /// Snapshot of the current identifier sequence, read through to the
    /// owning instance's identifier array property. No side effects.
    pub fn ids(&self) -> Vec<Id> {
        match self.instance.read_attribute(&self.def.property_name) {
            Some(Value::List(items)) => items.iter().filter_map(Value::as_id).cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn ids_mut(&mut self) -> &mut Vec<Value> {
        self.instance.list_attribute_mut(&self.def.property_name)
    }

    /// Replace the association contents.
    ///
    /// Validates every candidate first and fails atomically with
    /// `TypeMismatch` on the first violator, before any mutation. On
    /// success the identifier array is rewritten in input order, the
    /// pending list is cleared, and the candidates become the materialized
    /// cache (association state reset).
    pub fn replace(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.ensure_class_all(&docs)?;

        let ids: Vec<Value> = docs.iter().map(|doc| doc.id().into()).collect();
        *self.ids_mut() = ids;

        let state = self.state_mut();
        state.pending.clear();
        state.loaded = Some(docs);
        Ok(())
    }

    /// Resolve the association's target instances.
    ///
    /// Identifiers not covered by pending new targets are fetched in one
    /// batched lookup (a single round trip regardless of count); pending
    /// new targets follow in build order. An empty identifier array
    /// resolves to an empty sequence without querying.
    pub async fn find_target(&mut self, db: &Db) -> Result<Vec<Instance>> {
        let ids = self.ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let pending = self
            .state()
            .map(|state| state.pending.clone())
            .unwrap_or_default();
        let pending_ids: HashSet<&Id> = pending.iter().map(Instance::id).collect();

        let lookup: Vec<Id> = ids
            .into_iter()
            .filter(|id| !pending_ids.contains(id))
            .collect();

        let mut found = if lookup.is_empty() {
            Vec::new()
        } else {
            db.find_by_ids(&self.def.target, &lookup).await?
        };
        found.extend(pending);
        Ok(found)
    }

    /// Construct an unpersisted target with the given attributes and track
    /// it so association reads include it before it is saved. The
    /// identifier array is not touched; it gains the new identifier only
    /// when the returned instance is attached through the proxy.
    pub fn build(&mut self, attrs: Document) -> Result<Instance> {
        let doc = Instance::new_with(&self.def.target, attrs)?;
        self.state_mut().pending.push(doc.clone());
        Ok(doc)
    }

    /// Construct and immediately persist a target. Not tracked as pending;
    /// the caller attaches the result explicitly, mirroring `build`.
    pub async fn create(&mut self, db: &Db, attrs: Document) -> Result<Instance> {
        db.create(&self.def.target, attrs).await
    }

    /// Run an arbitrary read method against the target class restricted to
    /// this association's identifier set, without loading the association.
    pub async fn invoke_scoped(
        &mut self,
        db: &Db,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        let ids = self.ids();
        db.query_scoped(&self.def.target, ids, method, args).await
    }

    /// Candidate must be an instance of the declared target class or one of
    /// its subclasses.
    pub(crate) fn ensure_class(&self, doc: &Instance) -> Result<()> {
        if doc.is_a(&self.def.target) {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                self.def.target.name(),
                doc.class_name(),
            ))
        }
    }

    pub(crate) fn ensure_class_all(&self, docs: &[Instance]) -> Result<()> {
        docs.iter().try_for_each(|doc| self.ensure_class(doc))
    }

    pub(crate) fn state(&self) -> Option<&AssociationState> {
        self.instance.association_state(&self.def.name)
    }

    pub(crate) fn state_mut(&mut self) -> &mut AssociationState {
        self.instance.association_state_mut(&self.def.name)
    }
}
