use crate::{db::Db, model::Instance, relation::HasManyByIds};

use velum_core::doc::{Document, Id, Value};
use velum_core::Result;

/// Array-like lazy view over a has-many-by-ids association.
///
/// Reads materialize the target instances on first use and cache them until
/// an invalidating write or an explicit [`reset`](Self::reset). Writes keep
/// the identifier array authoritative even while unloaded, and mutate the
/// materialized cache in lockstep when it exists so no reload is needed.
pub struct Documents<'a> {
    assoc: HasManyByIds<'a>,
}

impl std::fmt::Debug for Documents<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Documents")
            .field("ids", &self.assoc.ids())
            .finish_non_exhaustive()
    }
}

impl<'a> Documents<'a> {
    pub(crate) fn new(assoc: HasManyByIds<'a>) -> Self {
        Self { assoc }
    }

    /// The current identifier sequence.
    pub fn ids(&self) -> Vec<Id> {
        self.assoc.ids()
    }

    /// Whether the target instances are materialized.
    pub fn loaded(&self) -> bool {
        self.assoc
            .state()
            .is_some_and(|state| state.loaded.is_some())
    }

    /// Drop the materialized cache; the next read reloads from storage.
    pub fn reset(&mut self) {
        self.assoc.state_mut().loaded = None;
    }

    async fn load(&mut self, db: &Db) -> Result<()> {
        if !self.loaded() {
            let target = self.assoc.find_target(db).await?;
            self.assoc.state_mut().loaded = Some(target);
        }
        Ok(())
    }

    fn loaded_mut(&mut self) -> Option<&mut Vec<Instance>> {
        self.assoc.state_mut().loaded.as_mut()
    }

    /// The materialized target sequence, loading it if necessary.
    pub async fn get(&mut self, db: &Db) -> Result<&[Instance]> {
        self.load(db).await?;
        Ok(self
            .assoc
            .state()
            .and_then(|state| state.loaded.as_deref())
            .unwrap_or(&[]))
    }

    pub async fn to_vec(&mut self, db: &Db) -> Result<Vec<Instance>> {
        Ok(self.get(db).await?.to_vec())
    }

    pub async fn len(&mut self, db: &Db) -> Result<usize> {
        Ok(self.get(db).await?.len())
    }

    pub async fn is_empty(&mut self, db: &Db) -> Result<bool> {
        Ok(self.get(db).await?.is_empty())
    }

    pub async fn first(&mut self, db: &Db) -> Result<Option<Instance>> {
        Ok(self.get(db).await?.first().cloned())
    }

    pub async fn contains(&mut self, db: &Db, doc: &Instance) -> Result<bool> {
        Ok(self.get(db).await?.contains(doc))
    }

    /// Identifier-based accessor.
    ///
    /// Resolves against the association: the identifier must be a member of
    /// the identifier array, and pending or already-materialized instances
    /// are consulted before the store. Never a generic search of the whole
    /// target collection.
    pub async fn find(&mut self, db: &Db, id: &Id) -> Result<Option<Instance>> {
        if !self.ids().contains(id) {
            return Ok(None);
        }

        if let Some(state) = self.assoc.state() {
            if let Some(doc) = state.pending.iter().find(|doc| doc.id() == id) {
                return Ok(Some(doc.clone()));
            }
            if let Some(loaded) = &state.loaded {
                if let Some(doc) = loaded.iter().find(|doc| doc.id() == id) {
                    return Ok(Some(doc.clone()));
                }
            }
        }

        let target = self.assoc.target().clone();
        Ok(db
            .find_by_ids(&target, std::slice::from_ref(id))
            .await?
            .into_iter()
            .next())
    }

    /// Assign at an index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, like slice index assignment.
    pub fn set(&mut self, index: usize, doc: Instance) -> Result<()> {
        self.assoc.ensure_class(&doc)?;
        let id = Value::from(doc.id());
        if let Some(loaded) = self.loaded_mut() {
            loaded[index] = doc;
        }
        self.assoc.ids_mut()[index] = id;
        Ok(())
    }

    /// Append a document.
    pub fn push(&mut self, doc: Instance) -> Result<()> {
        self.assoc.ensure_class(&doc)?;
        let id = Value::from(doc.id());
        if let Some(loaded) = self.loaded_mut() {
            loaded.push(doc);
        }
        self.assoc.ids_mut().push(id);
        Ok(())
    }

    /// Append a sequence of documents.
    pub fn concat(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.assoc.ensure_class_all(&docs)?;
        let ids: Vec<Value> = docs.iter().map(|doc| doc.id().into()).collect();
        if let Some(loaded) = self.loaded_mut() {
            loaded.extend(docs);
        }
        self.assoc.ids_mut().extend(ids);
        Ok(())
    }

    /// Variadic-push equivalent of [`concat`](Self::concat).
    pub fn push_many(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.concat(docs)
    }

    /// Insert at an index, shifting later elements.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, index: usize, doc: Instance) -> Result<()> {
        self.assoc.ensure_class(&doc)?;
        let id = Value::from(doc.id());
        if let Some(loaded) = self.loaded_mut() {
            loaded.insert(index, doc);
        }
        self.assoc.ids_mut().insert(index, id);
        Ok(())
    }

    /// Prepend a sequence of documents, preserving their order.
    pub fn unshift_many(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.assoc.ensure_class_all(&docs)?;
        let ids: Vec<Value> = docs.iter().map(|doc| doc.id().into()).collect();
        if let Some(loaded) = self.loaded_mut() {
            loaded.splice(0..0, docs);
        }
        self.assoc.ids_mut().splice(0..0, ids);
        Ok(())
    }

    /// Replace the full contents through the array protocol: cache (when
    /// loaded) and identifier array are rewritten, pending state is kept.
    pub fn replace_all(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.assoc.ensure_class_all(&docs)?;
        let ids: Vec<Value> = docs.iter().map(|doc| doc.id().into()).collect();
        if let Some(loaded) = self.loaded_mut() {
            *loaded = docs;
        }
        *self.assoc.ids_mut() = ids;
        Ok(())
    }

    /// Assignment semantics: controller replace, which also clears pending
    /// targets and installs the candidates as the materialized cache.
    pub fn assign(&mut self, docs: Vec<Instance>) -> Result<()> {
        self.assoc.replace(docs)
    }

    pub fn clear(&mut self) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.clear();
        }
        self.assoc.ids_mut().clear();
    }

    /// Remove every element equal to `doc` and every occurrence of its
    /// identifier from the identifier array.
    pub fn remove(&mut self, doc: &Instance) {
        if let Some(loaded) = self.loaded_mut() {
            loaded.retain(|other| other != doc);
        }
        let id = Value::from(doc.id());
        self.assoc.ids_mut().retain(|value| *value != id);
    }

    /// Remove the element at `index` from both the cache (when loaded) and
    /// the identifier array. Returns the removed materialized instance, if
    /// one was cached.
    pub fn remove_at(&mut self, index: usize) -> Option<Instance> {
        let removed = match self.loaded_mut() {
            Some(loaded) if index < loaded.len() => Some(loaded.remove(index)),
            _ => None,
        };
        let ids = self.assoc.ids_mut();
        if index < ids.len() {
            ids.remove(index);
        }
        removed
    }

    /// Remove every element matching the predicate.
    ///
    /// Forces a load (the predicate needs materialized values), then
    /// rewrites the whole identifier array from the surviving sequence.
    /// The predicate may remove arbitrary elements, so incremental update
    /// is not possible.
    pub async fn remove_if(
        &mut self,
        db: &Db,
        mut predicate: impl FnMut(&Instance) -> bool,
    ) -> Result<()> {
        self.load(db).await?;

        let survivors: Vec<Value> = {
            let loaded = self
                .assoc
                .state_mut()
                .loaded
                .as_mut()
                .expect("association just loaded");
            loaded.retain(|doc| !predicate(doc));
            loaded.iter().map(|doc| doc.id().into()).collect()
        };
        *self.assoc.ids_mut() = survivors;
        Ok(())
    }

    /// Build an unpersisted target and attach it through the append path,
    /// so the identifier array and any materialized cache stay consistent.
    pub fn build(&mut self, attrs: Document) -> Result<Instance> {
        let doc = self.assoc.build(attrs)?;
        self.push(doc.clone())?;
        Ok(doc)
    }

    /// Create and persist a target, then attach it through the append path.
    pub async fn create(&mut self, db: &Db, attrs: Document) -> Result<Instance> {
        let doc = self.assoc.create(db, attrs).await?;
        self.push(doc.clone())?;
        Ok(doc)
    }

    /// Escape hatch for non-array methods: run as a storage-level query
    /// scoped to this association's identifier set rather than an in-memory
    /// operation.
    pub async fn invoke_scoped(
        &mut self,
        db: &Db,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        self.assoc.invoke_scoped(db, method, args).await
    }
}
