use crate::model::{Instance, ModelClass};

use velum_core::doc::{Document, Id, Value};
use velum_core::driver::{operation, Driver, Operation};
use velum_core::Result;

use std::fmt;
use std::sync::Arc;

/// Handle to the storage collaborator.
///
/// Cloning is cheap; all clones share the same driver. The handle owns no
/// retry or timeout policy of its own. Each method is a single round trip
/// whose semantics belong to the driver.
#[derive(Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
}

impl Db {
    pub fn new(driver: impl Driver) -> Self {
        Self::shared(Arc::new(driver))
    }

    pub fn shared(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    /// Batched lookup: one round trip regardless of how many identifiers
    /// are requested. Result order is driver order, not input order.
    pub async fn find_by_ids(&self, class: &Arc<ModelClass>, ids: &[Id]) -> Result<Vec<Instance>> {
        let response = self
            .driver
            .exec(Operation::GetByIds(operation::GetByIds {
                model: class.name().to_string(),
                ids: ids.to_vec(),
            }))
            .await?;

        response
            .into_documents()?
            .into_iter()
            .map(|document| Instance::load(class, document))
            .collect()
    }

    /// Fetch a single instance by identifier.
    pub async fn get(&self, class: &Arc<ModelClass>, id: &Id) -> Result<Option<Instance>> {
        Ok(self
            .find_by_ids(class, std::slice::from_ref(id))
            .await?
            .into_iter()
            .next())
    }

    /// Persist a new instance and mark it as no longer a new record.
    pub async fn insert(&self, instance: &mut Instance) -> Result<()> {
        self.driver
            .exec(Operation::Insert(operation::Insert {
                model: instance.class_name().to_string(),
                document: instance.to_document(),
            }))
            .await?;
        instance.mark_persisted();
        Ok(())
    }

    /// Construct an instance with the given attributes and persist it.
    pub async fn create(&self, class: &Arc<ModelClass>, attrs: Document) -> Result<Instance> {
        let mut instance = Instance::new_with(class, attrs)?;
        self.insert(&mut instance).await?;
        Ok(instance)
    }

    /// Delete an instance's document from storage.
    pub async fn delete(&self, instance: &Instance) -> Result<()> {
        self.driver
            .exec(Operation::Delete(operation::Delete {
                model: instance.class_name().to_string(),
                id: instance.id().clone(),
            }))
            .await?;
        Ok(())
    }

    /// Run a named read method against `class` restricted to the given
    /// identifier set.
    pub async fn query_scoped(
        &self,
        class: &Arc<ModelClass>,
        ids: Vec<Id>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        let response = self
            .driver
            .exec(Operation::QueryScoped(operation::QueryScoped {
                model: class.name().to_string(),
                ids,
                method: method.to_string(),
                args,
            }))
            .await?;
        response.into_value()
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db").finish_non_exhaustive()
    }
}
