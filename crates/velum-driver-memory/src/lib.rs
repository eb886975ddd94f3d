//! In-memory driver for Velum.
//!
//! Keeps each model collection in an insertion-ordered map. Lookups return
//! documents in storage order, not requested order, matching the contract
//! of the driver boundary. Every executed operation is summarized into a
//! log so tests can assert on round-trip counts and shapes.

use indexmap::IndexMap;
use velum_core::doc::{Document, Id, Value};
use velum_core::driver::{Operation, Response};
use velum_core::{async_trait, bail, Driver, Result};

use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryDriver {
    collections: Mutex<IndexMap<String, IndexMap<Id, Document>>>,

    /// Summaries of executed operations, for test assertions.
    log: Mutex<Vec<String>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents for a model, bypassing the operation
    /// interface.
    pub fn stored(&self, model: &str) -> usize {
        self.collections()
            .get(model)
            .map_or(0, IndexMap::len)
    }

    /// Snapshot of executed operation summaries, oldest first.
    pub fn operations(&self) -> Vec<String> {
        self.log.lock().expect("memory driver log poisoned").clone()
    }

    fn collections(
        &self,
    ) -> std::sync::MutexGuard<'_, IndexMap<String, IndexMap<Id, Document>>> {
        self.collections
            .lock()
            .expect("memory driver store poisoned")
    }

    fn record(&self, summary: String) {
        self.log
            .lock()
            .expect("memory driver log poisoned")
            .push(summary);
    }

    fn summarize(op: &Operation) -> String {
        match op {
            Operation::GetByIds(op) => {
                format!("get_by_ids({}, [{}])", op.model, join_ids(&op.ids))
            }
            Operation::Insert(op) => format!("insert({})", op.model),
            Operation::Delete(op) => format!("delete({}, {})", op.model, op.id),
            Operation::QueryScoped(op) => {
                format!(
                    "query_scoped({}, {}, [{}])",
                    op.model,
                    op.method,
                    join_ids(&op.ids)
                )
            }
        }
    }
}

fn join_ids(ids: &[Id]) -> String {
    ids.iter()
        .map(Id::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn exec(&self, op: Operation) -> Result<Response> {
        self.record(Self::summarize(&op));

        match op {
            Operation::GetByIds(op) => {
                let collections = self.collections();
                let documents = collections
                    .get(&op.model)
                    .map(|collection| {
                        collection
                            .values()
                            .filter(|document| {
                                document.id().is_some_and(|id| op.ids.contains(id))
                            })
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(Response::Documents(documents))
            }
            Operation::Insert(op) => {
                let Some(id) = op.document.id().cloned() else {
                    bail!("cannot insert a document without an `_id`");
                };
                let mut collections = self.collections();
                let collection = collections.entry(op.model).or_default();
                if collection.contains_key(&id) {
                    bail!("duplicate document id {id}");
                }
                collection.insert(id, op.document);
                Ok(Response::Unit)
            }
            Operation::Delete(op) => {
                if let Some(collection) = self.collections().get_mut(&op.model) {
                    collection.shift_remove(&op.id);
                }
                Ok(Response::Unit)
            }
            Operation::QueryScoped(op) => {
                let collections = self.collections();
                let matching: Vec<&Document> = collections
                    .get(&op.model)
                    .map(|collection| {
                        collection
                            .values()
                            .filter(|document| {
                                document.id().is_some_and(|id| op.ids.contains(id))
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                match op.method.as_str() {
                    "count" => Ok(Response::Value(Value::I64(matching.len() as i64))),
                    "exists" => Ok(Response::Value(Value::Bool(!matching.is_empty()))),
                    "first" => Ok(Response::Value(
                        matching
                            .first()
                            .map(|document| Value::Document((*document).clone()))
                            .unwrap_or(Value::Null),
                    )),
                    method => bail!("unsupported scoped query method `{method}`"),
                }
            }
        }
    }
}
