mod delete;
pub use delete::Delete;

mod get_by_ids;
pub use get_by_ids::GetByIds;

mod insert;
pub use insert::Insert;

mod query_scoped;
pub use query_scoped::QueryScoped;

#[derive(Debug)]
pub enum Operation {
    /// Batched lookup of documents by identifier.
    GetByIds(GetByIds),

    /// Persist a new document.
    Insert(Insert),

    /// Delete a document by identifier.
    Delete(Delete),

    /// Run a read method against a model, restricted to an identifier set.
    QueryScoped(QueryScoped),
}
