pub mod operation;
pub use operation::Operation;

mod response;
pub use response::Response;

use crate::async_trait;

use std::fmt::Debug;

/// The storage collaborator boundary.
///
/// Every round trip the mapper makes (a batched identifier lookup, a
/// persist, a scoped query delegation) goes through `exec`. Drivers own
/// retry, timeout, and cancellation semantics; the mapper passes failures
/// through unmodified.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a storage operation.
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
