mod documents;
pub use documents::Documents;

mod has_many_by_ids;
pub use has_many_by_ids::HasManyByIds;

use crate::model::Instance;

/// Per-instance runtime state for one association: the pending new target
/// list and the materialized cache. Held privately by the owning instance;
/// the controller and proxy are borrowing views over it.
#[derive(Debug, Default, Clone)]
pub(crate) struct AssociationState {
    /// Targets built through the association but not yet persisted, in
    /// build order.
    pub(crate) pending: Vec<Instance>,

    /// The materialized target sequence, `None` while unloaded.
    pub(crate) loaded: Option<Vec<Instance>>,
}
