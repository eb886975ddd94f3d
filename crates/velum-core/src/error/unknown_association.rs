/// Error when an association accessor names an association the model class
/// does not declare.
#[derive(Debug)]
pub(super) struct UnknownAssociationError {
    pub(super) model: String,
    pub(super) name: String,
}

impl std::error::Error for UnknownAssociationError {}

impl core::fmt::Display for UnknownAssociationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown association `{}` for model {}",
            self.name, self.model
        )
    }
}
