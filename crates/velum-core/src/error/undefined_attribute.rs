/// Error when an attribute-style method does not correspond to any declared
/// property, even after accessor generation.
#[derive(Debug)]
pub(super) struct UndefinedAttributeError {
    pub(super) model: String,
    pub(super) method: String,
}

impl std::error::Error for UndefinedAttributeError {}

impl core::fmt::Display for UndefinedAttributeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "undefined attribute method `{}` for model {}",
            self.method, self.model
        )
    }
}
