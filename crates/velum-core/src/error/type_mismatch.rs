/// Error when an object handed to an association is not an instance of the
/// association's declared target class.
#[derive(Debug)]
pub(super) struct TypeMismatchError {
    pub(super) expected: String,
    pub(super) actual: String,
}

impl std::error::Error for TypeMismatchError {}

impl core::fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "expected an instance of {}, got {}",
            self.expected, self.actual
        )
    }
}
