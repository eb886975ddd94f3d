/// A failure reported by the storage collaborator.
///
/// The mapper adds no retry or suppression; driver failures surface to the
/// caller of whichever association operation triggered the round trip.
#[derive(Debug)]
pub(super) struct DriverError {
    pub(super) inner: anyhow::Error,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "driver error: {}", self.inner)
    }
}
