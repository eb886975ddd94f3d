/// A formatted one-off error created via the `err!`/`bail!` macros.
#[derive(Debug)]
pub(super) struct AdhocError {
    pub(super) message: String,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}
