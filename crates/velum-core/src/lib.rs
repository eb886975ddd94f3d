#[macro_use]
mod macros;

pub mod doc;
pub use doc::{Document, Id, Value};

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

/// A Result type alias that uses Velum's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
