mod document;
pub use document::{Document, ID_FIELD};

mod id;
pub use id::Id;

mod value;
pub use value::Value;
