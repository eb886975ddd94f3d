mod class;
pub use class::ModelClass;

mod instance;
pub use instance::Instance;
