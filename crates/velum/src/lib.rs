mod attributes;

pub mod db;
pub use db::Db;

pub mod model;
pub use model::{Instance, ModelClass};

pub mod relation;
pub use relation::{Documents, HasManyByIds};

pub mod schema;

pub use velum_core::{doc, driver, Document, Error, Id, Result, Value};
