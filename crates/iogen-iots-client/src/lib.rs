pub mod emitters;
pub mod generator;
pub mod operation;
pub mod parameters;
pub mod responses;
pub mod schema;
pub mod serialized;

pub use generator::{IotsClientConfig, IotsClientGenerator};
