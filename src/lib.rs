pub mod api;
pub mod config;
pub mod eip712;
pub mod error;
pub mod events;
pub mod hexfmt;
pub mod message;
pub mod recover;
pub mod schema;
pub mod service;
pub mod store;
pub mod validate;

pub use error::RegistryError;
pub use store::Store;
