// Service exports
pub mod store;

pub use store::{DataStore, StoreError};
