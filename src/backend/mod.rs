mod json_store;
mod interface;

pub use interface::{StoreBackend, Result, BackendError};
pub use json_store::JsonStore;
