use thiserror::Error;

use crate::core::AccountStore;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt account store: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;

pub trait StoreBackend {
    /// Reads the store, treating missing or unreadable content as "no accounts yet".
    fn load(&self) -> AccountStore;
    /// Reads the store, reporting corrupt content instead of discarding it.
    fn try_load(&self) -> Result<AccountStore>;
    /// Overwrites the persisted store with `store`.
    fn save(&self, store: &AccountStore) -> Result<()>;
}
