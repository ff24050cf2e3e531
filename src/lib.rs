mod core;
pub mod backend;
pub mod config;

pub use crate::core::{AccountStore, Ledger, LedgerSnapshot, TransactionRecord, TransactionKind};
pub use crate::core::{Amount, LedgerError, LedgerResult, parse_amount};
pub use crate::core::{error, ledger, store, transaction};
