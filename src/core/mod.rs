pub mod error;
pub mod transaction;
pub mod ledger;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use transaction::{Amount, TransactionKind, TransactionRecord, parse_amount};
pub use ledger::{Ledger, LedgerSnapshot};
pub use store::AccountStore;
