use thiserror::Error;

use crate::core::Amount;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Occurs when a negative amount is given where
    /// only a non-negative one makes sense.
    #[error("amount must not be negative: {0}")]
    InvalidAmount(Amount),
    /// Occurs when a withdrawal or outgoing transfer
    /// exceeds the available balance.
    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount
    },
    /// Occurs when the source and target of a transfer are the same account.
    #[error("cannot transfer money to the same account")]
    SelfTransfer,
    /// Occurs when referencing an account name absent from the store.
    #[error("no account found with the name '{0}'")]
    NotFound(String),
    /// Occurs when opening or renaming onto a name already in the store.
    #[error("an account with the name '{0}' already exists")]
    NameTaken(String),
    /// Occurs when a value is not a usable (finite) number.
    #[error("not a valid number: '{0}'")]
    MalformedInput(String)
}

pub type LedgerResult<T> = Result<T, LedgerError>;
