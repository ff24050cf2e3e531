use log::debug;
use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::transaction::{check_finite, Amount, TransactionKind, TransactionRecord};

/// Serialized form of a [`Ledger`], as kept in the account store.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub balance: Amount,
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>
}

/// A single named account: its balance and its append-only history.
#[derive(Clone, PartialEq, Debug)]
pub struct Ledger {
    name: String,
    balance: Amount,
    transactions: Vec<TransactionRecord>
}

impl Ledger {
    pub fn new(name: &str) -> Ledger {
        Ledger { name: name.to_owned(), balance: 0.0, transactions: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Transactions oldest first.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn deposit(&mut self, amount: Amount) -> LedgerResult<Amount> {
        let amount = Self::check_amount(amount)?;
        let record = self.prepare(TransactionKind::Deposit, amount)?;
        self.commit(record);
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Amount) -> LedgerResult<Amount> {
        let amount = Self::check_amount(amount)?;
        self.check_funds(amount)?;
        let record = self.prepare(TransactionKind::Withdrawal, amount)?;
        self.commit(record);
        Ok(self.balance)
    }

    /// Adds `balance * rate_percent / 100` to the balance and returns the interest.
    /// Negative rates are allowed and shrink the balance.
    pub fn accrue_interest(&mut self, rate_percent: Amount) -> LedgerResult<Amount> {
        let rate_percent = check_finite(rate_percent)?;
        let interest = self.balance * rate_percent / 100.0;
        let record = self.prepare(TransactionKind::Interest, interest)?;
        self.commit(record);
        Ok(interest)
    }

    /// Moves `amount` from this ledger into `target`.
    /// All checks run before either side is touched.
    /// Same-account transfers are rejected by `AccountStore::transfer`.
    pub fn transfer(&mut self, target: &mut Ledger, amount: Amount) -> LedgerResult<Amount> {
        let amount = Self::check_amount(amount)?;
        self.check_funds(amount)?;
        let outgoing = self.prepare(TransactionKind::TransferOut, amount)?;
        let incoming = target.prepare(TransactionKind::TransferIn, amount)?;

        self.commit(outgoing);
        target.commit(incoming);
        Ok(self.balance)
    }

    /// Replaces the name. Uniqueness within a store is up to the caller,
    /// see `AccountStore::rename_account`.
    pub fn rename(&mut self, new_name: &str) {
        debug!("renaming ledger '{}' to '{}'", self.name, new_name);
        self.name = new_name.to_owned();
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balance: self.balance,
            name: self.name.clone(),
            transactions: self.transactions.clone()
        }
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Ledger {
        Ledger {
            name: snapshot.name,
            balance: snapshot.balance,
            transactions: snapshot.transactions
        }
    }

    fn check_amount(amount: Amount) -> LedgerResult<Amount> {
        let amount = check_finite(amount)?;
        if amount < 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(amount)
    }

    fn check_funds(&self, amount: Amount) -> LedgerResult<()> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds { requested: amount, available: self.balance });
        }
        Ok(())
    }

    /// Builds the record for a movement, refusing one that would
    /// leave the balance non-finite.
    fn prepare(&self, kind: TransactionKind, amount: Amount) -> LedgerResult<TransactionRecord> {
        let record = TransactionRecord::now(kind, amount);
        check_finite(record.amount)?;
        check_finite(self.balance + record.amount)?;
        Ok(record)
    }

    fn commit(&mut self, record: TransactionRecord) {
        self.balance += record.amount;
        debug!("{}: {} {:.2}, balance now {:.2}", self.name, record.kind, record.amount, self.balance);
        self.transactions.push(record);
    }
}

impl From<LedgerSnapshot> for Ledger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Ledger::from_snapshot(snapshot)
    }
}
