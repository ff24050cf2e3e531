use std::collections::BTreeMap;

use log::info;
use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::{Ledger, LedgerSnapshot};
use crate::core::transaction::Amount;

/// All accounts, keyed by name. Serializes as a JSON object of ledger snapshots.
///
/// Nothing here touches the disk: every flow only edits the mapping and
/// persisting it is a separate `StoreBackend::save`.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountStore {
    accounts: BTreeMap<String, LedgerSnapshot>
}

impl AccountStore {
    pub fn new() -> AccountStore {
        AccountStore::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn snapshot(&self, name: &str) -> Option<&LedgerSnapshot> {
        self.accounts.get(name)
    }

    /// Materializes the ledger stored under `name`.
    pub fn ledger(&self, name: &str) -> LedgerResult<Ledger> {
        self.accounts.get(name)
            .cloned()
            .map(Ledger::from_snapshot)
            .ok_or_else(|| LedgerError::NotFound(name.to_owned()))
    }

    /// Writes the ledger back under its own name.
    pub fn upsert(&mut self, ledger: &Ledger) {
        self.upsert_snapshot(ledger.name(), ledger.snapshot());
    }

    pub fn upsert_snapshot(&mut self, name: &str, snapshot: LedgerSnapshot) {
        self.accounts.insert(name.to_owned(), snapshot);
    }

    pub fn remove(&mut self, name: &str) -> LedgerResult<LedgerSnapshot> {
        self.accounts.remove(name)
            .ok_or_else(|| LedgerError::NotFound(name.to_owned()))
    }

    /// Registers a fresh ledger with zero balance.
    pub fn open_account(&mut self, name: &str) -> LedgerResult<Ledger> {
        if self.contains(name) {
            return Err(LedgerError::NameTaken(name.to_owned()));
        }
        let ledger = Ledger::new(name);
        self.upsert(&ledger);
        info!("opened account '{}'", name);
        Ok(ledger)
    }

    /// Removes the account and hands back its final state.
    pub fn close_account(&mut self, name: &str) -> LedgerResult<Ledger> {
        let snapshot = self.remove(name)?;
        info!("closed account '{}' with balance {:.2}", name, snapshot.balance);
        Ok(Ledger::from_snapshot(snapshot))
    }

    /// Renames an account, keeping names unique across the store.
    pub fn rename_account(&mut self, old_name: &str, new_name: &str) -> LedgerResult<Ledger> {
        let mut ledger = self.ledger(old_name)?;
        if old_name == new_name {
            return Ok(ledger);
        }
        if self.contains(new_name) {
            return Err(LedgerError::NameTaken(new_name.to_owned()));
        }

        ledger.rename(new_name);
        self.accounts.remove(old_name);
        self.upsert(&ledger);
        info!("renamed account '{}' to '{}'", old_name, new_name);
        Ok(ledger)
    }

    /// Runs `op` on the named ledger and writes the result back only if it succeeded.
    /// The result goes back under `name`, whatever name the snapshot carries.
    pub fn apply<T, F>(&mut self, name: &str, op: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Ledger) -> LedgerResult<T>
    {
        let mut ledger = self.ledger(name)?;
        let result = op(&mut ledger)?;
        self.upsert_snapshot(name, ledger.snapshot());
        Ok(result)
    }

    /// Transfers between two accounts of the store. Both snapshots are
    /// replaced together, or neither is.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Amount) -> LedgerResult<(Ledger, Ledger)> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let mut source = self.ledger(from)?;
        let mut target = self.ledger(to)?;

        source.transfer(&mut target, amount)?;

        self.upsert_snapshot(from, source.snapshot());
        self.upsert_snapshot(to, target.snapshot());
        Ok((source, target))
    }
}
