use std::{fs, io, path::{Path, PathBuf}};

use log::{debug, info, warn};
use serde::Serialize;

use crate::backend::interface::{Result, StoreBackend};
use crate::core::AccountStore;

/// Keeps every account in one pretty-printed JSON file,
/// rewritten in full on each save.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf
}

impl JsonStore {
    const INDENT: &'static [u8] = b"    ";

    pub fn new(path: impl AsRef<Path>) -> JsonStore {
        JsonStore { path: path.as_ref().to_owned() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(store: &AccountStore) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(Self::INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        store.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

impl StoreBackend for JsonStore {
    fn load(&self) -> AccountStore {
        match self.try_load() {
            Ok(store) => store,
            Err(err) => {
                warn!("ignoring unreadable store {}: {}", self.path.display(), err);
                AccountStore::new()
            }
        }
    }

    fn try_load(&self) -> Result<AccountStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no store at {}, starting empty", self.path.display());
                return Ok(AccountStore::new());
            },
            Err(err) => return Err(err.into())
        };
        let store: AccountStore = serde_json::from_str(&content)?;
        debug!("loaded {} accounts from {}", store.len(), self.path.display());
        Ok(store)
    }

    fn save(&self, store: &AccountStore) -> Result<()> {
        let encoded = Self::encode(store)?;
        fs::write(&self.path, encoded)?;
        info!("saved {} accounts to {}", store.len(), self.path.display());
        Ok(())
    }
}
