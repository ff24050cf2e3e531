use std::{fs, path::PathBuf};

use piggybank::{AccountStore, LedgerError, TransactionKind,
    backend::{JsonStore, StoreBackend}};

use rstest::{fixture, rstest};

struct ScratchDir(PathBuf);

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[fixture]
fn scratch() -> ScratchDir {
    let thread = format!("{:?}", std::thread::current().id());
    let thread: String = thread.chars().filter(char::is_ascii_digit).collect();
    let dir = std::env::temp_dir().join(format!("piggybank-session-{}-{}", std::process::id(), thread));
    fs::create_dir_all(&dir).unwrap();
    ScratchDir(dir)
}

/// Loads, runs one step and persists, the way a front end drives the store.
fn session<F>(backend: &JsonStore, step: F)
where
    F: FnOnce(&mut AccountStore)
{
    let mut accounts = backend.try_load().unwrap();
    step(&mut accounts);
    backend.save(&accounts).unwrap();
}

#[rstest]
fn accounts_survive_across_runs(scratch: ScratchDir) {
    let backend = JsonStore::new(scratch.0.join("accounts.json"));

    session(&backend, |accounts| {
        accounts.open_account("Alice").unwrap();
        accounts.open_account("Bob").unwrap();
    });
    session(&backend, |accounts| {
        assert_eq!(accounts.apply("Alice", |ledger| ledger.deposit(100.0)), Ok(100.0));
    });
    session(&backend, |accounts| {
        accounts.transfer("Alice", "Bob", 40.0).unwrap();
    });
    session(&backend, |accounts| {
        accounts.apply("Bob", |ledger| ledger.accrue_interest(5.0)).unwrap();
        accounts.rename_account("Bob", "Robert").unwrap();
    });

    let accounts = backend.try_load().unwrap();
    assert_eq!(accounts.names().collect::<Vec<_>>(), vec!["Alice", "Robert"]);

    let alice = accounts.ledger("Alice").unwrap();
    assert_eq!(alice.balance(), 60.0);
    let kinds: Vec<_> = alice.history().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::TransferOut]);

    let robert = accounts.ledger("Robert").unwrap();
    assert_eq!(robert.name(), "Robert");
    assert_eq!(robert.balance(), 42.0);
    assert_eq!(robert.history()[0].amount, 40.0);
    assert_eq!(robert.history()[1].kind, TransactionKind::Interest);
    assert_eq!(robert.history()[1].amount, 2.0);
}

#[rstest]
fn failed_steps_leave_file_untouched(scratch: ScratchDir) {
    let path = scratch.0.join("accounts.json");
    let backend = JsonStore::new(&path);
    session(&backend, |accounts| {
        let mut alice = accounts.open_account("Alice").unwrap();
        alice.deposit(100.0).unwrap();
        accounts.upsert(&alice);
        accounts.open_account("Bob").unwrap();
    });
    let before = fs::read(&path).unwrap();

    session(&backend, |accounts| {
        assert!(matches!(accounts.apply("Alice", |l| l.withdraw(150.0)),
            Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(accounts.transfer("Alice", "Alice", 10.0), Err(LedgerError::SelfTransfer));
        assert_eq!(accounts.rename_account("Alice", "Bob"), Err(LedgerError::NameTaken("Bob".into())));
        assert_eq!(accounts.apply("Alice", |l| l.deposit(-5.0)), Err(LedgerError::InvalidAmount(-5.0)));
    });

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[rstest]
fn closing_removes_account_from_file(scratch: ScratchDir) {
    let backend = JsonStore::new(scratch.0.join("accounts.json"));
    session(&backend, |accounts| {
        accounts.open_account("Alice").unwrap();
        accounts.open_account("Bob").unwrap();
    });
    session(&backend, |accounts| {
        accounts.close_account("Alice").unwrap();
    });

    let accounts = backend.load();
    assert!(!accounts.contains("Alice"));
    assert!(accounts.contains("Bob"));
}

#[rstest]
fn corrupt_store_reads_as_empty(scratch: ScratchDir) {
    let path = scratch.0.join("accounts.json");
    fs::write(&path, "{\"Alice\": {\"balance\": ").unwrap();
    let backend = JsonStore::new(&path);

    assert!(backend.load().is_empty());
    assert!(backend.try_load().is_err());
}
