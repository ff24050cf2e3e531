use piggybank::{AccountStore, Amount, Ledger, parse_amount,
    backend::{StoreBackend, JsonStore},
    config::AppConfig};

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{bail, Context};
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Configuration file (piggybank.toml is used when present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Accounts file, overrides the configured one
    #[clap(short, long, value_parser)]
    store: Option<PathBuf>,

    /// Start from an empty store when the accounts file cannot be parsed
    #[clap(long)]
    reset_corrupt: bool,

    /// Name of the account to operate on
    #[clap(value_parser)]
    account: String,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Open a new account with zero balance
    Open,
    /// Display the current balance
    Balance,
    /// Add money to the account
    Deposit(AmountArg),
    /// Take money out of the account
    Withdraw(AmountArg),
    /// Add interest at a percentage rate
    Interest(RateArg),
    /// Move money to another account
    Transfer(TransferArgs),
    /// Change the account name
    Rename(RenameArgs),
    /// List all transactions, oldest first
    History,
    /// Close the account for good
    Close(CloseArgs)
}

#[derive(Args, Debug)]
struct AmountArg {
    #[clap(value_parser, allow_hyphen_values = true)]
    amount: String
}

#[derive(Args, Debug)]
struct RateArg {
    /// Interest rate in percent, may be negative
    #[clap(value_parser, allow_hyphen_values = true)]
    rate: String
}

#[derive(Args, Debug)]
struct TransferArgs {
    /// Name of the account that gets paid
    #[clap(short='t', long, value_parser)]
    to: String,

    #[clap(value_parser, allow_hyphen_values = true)]
    amount: String
}

#[derive(Args, Debug)]
struct RenameArgs {
    #[clap(value_parser)]
    new_name: String
}

#[derive(Args, Debug)]
struct CloseArgs {
    /// Confirm closing; this cannot be undone
    #[clap(long)]
    yes: bool
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fmt_amount(amount: Amount) -> colored::ColoredString {
    let text = format!("${:.2}", amount);
    if amount < 0.0 {
        text.bright_red()
    } else {
        text.green()
    }
}

fn print_history(ledger: &Ledger) {
    if ledger.history().is_empty() {
        println!("No transactions available.");
        return;
    }
    println!("{}", "Transaction History:".bold());
    for record in ledger.history() {
        println!("{}", record);
    }
}

fn load_accounts(backend: &JsonStore, strict: bool) -> anyhow::Result<AccountStore> {
    if !strict {
        return Ok(backend.load());
    }
    backend.try_load().with_context(|| format!(
        "cannot use accounts file {} (pass --reset-corrupt to start over)",
        backend.path().display()))
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = AppConfig::discover(args.config.as_deref())?;
    let backend = JsonStore::new(args.store.unwrap_or(config.store));
    let mut accounts = load_accounts(&backend, config.strict_load && !args.reset_corrupt)?;
    let name = args.account;

    let save = |accounts: &AccountStore| backend.save(accounts)
        .with_context(|| format!("failed to save accounts to {}", backend.path().display()));

    match args.action {
        Subcommands::Open => {
            accounts.open_account(&name)?;
            save(&accounts)?;
            println!("Welcome, {}. Your account has been created.", name);
        },
        Subcommands::Balance => {
            let ledger = accounts.ledger(&name)?;
            println!("{}'s bank account balance is {}", ledger.name(), fmt_amount(ledger.balance()));
        },
        Subcommands::Deposit(arg) => {
            let amount = parse_amount(&arg.amount)?;
            let balance = accounts.apply(&name, |ledger| ledger.deposit(amount))?;
            save(&accounts)?;
            println!("Your new balance is {}", fmt_amount(balance));
        },
        Subcommands::Withdraw(arg) => {
            let amount = parse_amount(&arg.amount)?;
            let balance = accounts.apply(&name, |ledger| ledger.withdraw(amount))?;
            save(&accounts)?;
            println!("Your new balance is {}", fmt_amount(balance));
        },
        Subcommands::Interest(arg) => {
            let rate = parse_amount(&arg.rate)?;
            let (interest, balance) = accounts.apply(&name, |ledger| {
                let interest = ledger.accrue_interest(rate)?;
                Ok((interest, ledger.balance()))
            })?;
            save(&accounts)?;
            println!("Interest of {} added at {}% rate. Your new balance is {}",
                fmt_amount(interest), rate, fmt_amount(balance));
        },
        Subcommands::Transfer(arg) => {
            let amount = parse_amount(&arg.amount)?;
            let (source, target) = accounts.transfer(&name, &arg.to, amount)?;
            save(&accounts)?;
            println!("Transferred {} to {}. Your new balance is {}",
                fmt_amount(amount), target.name(), fmt_amount(source.balance()));
        },
        Subcommands::Rename(arg) => {
            let ledger = accounts.rename_account(&name, &arg.new_name)?;
            save(&accounts)?;
            println!("Your account name has been changed to {}.", ledger.name());
        },
        Subcommands::History => {
            print_history(&accounts.ledger(&name)?);
        },
        Subcommands::Close(arg) => {
            if !arg.yes {
                bail!("closing '{}' cannot be undone, pass --yes to confirm", name);
            }
            let closed = accounts.close_account(&name)?;
            save(&accounts)?;
            println!("Your account has been closed. Thank you for banking with us, {}.", closed.name());
            println!("Your final account balance is {}", fmt_amount(closed.balance()));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
