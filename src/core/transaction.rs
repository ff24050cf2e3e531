use std::fmt;

use chrono::{Local, NaiveDateTime, SubsecRound};
use colored::Colorize;
use serde::{Serialize, Serializer, Deserialize, Deserializer};

use crate::core::error::{LedgerError, LedgerResult};

pub type Amount = f64;

/// Parses a user supplied amount, rejecting anything that is not a finite number.
pub fn parse_amount(input: &str) -> LedgerResult<Amount> {
    let trimmed = input.trim();
    match trimmed.parse::<Amount>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LedgerError::MalformedInput(trimmed.to_owned()))
    }
}

pub(crate) fn check_finite(value: Amount) -> LedgerResult<Amount> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LedgerError::MalformedInput(value.to_string()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Interest,
    #[serde(rename = "Transfer Out")]
    TransferOut,
    #[serde(rename = "Transfer In")]
    TransferIn
}

impl TransactionKind {
    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Withdrawal | Self::TransferOut)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Interest => "Interest",
            Self::TransferOut => "Transfer Out",
            Self::TransferIn => "Transfer In"
        };
        write!(f, "{}", disp)
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}

/// On-disk shape of a record: `[timestamp, kind, amount]`.
#[derive(Serialize, Deserialize)]
struct RecordRow(
    #[serde(with = "timestamp_format")] NaiveDateTime,
    TransactionKind,
    Amount
);

/// One immutable entry of an account's history.
/// `amount` is signed: outflows are stored negated.
#[derive(Clone, PartialEq, Debug)]
pub struct TransactionRecord {
    pub timestamp: NaiveDateTime,
    pub kind: TransactionKind,
    pub amount: Amount
}

impl Serialize for TransactionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordRow(self.timestamp, self.kind, self.amount).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TransactionRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RecordRow(timestamp, kind, amount) = RecordRow::deserialize(deserializer)?;
        Ok(TransactionRecord { timestamp, kind, amount })
    }
}

impl TransactionRecord {
    /// Builds a record from an unsigned movement, negating it for outflow kinds.
    pub fn new(kind: TransactionKind, amount: Amount, timestamp: NaiveDateTime) -> TransactionRecord {
        let amount = if kind.is_outflow() { -amount } else { amount };
        TransactionRecord { timestamp, kind, amount }
    }

    pub(crate) fn now(kind: TransactionKind, amount: Amount) -> TransactionRecord {
        let timestamp = Local::now().naive_local().trunc_subsecs(0);
        TransactionRecord::new(kind, amount, timestamp)
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = format!("${:.2}", self.amount);
        let amount = if self.amount < 0.0 { amount.red() } else { amount.green() };
        write!(f, "{}: {} of {}",
            self.timestamp.format(timestamp_format::FORMAT), self.kind.to_string().bold(), amount)
    }
}
