use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SyncError;

/// Date a result sheet belongs to, independent of when it is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalDate(NaiveDate);

impl LogicalDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The date `offset_days` before `today`.
    pub fn from_offset(today: NaiveDate, offset_days: i64) -> Result<Self, SyncError> {
        today
            .checked_sub_signed(Duration::days(offset_days))
            .map(Self)
            .ok_or_else(|| SyncError::InvalidDate(format!("{} minus {} days", today, offset_days)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `DD-MM-YY`, used as document id and ledger key.
    pub fn ledger_key(&self) -> String {
        self.0.format("%d-%m-%y").to_string()
    }

    /// `DDMMYY`, used in published file names.
    pub fn file_stamp(&self) -> String {
        self.0.format("%d%m%y").to_string()
    }
}

impl FromStr for LogicalDate {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%d-%m-%y")
            .map(Self)
            .map_err(|e| SyncError::InvalidDate(format!("{} (expected DD-MM-YY): {}", s, e)))
    }
}

impl std::fmt::Display for LogicalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ledger_key())
    }
}

/// A daily draw: file-name prefix plus the label results are stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub prefix: String,
    pub label: String,
}

impl TimeSlot {
    pub fn new(prefix: &str, label: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            label: label.to_string(),
        }
    }

    pub fn file_name(&self, date: &LogicalDate) -> String {
        format!("{}{}.PDF", self.prefix, date.file_stamp())
    }

    pub fn document_url(&self, base_url: &str, date: &LogicalDate) -> String {
        format!("{}?filename={}", base_url, self.file_name(date))
    }
}
