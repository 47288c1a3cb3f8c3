use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default number of dates the ledger keeps.
pub const DEFAULT_CAPACITY: usize = 15;

/// One processed logical date, keyed by its `DD-MM-YY` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date: String,
    pub timestamp: DateTime<Utc>,
}

impl DateEntry {
    pub fn new(date: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            date: date.into(),
            timestamp,
        }
    }
}

/// Bounded, deduplicated index of recently processed dates.
#[derive(Debug, Clone, Copy)]
pub struct RecencyLedger {
    capacity: usize,
}

impl Default for RecencyLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecencyLedger {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Merge `candidate` into `existing` and return the replacement ledger.
    ///
    /// The candidate is appended only when its date is absent. Duplicate
    /// dates collapse to the last entry seen, holding the slot of the first
    /// occurrence. The result is sorted newest first and truncated to
    /// capacity, so the cap only applies after duplicates are resolved.
    pub fn merge(
        &self,
        existing: Vec<DateEntry>,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> Vec<DateEntry> {
        let mut working = existing;
        if !working.iter().any(|entry| entry.date == candidate) {
            working.push(DateEntry::new(candidate, now));
        }

        let mut unique: Vec<DateEntry> = Vec::with_capacity(working.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for entry in working {
            match positions.get(&entry.date) {
                Some(&index) => unique[index] = entry,
                None => {
                    positions.insert(entry.date.clone(), unique.len());
                    unique.push(entry);
                }
            }
        }

        // Stable: equal timestamps keep their collapsed order.
        unique.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        unique.truncate(self.capacity);
        unique
    }
}
