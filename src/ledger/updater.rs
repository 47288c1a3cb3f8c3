use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::Result,
    ledger::merge::{DateEntry, RecencyLedger},
    source::types::LogicalDate,
    storage::{
        models::LEDGER_COLLECTION,
        store::{DocumentStore, Fields, WriteMode},
    },
};

/// Read-modify-write of the recency ledger through a [`DocumentStore`].
pub struct LedgerUpdater<'a, S: DocumentStore> {
    store: &'a S,
    ledger: RecencyLedger,
    document_id: String,
    field: String,
}

impl<'a, S: DocumentStore> LedgerUpdater<'a, S> {
    pub fn new(store: &'a S, ledger: RecencyLedger, document_id: &str, field: &str) -> Self {
        Self {
            store,
            ledger,
            document_id: document_id.to_string(),
            field: field.to_string(),
        }
    }

    /// Stored entries; a missing document or field is an empty ledger.
    pub fn load(&self) -> Result<Vec<DateEntry>> {
        let document = self.store.read_document(LEDGER_COLLECTION, &self.document_id)?;

        match document.and_then(|mut fields| fields.remove(&self.field)) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => {
                debug!(
                    "No ledger stored at {}/{}.{}, starting empty",
                    LEDGER_COLLECTION, self.document_id, self.field
                );
                Ok(Vec::new())
            }
        }
    }

    /// Merge `date` into the stored ledger and write the field back.
    pub fn record(&self, date: &LogicalDate, now: DateTime<Utc>) -> Result<Vec<DateEntry>> {
        let existing = self.load()?;
        let before = existing.len();
        let merged = self.ledger.merge(existing, &date.ledger_key(), now);

        let mut fields = Fields::new();
        fields.insert(self.field.clone(), serde_json::to_value(&merged)?);
        self.store
            .write_document(LEDGER_COLLECTION, &self.document_id, fields, WriteMode::Merge)?;

        info!(
            "Ledger updated for {} ({} -> {} entries)",
            date,
            before,
            merged.len()
        );
        Ok(merged)
    }
}
