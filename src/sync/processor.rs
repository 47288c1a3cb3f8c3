use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    config::LedgerConfig,
    error::Result,
    extract::{PrizeAggregator, PrizeRecord},
    ledger::{LedgerUpdater, RecencyLedger},
    source::{LogicalDate, PdfDecoder, TimeSlot},
    storage::Database,
};

/// What one time slot produced.
#[derive(Debug, Clone)]
pub struct SlotOutcome {
    pub slot: String,
    pub date: LogicalDate,
    pub record: PrizeRecord,
}

impl SlotOutcome {
    /// False when the sheet decoded but no line matched a prize tier.
    pub fn matched(&self) -> bool {
        !self.record.is_empty()
    }
}

/// Decode, extract, persist and index one result sheet.
pub struct SlotProcessor<'a> {
    db: &'a Database,
    ledger: LedgerUpdater<'a, Database>,
}

impl<'a> SlotProcessor<'a> {
    pub fn new(db: &'a Database, config: &LedgerConfig) -> Self {
        Self {
            db,
            ledger: LedgerUpdater::new(
                db,
                RecencyLedger::new(config.capacity),
                &config.document_id,
                &config.field,
            ),
        }
    }

    pub fn process_pdf(&self, slot: &TimeSlot, date: &LogicalDate, bytes: &[u8]) -> Result<SlotOutcome> {
        let text = PdfDecoder::decode(bytes)?;
        self.process_text(slot, date, &text, Utc::now())
    }

    /// Nothing is written unless the text has content. The record is saved
    /// before the ledger is touched.
    pub fn process_text(
        &self,
        slot: &TimeSlot,
        date: &LogicalDate,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<SlotOutcome> {
        let text = PdfDecoder::ensure_text(text.to_string(), &slot.file_name(date))?;

        let record = PrizeAggregator::extract(&text);
        if record.is_empty() {
            warn!(
                "No prize lines matched in {} ({} chars), saving empty record",
                slot.file_name(date),
                text.len()
            );
        }

        self.db.save_result(date, &slot.label, &record.render())?;
        info!("Saved {} results for {}", slot.label, date);

        self.ledger.record(date, now)?;

        Ok(SlotOutcome {
            slot: slot.label.clone(),
            date: *date,
            record,
        })
    }
}
