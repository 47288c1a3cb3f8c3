use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::RECORD_FIELDS;

/// Collection holding one document per logical date, one field per time slot.
pub const RESULTS_COLLECTION: &str = "Results";

/// Collection holding the recency ledger document.
pub const LEDGER_COLLECTION: &str = "HomeData";

/// Rendered prize fields saved for one time slot of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    pub date: String,
    pub slot: String,
    pub prizes: [String; RECORD_FIELDS],
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub collection: String,
    pub id: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseStats {
    pub result_dates: usize,
    pub slot_results: usize,
    pub last_updated: Option<DateTime<Utc>>,
}
