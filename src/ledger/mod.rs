pub mod merge;
pub mod updater;

pub use merge::{DateEntry, RecencyLedger, DEFAULT_CAPACITY};
pub use updater::LedgerUpdater;
