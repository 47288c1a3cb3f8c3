pub mod db;
pub mod models;
pub mod store;

pub use db::Database;
pub use models::{DatabaseStats, SlotResult, LEDGER_COLLECTION, RESULTS_COLLECTION};
pub use store::{DocumentStore, Fields, WriteMode};
