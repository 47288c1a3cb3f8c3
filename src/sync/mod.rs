pub mod batch;
pub mod processor;
pub mod schedule;

pub use batch::{SyncRunner, SyncSummary};
pub use processor::{SlotOutcome, SlotProcessor};
pub use schedule::Schedule;
