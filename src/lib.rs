pub mod config;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod source;
pub mod storage;
pub mod sync;
pub mod utils;

pub use config::Config;
pub use error::{Result, SyncError};
