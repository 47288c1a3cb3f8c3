use serde_json::{Map, Value};

use crate::error::Result;

/// Top-level fields of a stored document.
pub type Fields = Map<String, Value>;

/// How a write combines with an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Upsert the given top-level fields, keep the rest.
    Merge,
    /// Replace the whole document.
    Replace,
}

/// Keyed document store used by the sync pipeline and the ledger.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore {
    fn read_document(&self, collection: &str, id: &str) -> Result<Option<Fields>>;

    fn write_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<()>;
}
