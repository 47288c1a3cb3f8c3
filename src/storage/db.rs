use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, SyncError},
    extract::RECORD_FIELDS,
    source::types::LogicalDate,
    storage::{
        models::{DatabaseStats, SlotResult, StoredDocument, RESULTS_COLLECTION},
        store::{DocumentStore, Fields, WriteMode},
    },
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_updated ON documents(collection, updated_at)",
            [],
        )?;

        Ok(())
    }

    fn parse_body(body: &str) -> Result<Fields> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(fields) => Ok(fields),
            other => Err(SyncError::Other(anyhow::anyhow!(
                "stored document is not an object: {}",
                other
            ))),
        }
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
        raw.parse()
            .map_err(|e| SyncError::Other(anyhow::anyhow!("bad timestamp {}: {}", raw, e)))
    }

    /// Store the rendered prizes of one slot, leaving other slots of the date intact.
    pub fn save_result(
        &self,
        date: &LogicalDate,
        slot: &str,
        prizes: &[String; RECORD_FIELDS],
    ) -> Result<()> {
        let mut fields = Fields::new();
        fields.insert(slot.to_string(), serde_json::to_value(prizes)?);
        self.write_document(RESULTS_COLLECTION, &date.ledger_key(), fields, WriteMode::Merge)
    }

    pub fn get_results(&self, date: &LogicalDate) -> Result<Vec<SlotResult>> {
        let key = date.ledger_key();
        let Some(fields) = self.read_document(RESULTS_COLLECTION, &key)? else {
            return Ok(Vec::new());
        };

        let mut results = Vec::with_capacity(fields.len());
        for (slot, value) in fields {
            results.push(SlotResult {
                date: key.clone(),
                slot,
                prizes: serde_json::from_value(value)?,
            });
        }
        Ok(results)
    }

    /// Documents of a collection, most recently written first.
    pub fn list_documents(&self, collection: &str, limit: Option<usize>) -> Result<Vec<StoredDocument>> {
        let mut stmt = self.conn.prepare(
            "SELECT collection, id, updated_at
             FROM documents
             WHERE collection = ?1
             ORDER BY updated_at DESC
             LIMIT ?2",
        )?;

        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = stmt
            .query_map(params![collection, limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(collection, id, updated_at)| {
                Ok(StoredDocument {
                    collection,
                    id,
                    updated_at: Self::parse_timestamp(&updated_at)?,
                })
            })
            .collect()
    }

    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let mut stmt = self
            .conn
            .prepare("SELECT body, updated_at FROM documents WHERE collection = ?1")?;

        let rows = stmt
            .query_map([RESULTS_COLLECTION], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stats = DatabaseStats::default();
        for (body, updated_at) in rows {
            stats.result_dates += 1;
            stats.slot_results += Self::parse_body(&body)?.len();

            let updated_at = Self::parse_timestamp(&updated_at)?;
            if stats.last_updated.map_or(true, |last| updated_at > last) {
                stats.last_updated = Some(updated_at);
            }
        }

        Ok(stats)
    }
}

impl DocumentStore for Database {
    fn read_document(&self, collection: &str, id: &str) -> Result<Option<Fields>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|b| Self::parse_body(&b)).transpose()
    }

    fn write_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        let body = match mode {
            WriteMode::Replace => fields,
            WriteMode::Merge => {
                let existing: Option<String> = tx
                    .query_row(
                        "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                        params![collection, id],
                        |row| row.get(0),
                    )
                    .optional()?;

                let mut merged = match existing {
                    Some(body) => Self::parse_body(&body)?,
                    None => Fields::new(),
                };
                merged.extend(fields);
                merged
            }
        };

        tx.execute(
            "INSERT INTO documents (collection, id, body, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection, id) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at",
            params![
                collection,
                id,
                Value::Object(body).to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;

        debug!("Wrote {}/{} ({:?})", collection, id, mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn prizes(first: &str) -> [String; RECORD_FIELDS] {
        [
            first.to_string(),
            "67890".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]
    }

    #[test]
    fn test_missing_document_reads_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.read_document("HomeData", "home").unwrap().is_none());
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let db = Database::in_memory().unwrap();
        db.write_document("Results", "05-11-24", fields(json!({"1pm": ["a"]})), WriteMode::Merge)
            .unwrap();
        db.write_document("Results", "05-11-24", fields(json!({"6pm": ["b"]})), WriteMode::Merge)
            .unwrap();

        let stored = db.read_document("Results", "05-11-24").unwrap().unwrap();
        assert_eq!(stored.get("1pm"), Some(&json!(["a"])));
        assert_eq!(stored.get("6pm"), Some(&json!(["b"])));
    }

    #[test]
    fn test_replace_drops_other_fields() {
        let db = Database::in_memory().unwrap();
        db.write_document("HomeData", "home", fields(json!({"a": 1, "b": 2})), WriteMode::Merge)
            .unwrap();
        db.write_document("HomeData", "home", fields(json!({"b": 3})), WriteMode::Replace)
            .unwrap();

        let stored = db.read_document("HomeData", "home").unwrap().unwrap();
        assert_eq!(Value::Object(stored), json!({"b": 3}));
    }

    #[test]
    fn test_save_and_get_results_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.db");
        let date: LogicalDate = "05-11-24".parse().unwrap();

        {
            let db = Database::new(path.to_str().unwrap()).unwrap();
            db.save_result(&date, "1pm", &prizes("12A 12345")).unwrap();
            db.save_result(&date, "8pm", &prizes("34B 54321")).unwrap();
            db.save_result(&date, "1pm", &prizes("56C 11111")).unwrap();
        }

        let db = Database::new(path.to_str().unwrap()).unwrap();
        let mut results = db.get_results(&date).unwrap();
        results.sort_by(|a, b| a.slot.cmp(&b.slot));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].slot, "1pm");
        assert_eq!(results[0].prizes[0], "56C 11111");
        assert_eq!(results[1].slot, "8pm");
        assert_eq!(results[1].date, "05-11-24");
    }

    #[test]
    fn test_stats_and_listing() {
        let db = Database::in_memory().unwrap();
        let first: LogicalDate = "04-11-24".parse().unwrap();
        let second: LogicalDate = "05-11-24".parse().unwrap();
        db.save_result(&first, "1pm", &prizes("12A 12345")).unwrap();
        db.save_result(&second, "1pm", &prizes("12A 12345")).unwrap();
        db.save_result(&second, "6pm", &prizes("12A 12345")).unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.result_dates, 2);
        assert_eq!(stats.slot_results, 3);
        assert!(stats.last_updated.is_some());

        let listed = db.list_documents(RESULTS_COLLECTION, Some(1)).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(db.list_documents(RESULTS_COLLECTION, None).unwrap().len() == 2);
        assert!(db.get_results(&"01-01-24".parse().unwrap()).unwrap().is_empty());
    }
}
