use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::{Result, SyncError},
    source::types::TimeSlot,
    sync::schedule::Schedule,
};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub schedule: ScheduleConfig,
    pub ledger: LedgerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub slots: Vec<SlotConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SlotConfig {
    pub prefix: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval_minutes: u32,
    /// Days between the run and the logical date it processes.
    pub date_offset_days: i64,
    pub windows: Vec<WindowConfig>,
    pub minute_from: u32,
    pub minute_until: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LedgerConfig {
    pub document_id: String,
    pub field: String,
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.lotterysambad.com/fetchtoday.php".to_string(),
            timeout_secs: 30,
            slots: vec![
                SlotConfig { prefix: "MD".to_string(), label: "1pm".to_string() },
                SlotConfig { prefix: "DD".to_string(), label: "6pm".to_string() },
                SlotConfig { prefix: "ED".to_string(), label: "8pm".to_string() },
            ],
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 10,
            date_offset_days: 1,
            windows: vec![
                WindowConfig { start_hour: 12, end_hour: 13 },
                WindowConfig { start_hour: 17, end_hour: 20 },
            ],
            minute_from: 45,
            minute_until: 10,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            document_id: "home".to_string(),
            field: "home_date1".to_string(),
            capacity: crate::ledger::DEFAULT_CAPACITY,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "sambad.db".to_string(),
        }
    }
}

impl Config {
    /// Layer the config file (optional) under `SAMBAD__*` environment variables.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SAMBAD").separator("__"))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.slots.is_empty() {
            return Err(SyncError::Config("source.slots must not be empty".to_string()));
        }
        if self.ledger.capacity == 0 {
            return Err(SyncError::Config("ledger.capacity must be at least 1".to_string()));
        }
        if self.schedule.interval_minutes == 0 {
            return Err(SyncError::Config("schedule.interval_minutes must be at least 1".to_string()));
        }
        for window in &self.schedule.windows {
            if window.start_hour > window.end_hour || window.end_hour >= 24 {
                return Err(SyncError::Config(format!(
                    "invalid schedule window {}-{}",
                    window.start_hour, window.end_hour
                )));
            }
        }
        if self.schedule.minute_from >= 60 || self.schedule.minute_until > 60 {
            return Err(SyncError::Config("schedule minutes must be within 0-59".to_string()));
        }
        Ok(())
    }

    pub fn slots(&self) -> Vec<TimeSlot> {
        self.source
            .slots
            .iter()
            .map(|slot| TimeSlot::new(&slot.prefix, &slot.label))
            .collect()
    }

    pub fn schedule(&self) -> Schedule {
        Schedule::new(
            self.schedule
                .windows
                .iter()
                .map(|w| (w.start_hour, w.end_hour))
                .collect(),
            self.schedule.minute_from,
            self.schedule.minute_until,
            self.schedule.interval_minutes,
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }
}
