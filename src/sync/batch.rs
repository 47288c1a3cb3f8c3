use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{Result, SyncError},
    source::{DocumentFetcher, LogicalDate, TimeSlot},
    storage::Database,
    sync::processor::{SlotOutcome, SlotProcessor},
};

/// Runs every configured time slot for one logical date.
pub struct SyncRunner {
    config: Config,
}

impl SyncRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Slots to run; `only` restricts to one label.
    pub fn select_slots(&self, only: Option<&str>) -> Result<Vec<TimeSlot>> {
        let slots: Vec<TimeSlot> = self
            .config
            .slots()
            .into_iter()
            .filter(|slot| only.map_or(true, |label| slot.label == label))
            .collect();

        if slots.is_empty() {
            return Err(SyncError::Config(format!(
                "unknown time slot: {}",
                only.unwrap_or_default()
            )));
        }
        Ok(slots)
    }

    pub async fn run(&self, date: LogicalDate, only: Option<&str>) -> Result<SyncSummary> {
        let fetcher = DocumentFetcher::new(&self.config.source.base_url, self.config.timeout())?;
        let db = Database::new(&self.config.database.path)?;
        self.run_with(&fetcher, &db, date, only).await
    }

    /// Downloads run concurrently; processing is sequential so ledger
    /// updates never interleave.
    pub async fn run_with(
        &self,
        fetcher: &DocumentFetcher,
        db: &Database,
        date: LogicalDate,
        only: Option<&str>,
    ) -> Result<SyncSummary> {
        let slots = self.select_slots(only)?;
        info!("Syncing {} slot(s) for {}", slots.len(), date);

        let downloads = join_all(slots.iter().map(|slot| fetcher.fetch(slot, &date))).await;

        let processor = SlotProcessor::new(db, &self.config.ledger);
        let progress = ProgressBar::new(slots.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{bar:20}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut summary = SyncSummary::new(date);
        for (slot, download) in slots.iter().zip(downloads) {
            progress.set_message(slot.label.clone());

            let result = download.and_then(|bytes| processor.process_pdf(slot, &date, &bytes));
            if let Err(e) = &result {
                warn!("Slot {} for {} failed: {}", slot.label, date, e);
            }
            summary.record(&slot.label, result);

            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Sync complete for {}: {} saved, {} empty, {} failed",
            date, summary.saved, summary.empty, summary.failed
        );
        Ok(summary)
    }
}

/// Per-date totals of a sync pass.
#[derive(Debug)]
pub struct SyncSummary {
    pub date: LogicalDate,
    pub total: usize,
    pub saved: usize,
    pub empty: usize,
    pub failed: usize,
    pub results: Vec<(String, Result<SlotOutcome>)>,
}

impl SyncSummary {
    pub fn new(date: LogicalDate) -> Self {
        Self {
            date,
            total: 0,
            saved: 0,
            empty: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, slot: &str, result: Result<SlotOutcome>) {
        self.total += 1;
        match &result {
            Ok(outcome) => {
                self.saved += 1;
                if !outcome.matched() {
                    self.empty += 1;
                }
            }
            Err(_) => self.failed += 1,
        }
        self.results.push((slot.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!("\n{}", format!("=== Sync Summary {} ===", self.date).cyan().bold());
        println!("Slots:    {}", self.total);
        println!("Saved:    {} ✓", self.saved.to_string().green());
        println!("Empty:    {}", self.empty.to_string().yellow());
        println!("Failed:   {} ✗", self.failed.to_string().red());

        for (slot, result) in &self.results {
            match result {
                Ok(outcome) if outcome.matched() => {
                    println!("  {:<6} {}", slot, outcome.record.first_prize.green())
                }
                Ok(_) => println!("  {:<6} {}", slot, "no prize lines".yellow()),
                Err(e) => println!("  {:<6} {}", slot, e.to_string().red()),
            }
        }
    }

    /// Share of slots that were saved, as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.saved as f64 / self.total as f64) * 100.0
        }
    }
}
