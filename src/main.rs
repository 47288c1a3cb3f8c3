mod cli;

use chrono::{Local, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use colored::*;
use sambad_sync::{
    config::Config,
    error::{self, SyncError},
    extract::PrizeAggregator,
    ledger::{LedgerUpdater, RecencyLedger},
    source::{LogicalDate, PdfDecoder},
    storage::{self, Database},
    sync::SyncRunner,
    utils,
};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sambad_sync=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run { date, slot } => {
            info!("Running one sync pass...");
            run_once(&config, date.as_deref(), slot.as_deref()).await
        }

        Commands::Auto => {
            info!("Starting scheduled sync service");
            run_auto_service(&config).await
        }

        Commands::Extract { file, format } => extract_file(&file, &format),

        Commands::Show { date, format } => show_results(&config, &date, &format),

        Commands::Dates { format } => show_dates(&config, &format),

        Commands::Stats { format } => {
            info!("Generating statistics...");
            show_stats(&config, &format)
        }

        Commands::Init => {
            info!("Initializing...");
            initialize(&config)
        }
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn default_date(config: &Config) -> error::Result<LogicalDate> {
    LogicalDate::from_offset(Local::now().date_naive(), config.schedule.date_offset_days)
}

fn ledger_updater<'a>(config: &Config, db: &'a Database) -> LedgerUpdater<'a, Database> {
    LedgerUpdater::new(
        db,
        RecencyLedger::new(config.ledger.capacity),
        &config.ledger.document_id,
        &config.ledger.field,
    )
}

async fn run_once(config: &Config, date: Option<&str>, slot: Option<&str>) -> error::Result<()> {
    let date: LogicalDate = match date {
        Some(raw) => raw.parse()?,
        None => default_date(config)?,
    };
    println!("{}", format!("Syncing results for {}...", date).cyan());

    let runner = SyncRunner::new(config.clone());
    let summary = runner.run(date, slot).await?;
    summary.print_summary();

    if summary.failed == summary.total {
        return Err(SyncError::Other(anyhow::anyhow!(
            "every slot failed for {}",
            date
        )));
    }
    Ok(())
}

async fn run_auto_service(config: &Config) -> error::Result<()> {
    let schedule = config.schedule();
    let runner = SyncRunner::new(config.clone());

    println!("{}", "Starting scheduled sync service...".green());
    println!("Interval:  {} minutes", config.schedule.interval_minutes);
    for window in &config.schedule.windows {
        println!("Window:    {:02}:00-{:02}:59", window.start_hour, window.end_hour);
    }

    loop {
        let now = Local::now().naive_local();
        let tick = schedule.next_tick(now);
        let wait = (tick - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if !schedule.is_due(tick.time()) {
            continue;
        }

        let date = match default_date(config) {
            Ok(date) => date,
            Err(e) => {
                error!("Failed to compute logical date: {}", e);
                continue;
            }
        };

        info!("Running sync cycle for {}...", date);
        match runner.run(date, None).await {
            Ok(summary) => {
                info!(
                    "Cycle complete: {} saved, {} empty, {} failed ({:.0}% success)",
                    summary.saved,
                    summary.empty,
                    summary.failed,
                    summary.success_rate()
                );
            }
            Err(e) => warn!("Sync cycle failed: {}", e),
        }
    }
}

fn extract_file(file: &str, format: &str) -> error::Result<()> {
    let text = PdfDecoder::decode_file(Path::new(file))?;
    let record = PrizeAggregator::extract(&text);
    if record.is_empty() {
        warn!("No prize lines matched in {}", file);
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", format!("=== Prizes in {} ===", file).cyan().bold());
    utils::print_prizes(&record.render());
    Ok(())
}

fn show_results(config: &Config, date: &str, format: &str) -> error::Result<()> {
    let date: LogicalDate = date.parse()?;
    let db = Database::new(&config.database.path)?;
    let results = db.get_results(&date)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", format!("No results stored for {}", date).yellow());
        return Ok(());
    }

    for result in &results {
        println!("\n{}", format!("=== {} {} ===", result.date, result.slot).cyan().bold());
        utils::print_prizes(&result.prizes);
    }
    Ok(())
}

fn show_dates(config: &Config, format: &str) -> error::Result<()> {
    let db = Database::new(&config.database.path)?;
    let entries = ledger_updater(config, &db).load()?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "=== Recent Dates ===".cyan().bold());
    if entries.is_empty() {
        println!("{}", "No dates recorded yet".yellow());
        return Ok(());
    }

    utils::print_table_border(40);
    utils::print_table_row(&["Date", "Recorded"], &[10, 24]);
    utils::print_table_border(40);
    for entry in &entries {
        utils::print_table_row(
            &[entry.date.as_str(), utils::format_timestamp(&entry.timestamp).as_str()],
            &[10, 24],
        );
    }
    utils::print_table_border(40);
    Ok(())
}

fn show_stats(config: &Config, format: &str) -> error::Result<()> {
    let db = Database::new(&config.database.path)?;
    let stats = db.get_stats()?;
    let ledger = ledger_updater(config, &db).load()?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "=== Sambad Sync Statistics ===".cyan().bold());
    println!("\nResults:");
    println!("  Dates:      {}", stats.result_dates);
    println!("  Slots:      {}", stats.slot_results.to_string().green());
    println!(
        "  Updated:    {}",
        stats
            .last_updated
            .as_ref()
            .map(utils::format_timestamp)
            .unwrap_or_else(|| "never".to_string())
    );
    println!("\nLedger:");
    println!("  Entries:    {}/{}", ledger.len(), config.ledger.capacity);

    let recent = db.list_documents(storage::RESULTS_COLLECTION, Some(5))?;
    if !recent.is_empty() {
        println!("\n{}", "Recently Written:".yellow());
        for doc in recent {
            println!("  {}  {}", doc.id, utils::format_timestamp(&doc.updated_at));
        }
    }
    Ok(())
}

fn initialize(config: &Config) -> error::Result<()> {
    println!("{}", "Initializing Sambad Sync...".green());
    let _db = Database::new(&config.database.path)?;
    println!("{}", "✓ Database initialized".green());
    println!("{}", "✓ Configuration loaded".green());

    println!("\n{}", "Configuration:".cyan());
    println!("  Source:         {}", config.source.base_url);
    for slot in config.slots() {
        println!("  Slot {:<6}     {}*.PDF", slot.label, slot.prefix);
    }
    println!("  Database:       {}", config.database.path);
    println!("  Ledger size:    {}", config.ledger.capacity);
    println!("  Date offset:    {} day(s)", config.schedule.date_offset_days);
    println!("  Now (UTC):      {}", utils::format_timestamp(&Utc::now()));

    println!("\n{}", "Ready to use! Try running:".cyan());
    println!("  {} to sync yesterday's results", "sambad-sync run".yellow());
    println!("  {} to start the scheduler", "sambad-sync auto".yellow());
    println!("  {} to list recent dates", "sambad-sync dates".yellow());
    Ok(())
}
