//! PriceWatch CLI — watchlist checking and snapshot inspection commands.
//!
//! Commands:
//! - `check` — one end-to-end pass: fetch prices, fire new alerts, persist
//! - `validate` — parse the watchlist and print the rule table
//! - `status` — print the persisted alert snapshot

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use pricewatch_core::notify::{DesktopNotifier, NullNotifier};
use pricewatch_core::quotes::YahooQuoteProvider;
use pricewatch_core::snapshot::SnapshotStore;
use pricewatch_core::watchlist::load_watchlist;
use pricewatch_runner::{run_check, NotifierKind, RunConfig, RunReport};

#[derive(Parser)]
#[command(
    name = "pricewatch",
    about = "PriceWatch CLI — price threshold alerts for a ticker watchlist"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check pass: fetch prices, notify new alerts, persist the snapshot.
    Check {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Watchlist CSV path. Overrides the config file.
        #[arg(long)]
        watchlist: Option<PathBuf>,

        /// Snapshot JSON path. Overrides the config file.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Notification sink. Overrides the config file.
        #[arg(long, value_enum)]
        notifier: Option<NotifierArg>,
    },
    /// Parse the watchlist and print the configured rules.
    Validate {
        /// Watchlist CSV path.
        #[arg(long, default_value = "watchlist.csv")]
        watchlist: PathBuf,
    },
    /// Print the persisted alert snapshot.
    Status {
        /// Snapshot JSON path.
        #[arg(long, default_value = "previous_alerts.json")]
        snapshot: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NotifierArg {
    Desktop,
    None,
}

impl From<NotifierArg> for NotifierKind {
    fn from(arg: NotifierArg) -> Self {
        match arg {
            NotifierArg::Desktop => NotifierKind::Desktop,
            NotifierArg::None => NotifierKind::None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            config,
            watchlist,
            snapshot,
            notifier,
        } => run_check_cmd(config, watchlist, snapshot, notifier),
        Commands::Validate { watchlist } => run_validate(&watchlist),
        Commands::Status { snapshot } => run_status(&snapshot),
    }
}

fn run_check_cmd(
    config_path: Option<PathBuf>,
    watchlist_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    notifier: Option<NotifierArg>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };
    if let Some(path) = watchlist_path {
        config.watchlist_path = path;
    }
    if let Some(path) = snapshot_path {
        config.snapshot_path = path;
    }
    if let Some(kind) = notifier {
        config.notifier = kind.into();
    }

    let list = load_watchlist(&config.watchlist_path)
        .with_context(|| format!("loading watchlist {}", config.watchlist_path.display()))?;

    let provider = YahooQuoteProvider::new(config.quote_timeout());
    let store = SnapshotStore::new(&config.snapshot_path);

    let report = match config.notifier {
        NotifierKind::Desktop => {
            let notifier = DesktopNotifier::new(config.notify_timeout());
            run_check(&list, &provider, &notifier, &store)?
        }
        NotifierKind::None => run_check(&list, &provider, &NullNotifier, &store)?,
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    for failure in &report.quote_failures {
        eprintln!("No price for {}: {}", failure.ticker, failure.reason);
    }
    for failure in &report.notify_failures {
        eprintln!("Notification failed for {}: {}", failure.alert_id, failure.reason);
    }

    for alert in &report.new_alerts {
        println!("New price alert: {}", alert.message);
    }

    if report.nothing_active() {
        println!("No active alerts.");
    } else if report.new_alerts.is_empty() {
        println!("Monitoring {} active alerts...", report.active_alerts);
    }
}

fn run_validate(watchlist_path: &Path) -> Result<()> {
    let list = load_watchlist(watchlist_path)
        .with_context(|| format!("loading watchlist {}", watchlist_path.display()))?;

    if list.is_empty() {
        println!("Watchlist is empty: {}", watchlist_path.display());
        return Ok(());
    }

    println!(
        "Watchlist OK: {} ticker(s), {} rule(s)",
        list.ticker_count(),
        list.rule_count()
    );
    println!();
    println!("{:<8} {:<8} {:>12}  {}", "Ticker", "Fires", "Target", "Deferred");
    println!("{}", "-".repeat(42));
    for entry in list.entries() {
        for rule in &entry.rules {
            println!(
                "{:<8} {:<8} {:>12.2}  {}",
                entry.ticker,
                rule.direction.as_str(),
                rule.price,
                if rule.deferred { "yes" } else { "" }
            );
        }
    }

    Ok(())
}

fn run_status(snapshot_path: &Path) -> Result<()> {
    let store = SnapshotStore::new(snapshot_path);
    let snapshot = store.load()?;

    if snapshot.is_empty() {
        println!("No active alerts.");
        return Ok(());
    }

    println!("{} active alert(s):", snapshot.len());
    for alert in snapshot.values() {
        println!(
            "  {}  (first fired {})",
            alert.message,
            alert.timestamp.format("%Y-%m-%d %H:%M UTC")
        );
    }

    Ok(())
}
