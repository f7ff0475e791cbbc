//! Watchlist — per-ticker target specifications.
//!
//! A watchlist row is a ticker followed by any number of target tokens:
//!
//! ```csv
//! AAPL,>150,<100+
//! TSLA,<180
//! ```
//!
//! Target grammar (after trimming): an optional trailing `+` marks the rule
//! deferred, then `>` (above) or `<` (below), then a non-negative decimal.
//! Blank tokens are skipped so trailing commas in source rows are harmless.

use crate::domain::{Direction, ThresholdRule};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured error types for watchlist loading and target parsing.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("failed to read watchlist {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed watchlist row: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid target format '{raw}' for {ticker}: use >price for above alerts or <price for below alerts")]
    BadTarget { ticker: String, raw: String },
}

/// One watchlist row: a ticker and its threshold rules, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub ticker: String,
    pub rules: Vec<ThresholdRule>,
}

/// Mapping from ticker to threshold rules, preserving source row order.
///
/// Built fresh each run from external configuration; never persisted.
/// Tickers are unique: a later row for the same ticker replaces the
/// earlier row's rules (the row keeps its original position).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    /// Build a watchlist from already-read records of raw target strings.
    pub fn parse_records<'a, I, T>(records: I) -> Result<Self, WatchlistError>
    where
        I: IntoIterator<Item = (&'a str, T)>,
        T: IntoIterator<Item = &'a str>,
    {
        let mut list = Watchlist::default();
        for (ticker, raw_targets) in records {
            let rules = parse_targets(ticker, raw_targets)?;
            list.insert(ticker, rules);
        }
        Ok(list)
    }

    /// Insert or replace the rules for a ticker.
    fn insert(&mut self, ticker: &str, rules: Vec<ThresholdRule>) {
        match self.entries.iter_mut().find(|e| e.ticker == ticker) {
            Some(entry) => entry.rules = rules,
            None => self.entries.push(WatchlistEntry {
                ticker: ticker.to_string(),
                rules,
            }),
        }
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn ticker_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rules across all tickers.
    pub fn rule_count(&self) -> usize {
        self.entries.iter().map(|e| e.rules.len()).sum()
    }
}

/// Parse the raw target tokens for one ticker into threshold rules.
///
/// Pure function; token order is preserved. Blank tokens produce no rule,
/// any other token that does not match the grammar fails the whole parse.
pub fn parse_targets<'a, I>(ticker: &str, raw_targets: I) -> Result<Vec<ThresholdRule>, WatchlistError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rules = Vec::new();
    for raw in raw_targets {
        if let Some(rule) = parse_target(ticker, raw)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}

/// Parse a single target token. `Ok(None)` means the token was blank.
fn parse_target(ticker: &str, raw: &str) -> Result<Option<ThresholdRule>, WatchlistError> {
    let token = raw.trim();
    if token.is_empty() {
        return Ok(None);
    }

    let bad = || WatchlistError::BadTarget {
        ticker: ticker.to_string(),
        raw: token.to_string(),
    };

    // Trailing '+' marks the rule deferred; strip it before the direction marker.
    let (body, deferred) = match token.strip_suffix('+') {
        Some(rest) => (rest, true),
        None => (token, false),
    };

    let (direction, number) = if let Some(rest) = body.strip_prefix('>') {
        (Direction::Above, rest)
    } else if let Some(rest) = body.strip_prefix('<') {
        (Direction::Below, rest)
    } else {
        return Err(bad());
    };

    let price: f64 = number.trim().parse().map_err(|_| bad())?;
    if !price.is_finite() || price < 0.0 {
        return Err(bad());
    }

    Ok(Some(ThresholdRule {
        direction,
        price,
        deferred,
    }))
}

/// Load a watchlist from a headerless CSV file.
///
/// Row layout: `ticker,target1,target2,...`. Rows with a blank first cell
/// are skipped. Any malformed target aborts the load, so a run never starts
/// from a partially-parsed watchlist.
pub fn load_watchlist(path: &Path) -> Result<Watchlist, WatchlistError> {
    let file = File::open(path).map_err(|source| WatchlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_watchlist(file)
}

/// Parse watchlist CSV from any reader. Split out for tests.
pub fn read_watchlist<R: std::io::Read>(reader: R) -> Result<Watchlist, WatchlistError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut list = Watchlist::default();
    for record in csv_reader.records() {
        let record = record?;
        let ticker = match record.get(0).map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => continue,
        };
        let rules = parse_targets(&ticker, record.iter().skip(1))?;
        list.insert(&ticker, rules);
    }
    Ok(list)
}
