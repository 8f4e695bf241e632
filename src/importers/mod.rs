// Import module - brokerage activity and positions CSV parsers

pub mod activity_csv;
pub mod positions_csv;

use anyhow::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;
use std::path::Path;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::error::ReportError;

pub use activity_csv::{parse_activity_csv, ActionKind, TransactionRecord};
pub use positions_csv::{normalize_cash_sweep, parse_positions_csv, PositionRecord};

/// Cleaned inputs of one report run
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub transactions: Vec<TransactionRecord>,
    pub positions: Vec<PositionRecord>,
    /// Distinct month names of the kept activity rows, first-seen order
    pub months_used: Vec<String>,
    /// Distinct symbols of the kept activity rows, first-seen order
    pub dividend_symbols: Vec<String>,
}

/// Parse and clean both exports.
///
/// Both paths are checked before either file is read, so a typo in the
/// second path fails without touching the first.
pub fn load_report_input<P: AsRef<Path>, Q: AsRef<Path>>(
    transactions_path: P,
    positions_path: Q,
    config: &ReportConfig,
) -> Result<ReportInput> {
    let transactions_path = transactions_path.as_ref();
    let positions_path = positions_path.as_ref();
    ensure_exists(transactions_path)?;
    ensure_exists(positions_path)?;

    let transactions = parse_activity_csv(transactions_path, config)?;
    let mut positions = parse_positions_csv(positions_path, config)?;

    let months_used = distinct_months(&transactions);
    let dividend_symbols = distinct_symbols(&transactions);

    let renamed = normalize_cash_sweep(&mut positions, &dividend_symbols, &config.cash_sweep);
    if renamed > 0 {
        info!(
            "Renamed {} position row(s) {} -> {}",
            renamed, config.cash_sweep.position_alias, config.cash_sweep.symbol
        );
    } else if dividend_symbols.contains(&config.cash_sweep.symbol)
        && !positions.iter().any(|p| p.symbol == config.cash_sweep.symbol)
    {
        warn!(
            "{} paid dividends but no position row is named {} or {}",
            config.cash_sweep.symbol, config.cash_sweep.position_alias, config.cash_sweep.symbol
        );
    }

    if transactions.is_empty() {
        warn!(
            "No dividend, fee or tax rows found in {}",
            transactions_path.display()
        );
    }

    Ok(ReportInput {
        transactions,
        positions,
        months_used,
        dividend_symbols,
    })
}

pub fn distinct_months(transactions: &[TransactionRecord]) -> Vec<String> {
    transactions
        .iter()
        .map(|tx| tx.month_name.clone())
        .unique()
        .collect()
}

pub fn distinct_symbols(transactions: &[TransactionRecord]) -> Vec<String> {
    transactions
        .iter()
        .map(|tx| tx.symbol.clone())
        .unique()
        .collect()
}

fn ensure_exists(path: &Path) -> std::result::Result<(), ReportError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ReportError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// CSV reader settings shared by both exports.
///
/// Brokerage exports end with free-text disclaimer lines that have fewer
/// fields than the header, hence `flexible`.
pub(crate) fn csv_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true).trim(Trim::All);
    builder
}

/// Locate a required header, failing with the file and column name.
pub(crate) fn find_column(
    headers: &StringRecord,
    name: &str,
    file_label: &str,
) -> std::result::Result<usize, ReportError> {
    find_optional_column(headers, name)
        .ok_or_else(|| ReportError::missing_column(file_label, name))
}

pub(crate) fn find_optional_column(headers: &StringRecord, name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == wanted)
}

/// Field text of a row, empty when the row is shorter than the header.
pub(crate) fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}
