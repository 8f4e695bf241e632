use anyhow::{Context, Result};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{csv_reader_builder, field, find_column};
use crate::config::{CashSweep, ColumnNames, ReportConfig};
use crate::utils::parse_money;

/// One row of the portfolio positions export, projected to the report columns
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub symbol: String,
    pub quantity: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub average_cost_basis: Option<Decimal>,
    /// Total gain/loss in dollars; `None` when the export cell is not numeric
    pub total_gain_loss: Option<Decimal>,
}

/// Parse the portfolio positions export
pub fn parse_positions_csv<P: AsRef<Path>>(
    file_path: P,
    config: &ReportConfig,
) -> Result<Vec<PositionRecord>> {
    let path = file_path.as_ref();
    info!("Parsing positions CSV file: {:?}", path);

    let reader = csv_reader_builder()
        .from_path(path)
        .with_context(|| format!("Failed to open positions file {}", path.display()))?;

    read_positions(reader, &path.display().to_string(), config)
}

pub(crate) fn read_positions<R: Read>(
    mut reader: csv::Reader<R>,
    file_label: &str,
    config: &ReportConfig,
) -> Result<Vec<PositionRecord>> {
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers of {}", file_label))?
        .clone();

    let mapping = PositionColumns::find(&headers, &config.columns, file_label)?;
    debug!("Column mapping: {:?}", mapping);

    let mut positions = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read row {} of {}", idx + 2, file_label))?;

        let symbol = field(&record, mapping.symbol);
        if !is_ticker(symbol, config.max_symbol_len) {
            debug!("Skipping row {}: {:?} is not a ticker", idx + 2, symbol);
            continue;
        }

        positions.push(parse_position_row(&record, &mapping));
    }

    info!("Parsed {} positions from {}", positions.len(), file_label);
    Ok(positions)
}

/// Ticker symbols are non-empty and shorter than `max_len` characters.
/// Longer strings are summary or footer rows ("Pending Activity", totals).
pub fn is_ticker(symbol: &str, max_len: usize) -> bool {
    !symbol.is_empty() && symbol.chars().count() < max_len
}

#[derive(Debug)]
struct PositionColumns {
    symbol: usize,
    quantity: usize,
    last_price: usize,
    current_value: usize,
    cost_basis: usize,
    gain_loss: usize,
}

impl PositionColumns {
    fn find(headers: &StringRecord, columns: &ColumnNames, file_label: &str) -> Result<Self> {
        Ok(Self {
            symbol: find_column(headers, &columns.stock, file_label)?,
            quantity: find_column(headers, &columns.quantity, file_label)?,
            last_price: find_column(headers, &columns.price, file_label)?,
            current_value: find_column(headers, &columns.value, file_label)?,
            cost_basis: find_column(headers, &columns.cost_basis, file_label)?,
            gain_loss: find_column(headers, &columns.dollar_gain_loss, file_label)?,
        })
    }
}

fn parse_position_row(record: &StringRecord, mapping: &PositionColumns) -> PositionRecord {
    let money = |idx: usize| parse_money(field(record, idx));

    PositionRecord {
        symbol: field(record, mapping.symbol).to_string(),
        quantity: money(mapping.quantity),
        last_price: money(mapping.last_price),
        current_value: money(mapping.current_value),
        average_cost_basis: money(mapping.cost_basis),
        total_gain_loss: money(mapping.gain_loss),
    }
}

/// Align the cash-sweep fund's position symbol with the activity export.
///
/// Only applies when the fund actually paid dividends in the activity
/// window. Returns the number of rows renamed.
pub fn normalize_cash_sweep(
    positions: &mut [PositionRecord],
    dividend_symbols: &[String],
    cash_sweep: &CashSweep,
) -> usize {
    if !dividend_symbols.iter().any(|s| s == &cash_sweep.symbol) {
        return 0;
    }

    let mut renamed = 0;
    for position in positions
        .iter_mut()
        .filter(|p| p.symbol == cash_sweep.position_alias)
    {
        position.symbol = cash_sweep.symbol.clone();
        renamed += 1;
    }

    if renamed == 0 {
        warn!(
            "{} paid dividends but no {} position was found",
            cash_sweep.symbol, cash_sweep.position_alias
        );
    }
    renamed
}
