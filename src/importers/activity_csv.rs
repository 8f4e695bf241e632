use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::{csv_reader_builder, field, find_column, find_optional_column};
use crate::config::{ActionPatterns, ColumnNames, ReportConfig};
use crate::utils::parse_money;

/// Kind of activity row kept for the dividend report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Dividend,
    Fee,
    Tax,
}

impl ActionKind {
    /// Classify an action description; `None` for rows the report ignores.
    ///
    /// Matching is a case-insensitive substring test. A description that
    /// matches several patterns is classified by the first match in the
    /// order dividend, fee, tax.
    pub fn classify(action: &str, patterns: &ActionPatterns) -> Option<Self> {
        let action = action.to_uppercase();
        let matches = |pattern: &str| action.contains(&pattern.to_uppercase());

        if matches(&patterns.dividends) {
            Some(ActionKind::Dividend)
        } else if matches(&patterns.fees) {
            Some(ActionKind::Fee)
        } else if matches(&patterns.tax) {
            Some(ActionKind::Tax)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Dividend => "DIVIDEND",
            ActionKind::Fee => "FEE",
            ActionKind::Tax => "TAX",
        }
    }
}

/// One kept row of the account activity export
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub run_date: NaiveDate,
    pub action: String,
    pub kind: ActionKind,
    pub symbol: String,
    /// Dollar amount; fees and taxes are negative in the export
    pub amount: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    /// Full month name of `run_date` ("January")
    pub month_name: String,
}

impl TransactionRecord {
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// Parse the account activity export, keeping dividend, fee and tax rows
pub fn parse_activity_csv<P: AsRef<Path>>(
    file_path: P,
    config: &ReportConfig,
) -> Result<Vec<TransactionRecord>> {
    let path = file_path.as_ref();
    info!("Parsing activity CSV file: {:?}", path);

    let reader = csv_reader_builder()
        .from_path(path)
        .with_context(|| format!("Failed to open activity file {}", path.display()))?;

    read_activity(reader, &path.display().to_string(), config)
}

pub(crate) fn read_activity<R: Read>(
    mut reader: csv::Reader<R>,
    file_label: &str,
    config: &ReportConfig,
) -> Result<Vec<TransactionRecord>> {
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers of {}", file_label))?
        .clone();

    debug!("Activity headers: {:?}", headers);

    let mapping = ActivityColumns::find(&headers, &config.columns, file_label)?;
    debug!("Column mapping: {:?}", mapping);

    let mut transactions = Vec::new();
    let mut total_rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read row {} of {}", idx + 2, file_label))?;
        total_rows += 1;

        if let Some(tx) = parse_activity_row(&record, &mapping, &config.actions, idx + 2) {
            transactions.push(tx);
        }
    }

    info!(
        "Kept {} of {} activity rows from {}",
        transactions.len(),
        total_rows,
        file_label
    );
    Ok(transactions)
}

#[derive(Debug)]
struct ActivityColumns {
    date: usize,
    action: usize,
    symbol: usize,
    amount: usize,
    quantity: Option<usize>,
    price: Option<usize>,
}

impl ActivityColumns {
    fn find(headers: &StringRecord, columns: &ColumnNames, file_label: &str) -> Result<Self> {
        Ok(Self {
            date: find_column(headers, &columns.date, file_label)?,
            action: find_column(headers, &columns.action, file_label)?,
            symbol: find_column(headers, &columns.stock, file_label)?,
            amount: find_column(headers, &columns.dollars, file_label)?,
            quantity: find_optional_column(headers, &columns.quantity),
            price: find_optional_column(headers, &columns.activity_price),
        })
    }
}

fn parse_activity_row(
    record: &StringRecord,
    mapping: &ActivityColumns,
    patterns: &ActionPatterns,
    row_num: usize,
) -> Option<TransactionRecord> {
    let date_str = field(record, mapping.date);
    let Some(run_date) = parse_run_date(date_str) else {
        debug!("Skipping row {}: unparseable date {:?}", row_num, date_str);
        return None;
    };

    let action = field(record, mapping.action);
    let kind = ActionKind::classify(action, patterns)?;

    let optional = |idx: Option<usize>| idx.and_then(|i| parse_money(field(record, i)));

    Some(TransactionRecord {
        run_date,
        action: action.to_string(),
        kind,
        symbol: field(record, mapping.symbol).to_string(),
        amount: parse_money(field(record, mapping.amount)),
        quantity: optional(mapping.quantity),
        price: optional(mapping.price),
        month_name: run_date.format("%B").to_string(),
    })
}

/// Parse a run date in any of the layouts brokerage exports use
pub fn parse_run_date(date_str: &str) -> Option<NaiveDate> {
    // Two-digit years first: %Y would read "24" as the year 24
    const FORMATS: [&str; 6] = [
        "%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y", "%Y-%m-%d", "%Y/%m/%d",
    ];

    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
