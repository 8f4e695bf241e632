use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use super::{net_dividends, overall_stat, sum_rounded, DividendStat, NetDividends};
use crate::config::ReportConfig;
use crate::importers::{load_report_input, PositionRecord, ReportInput};

/// Everything the default report prints
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub dividend_stats: Vec<DividendStat>,
    pub other_stocks: Vec<PositionRecord>,
    /// Computed over the joined dividend table, one term per table row
    pub net_dividends: NetDividends,
    /// Gain/loss if every dividend-producing holding were sold
    pub dividend_gain_loss: Decimal,
    /// Gain/loss if every other holding were sold
    pub other_gain_loss: Decimal,
    pub months_used: Vec<String>,
}

/// Aggregate cleaned inputs into the report figures
pub fn build_summary(input: &ReportInput, config: &ReportConfig) -> ReportSummary {
    let stats = overall_stat(&input.transactions, &input.positions, &input.dividend_symbols);

    // Summed over the joined table: a symbol held in several position rows
    // contributes its dividend total once per row.
    let net = net_dividends(&stats.dividend_stats, &config.cash_sweep.symbol);

    let dividend_gain_loss =
        sum_rounded(stats.dividend_stats.iter().map(|s| s.total_gain_loss()));
    let other_gain_loss = sum_rounded(stats.other_stocks.iter().map(|p| p.total_gain_loss));

    info!(
        "Report covers {} dividend rows and {} other holdings over {} month(s)",
        stats.dividend_stats.len(),
        stats.other_stocks.len(),
        input.months_used.len()
    );

    ReportSummary {
        dividend_stats: stats.dividend_stats,
        other_stocks: stats.other_stocks,
        net_dividends: net,
        dividend_gain_loss,
        other_gain_loss,
        months_used: input.months_used.clone(),
    }
}

/// Parse both exports and build the summary
pub fn generate_report<P: AsRef<Path>, Q: AsRef<Path>>(
    transactions_path: P,
    positions_path: Q,
    config: &ReportConfig,
) -> Result<(ReportInput, ReportSummary)> {
    config.validate()?;
    let input = load_report_input(transactions_path, positions_path, config)?;
    let summary = build_summary(&input, config);
    Ok((input, summary))
}
