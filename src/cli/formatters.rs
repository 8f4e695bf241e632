//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation. Row limits are
//! applied here only; the reports always carry every row.

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use dividend_report::config::ReportConfig;
use dividend_report::importers::PositionRecord;
use dividend_report::reports::{DividendStat, MonthlyStat, ReportSummary};
use dividend_report::utils::{format_amount, format_currency, format_optional_amount};

const ELLIPSIS: &str = "...";

#[derive(Tabled)]
struct DividendRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Dividends Received (count)")]
    count: String,
    #[tabled(rename = "Dividends ($)")]
    dividends: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Last Price")]
    last_price: String,
    #[tabled(rename = "Current Value")]
    current_value: String,
    #[tabled(rename = "Average Cost Basis")]
    cost_basis: String,
    #[tabled(rename = "Total Gain/Loss ($)")]
    gain_loss: String,
}

impl DividendRow {
    fn new(index: usize, stat: &DividendStat) -> Self {
        let position = stat.position.as_ref();
        let held = |f: fn(&PositionRecord) -> Option<Decimal>| {
            format_optional_amount(position.and_then(f))
        };

        Self {
            index: index.to_string(),
            symbol: stat.symbol.clone(),
            count: stat
                .dividend_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            dividends: colored_amount(Some(stat.dividend_total)),
            quantity: held(|p| p.quantity),
            last_price: held(|p| p.last_price),
            current_value: held(|p| p.current_value),
            cost_basis: held(|p| p.average_cost_basis),
            gain_loss: colored_amount(stat.total_gain_loss()),
        }
    }

    fn ellipsis() -> Self {
        let e = || ELLIPSIS.to_string();
        Self {
            index: e(),
            symbol: e(),
            count: e(),
            dividends: e(),
            quantity: e(),
            last_price: e(),
            current_value: e(),
            cost_basis: e(),
            gain_loss: e(),
        }
    }
}

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Last Price")]
    last_price: String,
    #[tabled(rename = "Current Value")]
    current_value: String,
    #[tabled(rename = "Average Cost Basis")]
    cost_basis: String,
    #[tabled(rename = "Total Gain/Loss ($)")]
    gain_loss: String,
}

impl HoldingRow {
    fn new(index: usize, p: &PositionRecord) -> Self {
        Self {
            index: index.to_string(),
            symbol: p.symbol.clone(),
            quantity: format_optional_amount(p.quantity),
            last_price: format_optional_amount(p.last_price),
            current_value: format_optional_amount(p.current_value),
            cost_basis: format_optional_amount(p.average_cost_basis),
            gain_loss: colored_amount(p.total_gain_loss),
        }
    }

    fn ellipsis() -> Self {
        let e = || ELLIPSIS.to_string();
        Self {
            index: e(),
            symbol: e(),
            quantity: e(),
            last_price: e(),
            current_value: e(),
            cost_basis: e(),
            gain_loss: e(),
        }
    }
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Run Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Amount ($)")]
    amount: String,
}

impl ActivityRow {
    fn ellipsis() -> Self {
        let e = || ELLIPSIS.to_string();
        Self {
            date: e(),
            kind: e(),
            symbol: e(),
            action: e(),
            amount: e(),
        }
    }
}

fn colored_amount(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v >= Decimal::ZERO => format_amount(v).green().to_string(),
        Some(v) => format_amount(v).red().to_string(),
        None => "N/A".to_string(),
    }
}

fn colored_currency(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format_currency(value).green().to_string()
    } else {
        format_currency(value).red().to_string()
    }
}

/// Keep at most `max_rows` rows: the first and last halves, with a marker
/// row between them. Returns the number of hidden rows.
fn truncate_rows<R>(mut rows: Vec<R>, max_rows: usize, marker: R) -> (Vec<R>, usize) {
    if rows.len() <= max_rows {
        return (rows, 0);
    }

    let hidden = rows.len() - max_rows;
    let head = max_rows.div_ceil(2);
    let tail: Vec<R> = rows.split_off(rows.len() - max_rows / 2);
    rows.truncate(head);
    rows.push(marker);
    rows.extend(tail);
    (rows, hidden)
}

fn render_table<R: Tabled>(rows: Vec<R>, right_from: usize, hidden: usize) -> String {
    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(right_from..), Alignment::right());

    let mut output = table.to_string();
    if hidden > 0 {
        output.push_str(&format!("\n{} more row(s) not shown", hidden));
    }
    output
}

fn format_dividend_table(stats: &[DividendStat], max_rows: usize) -> String {
    let rows: Vec<DividendRow> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| DividendRow::new(i, s))
        .collect();
    let (rows, hidden) = truncate_rows(rows, max_rows, DividendRow::ellipsis());
    // Right-align everything after Symbol
    render_table(rows, 2, hidden)
}

fn format_holdings_table(positions: &[PositionRecord], max_rows: usize) -> String {
    let rows: Vec<HoldingRow> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| HoldingRow::new(i, p))
        .collect();
    let (rows, hidden) = truncate_rows(rows, max_rows, HoldingRow::ellipsis());
    render_table(rows, 2, hidden)
}

/// Format the default report: both ranked tables and the summary figures
pub fn format_summary(summary: &ReportSummary, config: &ReportConfig) -> String {
    let mut output = String::new();
    let months = summary.months_used.len();

    output.push_str(&format!(
        "\n{} Stocks that produce dividends, in {} mo.:\n\n",
        "📊".cyan().bold(),
        months
    ));
    if summary.dividend_stats.is_empty() {
        output.push_str(&format_no_dividends());
    } else {
        output.push_str(&format_dividend_table(
            &summary.dividend_stats,
            config.max_rows,
        ));
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{:<40} {}",
        format!("Total dividends per {}:", config.cash_sweep.symbol).bold(),
        format_currency(summary.net_dividends.cash_sweep)
    ));
    output.push_str(&format!(
        "\n{:<40} {}\n",
        "Total dividends per other stocks:".bold(),
        format_currency(summary.net_dividends.other)
    ));

    output.push_str(&format!(
        "\n{} Stocks that don't produce dividends:\n\n",
        "📈".cyan().bold()
    ));
    if summary.other_stocks.is_empty() {
        output.push_str("No other holdings.\n");
    } else {
        output.push_str(&format_holdings_table(
            &summary.other_stocks,
            config.max_rows,
        ));
        output.push('\n');
    }

    output.push_str(&format!("\n{} Summary", "━".repeat(80).bright_black()));
    output.push_str(&format!(
        "\n{:<72} {}",
        "Total (gain - loss) if sell all dividend producing stocks will be:".bold(),
        colored_currency(summary.dividend_gain_loss)
    ));
    output.push_str(&format!(
        "\n{:<72} {}",
        "Total (gain - loss) if sell all other stocks will be:".bold(),
        colored_currency(summary.other_gain_loss)
    ));
    output.push_str(&format!(
        "\n\nStats calculated per {} month(s): {}\n",
        months,
        summary.months_used.join(", ")
    ));

    output
}

/// Format one month of activity with its net dividends
pub fn format_monthly(stat: &MonthlyStat, config: &ReportConfig) -> String {
    let mut output = format!("\n{} {}\n\n", "📅".cyan().bold(), stat.month.bold());

    if stat.is_empty() {
        output.push_str(&format!(
            "{} No dividend, fee or tax activity in {}\n",
            "ℹ".blue().bold(),
            stat.month
        ));
        return output;
    }

    let rows: Vec<ActivityRow> = stat
        .transactions
        .iter()
        .map(|tx| ActivityRow {
            date: tx.run_date.format("%m/%d/%Y").to_string(),
            kind: tx.kind.as_str().to_string(),
            symbol: tx.symbol.clone(),
            action: tx.action.clone(),
            amount: colored_amount(tx.amount),
        })
        .collect();
    let (rows, hidden) = truncate_rows(rows, config.max_rows, ActivityRow::ellipsis());
    output.push_str(&render_table(rows, 4, hidden));

    output.push_str(&format!(
        "\n{:<40} {}\n",
        format!("Net dividends in {}:", stat.month).bold(),
        colored_currency(stat.net_dividends)
    ));
    output
}

/// Message shown when the activity export had nothing to report
pub fn format_no_dividends() -> String {
    format!(
        "{} No dividend, fee or tax activity found in the transaction history\n",
        "ℹ".blue().bold()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dividend_report::reports::NetDividends;
    use rust_decimal_macros::dec;

    fn plain() {
        colored::control::set_override(false);
    }

    fn holding(symbol: &str, gain_loss: Decimal) -> PositionRecord {
        PositionRecord {
            symbol: symbol.to_string(),
            quantity: Some(dec!(1)),
            last_price: None,
            current_value: None,
            average_cost_basis: None,
            total_gain_loss: Some(gain_loss),
        }
    }

    fn summary() -> ReportSummary {
        ReportSummary {
            dividend_stats: vec![DividendStat {
                symbol: "AAPL".to_string(),
                dividend_count: Some(2),
                dividend_total: dec!(21),
                position: Some(holding("AAPL", dec!(50))),
            }],
            other_stocks: vec![holding("TSLA", dec!(-100))],
            net_dividends: NetDividends {
                cash_sweep: Decimal::ZERO,
                other: dec!(21),
            },
            dividend_gain_loss: dec!(50),
            other_gain_loss: dec!(-100),
            months_used: vec!["January".to_string(), "February".to_string()],
        }
    }

    #[test]
    fn test_truncate_rows_keeps_head_and_tail() {
        let rows: Vec<i32> = (0..10).collect();
        let (shown, hidden) = truncate_rows(rows, 5, -1);
        assert_eq!(shown, vec![0, 1, 2, -1, 8, 9]);
        assert_eq!(hidden, 5);

        let (shown, hidden) = truncate_rows(vec![1, 2], 5, -1);
        assert_eq!(shown, vec![1, 2]);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_format_summary_labels_and_totals() {
        plain();
        let text = format_summary(&summary(), &ReportConfig::default());

        assert!(text.contains("in 2 mo."));
        assert!(text.contains("Dividends Received (count)"));
        assert!(text.contains("Dividends ($)"));
        assert!(text.contains("Total Gain/Loss ($)"));
        assert!(text.contains("Total dividends per SPAXX:"));
        assert!(text.contains("$21.00"));
        assert!(text.contains("-$100.00"));
        assert!(text.contains("January, February"));
    }

    #[test]
    fn test_format_summary_truncates_display_only() {
        plain();
        let mut summary = summary();
        summary.other_stocks = (0..30)
            .map(|i| holding(&format!("T{}", i), Decimal::from(30 - i)))
            .collect();
        let config = ReportConfig {
            max_rows: 4,
            ..ReportConfig::default()
        };

        let text = format_summary(&summary, &config);
        assert!(text.contains("26 more row(s) not shown"));
        assert!(text.contains("T0 "));
        assert!(text.contains("T29"));
        assert!(!text.contains("T15 "));
        assert_eq!(summary.other_stocks.len(), 30);
    }

    #[test]
    fn test_format_no_dividends_message() {
        plain();
        let mut summary = summary();
        summary.dividend_stats.clear();
        let text = format_summary(&summary, &ReportConfig::default());
        assert!(text.contains("No dividend, fee or tax activity found"));
    }
}
