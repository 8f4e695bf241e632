// Reports module - dividend, gain/loss and monthly report calculations

pub mod dividends;
pub mod monthly;
pub mod summary;

use rust_decimal::Decimal;

use crate::importers::TransactionRecord;

pub use dividends::{overall_stat, DividendStat, OverallStats};
pub use monthly::{monthly_stat, MonthlyStat};
pub use summary::{build_summary, generate_report, ReportSummary};

/// A table row carrying a symbol and a dollar amount
pub trait DollarRow {
    fn symbol(&self) -> &str;
    fn dollars(&self) -> Decimal;
}

impl DollarRow for TransactionRecord {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn dollars(&self) -> Decimal {
        self.amount_or_zero()
    }
}

/// Net dividends split between the cash-sweep fund and everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetDividends {
    pub cash_sweep: Decimal,
    pub other: Decimal,
}

impl NetDividends {
    pub fn total(&self) -> Decimal {
        (self.cash_sweep + self.other).round_dp(2)
    }
}

/// Dividends minus fees and taxes, separately for `cash_symbol` and the rest.
///
/// Both parts are rounded to cents.
pub fn net_dividends<T: DollarRow>(rows: &[T], cash_symbol: &str) -> NetDividends {
    let (cash_sweep, other) = rows.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(cash, other), row| {
            if row.symbol() == cash_symbol {
                (cash + row.dollars(), other)
            } else {
                (cash, other + row.dollars())
            }
        },
    );

    NetDividends {
        cash_sweep: cash_sweep.round_dp(2),
        other: other.round_dp(2),
    }
}

/// Sum of the present values, rounded to cents; absent values are skipped.
pub fn sum_rounded<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values
        .into_iter()
        .flatten()
        .fold(Decimal::ZERO, |acc, v| acc + v)
        .round_dp(2)
}
