use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::DollarRow;
use crate::importers::{ActionKind, PositionRecord, TransactionRecord};

/// Per-symbol dividend income, joined with the current holding
#[derive(Debug, Clone, PartialEq)]
pub struct DividendStat {
    pub symbol: String,
    /// Number of dividend-received events; `None` when the symbol only had fees or taxes
    pub dividend_count: Option<usize>,
    /// Dividends plus (negative) fees and taxes
    pub dividend_total: Decimal,
    /// Matching position row; `None` when the symbol is no longer held
    pub position: Option<PositionRecord>,
}

impl DividendStat {
    pub fn total_gain_loss(&self) -> Option<Decimal> {
        self.position.as_ref().and_then(|p| p.total_gain_loss)
    }
}

impl DollarRow for DividendStat {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn dollars(&self) -> Decimal {
        self.dividend_total
    }
}

/// The two ranked tables of the report
#[derive(Debug, Clone, Default)]
pub struct OverallStats {
    /// Dividend-producing symbols, descending by dividend total
    pub dividend_stats: Vec<DividendStat>,
    /// Holdings that produced no dividend, fee or tax rows, descending by gain/loss
    pub other_stocks: Vec<PositionRecord>,
}

#[derive(Debug)]
struct SymbolTotals<'a> {
    symbol: &'a str,
    dividend_count: usize,
    total: Decimal,
}

/// Rank dividend income per symbol and the remaining holdings by gain/loss.
///
/// Symbols keep the order they first appear in `transactions`; sorts are
/// stable so equal totals keep that order. The positions join is a left
/// join: a symbol held in several position rows yields one row per holding.
pub fn overall_stat(
    transactions: &[TransactionRecord],
    positions: &[PositionRecord],
    dividend_symbols: &[String],
) -> OverallStats {
    let mut totals: Vec<SymbolTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tx in transactions {
        let slot = *index.entry(tx.symbol.as_str()).or_insert_with(|| {
            totals.push(SymbolTotals {
                symbol: &tx.symbol,
                dividend_count: 0,
                total: Decimal::ZERO,
            });
            totals.len() - 1
        });

        let entry = &mut totals[slot];
        entry.total += tx.amount_or_zero();
        if tx.kind == ActionKind::Dividend {
            entry.dividend_count += 1;
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));

    let mut dividend_stats = Vec::with_capacity(totals.len());
    for t in &totals {
        let held: Vec<&PositionRecord> = positions
            .iter()
            .filter(|p| p.symbol == t.symbol)
            .collect();
        let dividend_count = (t.dividend_count > 0).then_some(t.dividend_count);

        if held.is_empty() {
            dividend_stats.push(DividendStat {
                symbol: t.symbol.to_string(),
                dividend_count,
                dividend_total: t.total,
                position: None,
            });
        } else {
            dividend_stats.extend(held.into_iter().map(|p| DividendStat {
                symbol: t.symbol.to_string(),
                dividend_count,
                dividend_total: t.total,
                position: Some(p.clone()),
            }));
        }
    }

    let paying: HashSet<&str> = dividend_symbols.iter().map(String::as_str).collect();
    let mut other_stocks: Vec<PositionRecord> = positions
        .iter()
        .filter(|p| !paying.contains(p.symbol.as_str()))
        .cloned()
        .collect();
    other_stocks.sort_by(|a, b| descending_missing_last(a.total_gain_loss, b.total_gain_loss));

    OverallStats {
        dividend_stats,
        other_stocks,
    }
}

fn descending_missing_last(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
