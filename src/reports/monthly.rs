use rust_decimal::Decimal;

use super::net_dividends;
use crate::importers::TransactionRecord;

/// Activity rows of one calendar month and their net dividends
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStat {
    pub month: String,
    pub transactions: Vec<TransactionRecord>,
    /// Cash-sweep plus other net dividends for the month, rounded to cents
    pub net_dividends: Decimal,
}

impl MonthlyStat {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Select the rows of `month` (full English month name, e.g. "March").
///
/// Months are matched by name only, so rows from the same month of
/// different years are grouped together.
pub fn monthly_stat(
    transactions: &[TransactionRecord],
    month: &str,
    cash_symbol: &str,
) -> MonthlyStat {
    let rows: Vec<TransactionRecord> = transactions
        .iter()
        .filter(|tx| tx.month_name == month)
        .cloned()
        .collect();

    let net = net_dividends(&rows, cash_symbol).total();

    MonthlyStat {
        month: month.to_string(),
        transactions: rows,
        net_dividends: net,
    }
}

/// Canonical month name for user input ("mar", "MARCH", "3" -> "March").
pub fn canonical_month_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<u8>() {
        return chrono::Month::try_from(number)
            .ok()
            .map(|m| m.name().to_string());
    }
    trimmed
        .parse::<chrono::Month>()
        .ok()
        .map(|m| m.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importers::ActionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(month: u32, symbol: &str, amount: Decimal) -> TransactionRecord {
        let run_date = NaiveDate::from_ymd_opt(2024, month, 10).unwrap();
        TransactionRecord {
            run_date,
            action: "DIVIDEND RECEIVED".to_string(),
            kind: ActionKind::Dividend,
            symbol: symbol.to_string(),
            amount: Some(amount),
            quantity: None,
            price: None,
            month_name: run_date.format("%B").to_string(),
        }
    }

    #[test]
    fn test_monthly_stat_selects_month() {
        let transactions = vec![
            tx(1, "AAPL", dec!(10.00)),
            tx(1, "SPAXX", dec!(0.125)),
            tx(2, "AAPL", dec!(12.00)),
            tx(1, "AAPL", dec!(-1.00)),
        ];

        let january = monthly_stat(&transactions, "January", "SPAXX");
        assert_eq!(january.transactions.len(), 3);
        // 0.125 rounds to 0.12, other part is 9.00
        assert_eq!(january.net_dividends, dec!(9.12));

        let february = monthly_stat(&transactions, "February", "SPAXX");
        assert_eq!(february.net_dividends, dec!(12.00));
    }

    #[test]
    fn test_monthly_stat_unknown_month_is_empty() {
        let transactions = vec![tx(1, "AAPL", dec!(10.00))];
        let stat = monthly_stat(&transactions, "July", "SPAXX");
        assert!(stat.is_empty());
        assert_eq!(stat.net_dividends, Decimal::ZERO);
    }

    #[test]
    fn test_canonical_month_name() {
        assert_eq!(canonical_month_name("january").as_deref(), Some("January"));
        assert_eq!(canonical_month_name("MAR").as_deref(), Some("March"));
        assert_eq!(canonical_month_name("12").as_deref(), Some("December"));
        assert_eq!(canonical_month_name("13"), None);
        assert_eq!(canonical_month_name("Smarch"), None);
    }
}
