//! Report configuration
//!
//! Column names, action patterns and display defaults for a brokerage export.
//! The configuration is built once (defaults, optionally overlaid by a TOML
//! file and CLI flags) and then passed by reference into the importers and
//! reports; nothing mutates it afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::ReportError;

/// Header names of the activity and positions exports
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub action: String,
    pub stock: String,
    pub dollars: String,
    pub quantity: String,
    pub price: String,
    pub value: String,
    pub cost_basis: String,
    pub dollar_gain_loss: String,
    /// Per-share price column of the activity export (optional there)
    pub activity_price: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Run Date".to_string(),
            action: "Action".to_string(),
            stock: "Symbol".to_string(),
            dollars: "Amount ($)".to_string(),
            quantity: "Quantity".to_string(),
            price: "Last Price".to_string(),
            value: "Current Value".to_string(),
            cost_basis: "Average Cost Basis".to_string(),
            dollar_gain_loss: "Total Gain/Loss Dollar".to_string(),
            activity_price: "Price ($)".to_string(),
        }
    }
}

/// Substrings identifying the activity rows that feed the report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionPatterns {
    pub dividends: String,
    pub fees: String,
    pub tax: String,
}

impl Default for ActionPatterns {
    fn default() -> Self {
        Self {
            dividends: "DIVIDEND RECEIVED".to_string(),
            fees: "FEE CHARGED".to_string(),
            tax: "TAX PAID".to_string(),
        }
    }
}

/// Cash-sweep fund, reported apart from equity dividends
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CashSweep {
    /// Symbol used in the activity export
    pub symbol: String,
    /// Spelling of the same fund in the positions export
    pub position_alias: String,
}

impl Default for CashSweep {
    fn default() -> Self {
        Self {
            symbol: "SPAXX".to_string(),
            position_alias: "SPAXX**".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub columns: ColumnNames,
    pub actions: ActionPatterns,
    pub cash_sweep: CashSweep,
    /// Position symbols with this many characters or more are not tickers
    pub max_symbol_len: usize,
    /// Rows shown per rendered table
    pub max_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            actions: ActionPatterns::default(),
            cash_sweep: CashSweep::default(),
            max_symbol_len: 10,
            max_rows: 65,
        }
    }
}

impl ReportConfig {
    /// Load a TOML configuration file; missing keys keep their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::InputNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        info!("Loading configuration from {:?}", path);
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Reject configurations that would make the report meaningless.
    pub fn validate(&self) -> std::result::Result<(), ReportError> {
        let c = &self.columns;
        let named = [
            ("columns.date", &c.date),
            ("columns.action", &c.action),
            ("columns.stock", &c.stock),
            ("columns.dollars", &c.dollars),
            ("columns.quantity", &c.quantity),
            ("columns.price", &c.price),
            ("columns.value", &c.value),
            ("columns.cost_basis", &c.cost_basis),
            ("columns.dollar_gain_loss", &c.dollar_gain_loss),
            ("actions.dividends", &self.actions.dividends),
            ("actions.fees", &self.actions.fees),
            ("actions.tax", &self.actions.tax),
            ("cash_sweep.symbol", &self.cash_sweep.symbol),
        ];

        if let Some((key, _)) = named.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ReportError::Config(format!("{} must not be empty", key)));
        }
        if self.max_symbol_len == 0 {
            return Err(ReportError::Config(
                "max_symbol_len must be positive".to_string(),
            ));
        }
        if self.max_rows == 0 {
            return Err(ReportError::Config("max_rows must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_brokerage_export() {
        let config = ReportConfig::default();
        assert_eq!(config.columns.date, "Run Date");
        assert_eq!(config.columns.dollar_gain_loss, "Total Gain/Loss Dollar");
        assert_eq!(config.actions.dividends, "DIVIDEND RECEIVED");
        assert_eq!(config.cash_sweep.position_alias, "SPAXX**");
        assert_eq!(config.max_rows, 65);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReportConfig::from_toml_str(
            r#"
            max_rows = 20

            [columns]
            date = "Trade Date"

            [actions]
            fees = "FEE"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_rows, 20);
        assert_eq!(config.columns.date, "Trade Date");
        assert_eq!(config.columns.action, "Action");
        assert_eq!(config.actions.fees, "FEE");
        assert_eq!(config.actions.tax, "TAX PAID");
        assert_eq!(config.max_symbol_len, 10);
    }

    #[test]
    fn test_validate_rejects_empty_column() {
        let mut config = ReportConfig::default();
        config.columns.stock = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns.stock"));
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let config = ReportConfig {
            max_rows: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let err = ReportConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InputNotFound { .. })
        ));
    }
}
