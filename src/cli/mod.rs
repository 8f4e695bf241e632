use anyhow::{anyhow, Result};
use clap::Parser;
use itertools::Itertools;
use std::path::PathBuf;

use dividend_report::config::ReportConfig;
use dividend_report::reports::monthly::canonical_month_name;
use dividend_report::reports::{generate_report, monthly_stat};

pub mod formatters;

#[derive(Parser, Debug)]
#[command(name = "dividend-report")]
#[command(
    version,
    about = "Dividend income and gain/loss summary from brokerage CSV exports"
)]
#[command(
    long_about = "Merges an account activity (transaction history) export with a portfolio positions export. Prints dividend-producing holdings ranked by net dividends and the remaining holdings ranked by total gain/loss."
)]
pub struct Cli {
    /// Account activity / transaction history CSV
    pub transactions: PathBuf,

    /// Portfolio positions CSV
    pub positions: PathBuf,

    /// Also show the activity of this month (name, abbreviation or number); repeatable
    #[arg(short, long = "month", value_name = "MONTH")]
    pub months: Vec<String>,

    /// Also show the activity of every month covered by the report
    #[arg(long)]
    pub by_month: bool,

    /// Maximum rows rendered per table
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,

    /// TOML file overriding column names and action patterns
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Defaults, overlaid by the config file, overlaid by flags
    pub fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_toml_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(max_rows) = self.max_rows {
            config.max_rows = max_rows;
        }
        config.validate()?;
        Ok(config)
    }

    /// Month sections to print after the summary, in order and without repeats
    pub fn requested_months(&self, months_used: &[String]) -> Result<Vec<String>> {
        let mut months = Vec::new();
        if self.by_month {
            months.extend(months_used.iter().cloned());
        }
        for raw in &self.months {
            let name = canonical_month_name(raw).ok_or_else(|| {
                anyhow!(
                    "Invalid month '{}'. Use a name (March), abbreviation (Mar) or number (3)",
                    raw
                )
            })?;
            months.push(name);
        }
        Ok(months.into_iter().unique().collect())
    }
}

/// Run one report: validate, parse, aggregate, print
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.resolve_config()?;
    let (input, summary) = generate_report(&cli.transactions, &cli.positions, &config)?;

    print!("{}", formatters::format_summary(&summary, &config));

    for month in cli.requested_months(&input.months_used)? {
        let stat = monthly_stat(&input.transactions, &month, &config.cash_sweep.symbol);
        print!("{}", formatters::format_monthly(&stat, &config));
    }

    Ok(())
}
