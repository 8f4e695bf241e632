//! Dividend Report - brokerage CSV dividend and gain/loss summaries
//!
//! This library parses an account activity export and a portfolio positions
//! export, ranks dividend-producing holdings by net dividends, ranks the
//! remaining holdings by gain/loss, and computes per-month dividend totals.

pub mod config;
pub mod error;
pub mod importers;
pub mod reports;
pub mod utils;
