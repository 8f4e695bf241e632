
use assert_cmd::prelude::*;
use cli_helpers::{
    base_cmd, path_str, report_stdout, write_file, HISTORY_FIXTURE, POSITIONS_FIXTURE,
};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn report_prints_both_tables_without_ansi() {
    let mut cmd = base_cmd();
    cmd.arg(HISTORY_FIXTURE).arg(POSITIONS_FIXTURE);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Stocks that produce dividends, in 2 mo."))
        .stdout(predicate::str::contains("Dividends Received (count)"))
        .stdout(predicate::str::contains("Stocks that don't produce dividends"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn report_figures_match_fixture() {
    let stdout = report_stdout(&[]).expect("report should run");

    // SPAXX 1.50; AAPL 21.00 + NVS 3.40
    assert!(stdout.contains("Total dividends per SPAXX:"));
    assert!(stdout.contains("$1.50"));
    assert!(stdout.contains("$24.40"));
    // AAPL +50; MSFT +90 and TSLA -100
    assert!(stdout.contains("$50.00"));
    assert!(stdout.contains("-$10.00"));
    assert!(stdout.contains("February, January"));

    // Ranked by dividends: AAPL before NVS before SPAXX
    let aapl = stdout.find("AAPL").expect("AAPL row");
    let nvs = stdout.find("NVS").expect("NVS row");
    assert!(aapl < nvs);
    assert!(stdout[nvs..].contains("SPAXX"));

    // Ranked by gain/loss: MSFT before TSLA
    assert!(stdout.find("MSFT").unwrap() < stdout.find("TSLA").unwrap());
}

#[test]
fn report_excludes_non_ticker_rows_and_aligns_cash_sweep() {
    let stdout = report_stdout(&[]).expect("report should run");

    assert!(!stdout.contains("SOME-LONG-TICKER-12345"));
    assert!(!stdout.contains("Pending Activity"));
    assert!(!stdout.contains("SPAXX**"));
}

#[test]
fn month_flag_appends_monthly_section() {
    let stdout = report_stdout(&["--month", "jan"]).expect("report should run");

    assert!(stdout.contains("Net dividends in January:"));
    // AAPL 10 - 1, SPAXX 1.50, NVS 4 - 0.60
    assert!(stdout.contains("$13.90"));
}

#[test]
fn by_month_flag_lists_every_month() {
    let stdout = report_stdout(&["--by-month"]).expect("report should run");

    assert!(stdout.contains("Net dividends in February:"));
    assert!(stdout.contains("Net dividends in January:"));
}

#[test]
fn max_rows_truncates_display() {
    let stdout = report_stdout(&["--max-rows", "2"]).expect("report should run");

    assert!(stdout.contains("1 more row(s) not shown"));
    assert!(stdout.contains("..."));
}

#[test]
fn missing_arguments_print_usage_and_fail() {
    let mut cmd = base_cmd();
    cmd.arg(HISTORY_FIXTURE);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_input_file_fails_before_parsing() {
    let mut cmd = base_cmd();
    cmd.arg("tests/data/does_not_exist.csv").arg(POSITIONS_FIXTURE);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"))
        .stderr(predicate::str::contains("does_not_exist.csv"));
}

#[test]
fn missing_column_names_file_and_column() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let positions = write_file(
        &dir,
        "positions.csv",
        "Symbol,Quantity,Last Price,Current Value,Average Cost Basis\nAAPL,1,1,1,1\n",
    );

    let mut cmd = base_cmd();
    cmd.arg(HISTORY_FIXTURE).arg(path_str(&positions));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing expected column 'Total Gain/Loss Dollar'",
        ))
        .stderr(predicate::str::contains("positions.csv"));
}

#[test]
fn config_file_overrides_cash_sweep_symbol() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = write_file(
        &dir,
        "report.toml",
        "[cash_sweep]\nsymbol = \"FDRXX\"\nposition_alias = \"FDRXX**\"\n",
    );

    let stdout = report_stdout(&["--config", path_str(&config)]).expect("report should run");

    assert!(stdout.contains("Total dividends per FDRXX:"));
    // SPAXX is now an ordinary symbol and its position keeps the export spelling
    assert!(stdout.contains("SPAXX**"));
}
