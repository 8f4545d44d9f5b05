use std::fmt::Write;

use basketwatch_core::{format_iso_date, select_prices, Session};
use serde::Serialize;

use crate::cli::PeriodsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PeriodsResponseData {
    reference_month: String,
    years: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_observation: Option<String>,
}

pub fn run(args: &PeriodsArgs, session: &Session) -> Result<CommandResult, CliError> {
    let settings = session.settings();
    let data = PeriodsResponseData {
        reference_month: settings.reference_month.to_string(),
        years: session.base_years(args.all),
        comparison_date: session.comparison_date().map(format_iso_date),
        latest_observation: session.series().latest_date().map(format_iso_date),
    };

    let mut warnings = Vec::new();
    if data.years.is_empty() {
        warnings.push(format!(
            "no {} observations in {}-{}; pass --all to list every year",
            data.reference_month,
            settings.base_years.start(),
            settings.base_years.end()
        ));
    }
    let comparison_priced = session
        .default_comparison()
        .map(|selection| select_prices(session.series(), selection))
        .is_none_or(|prices| !prices.is_empty());
    if !comparison_priced {
        warnings.push(String::from(
            "the comparison date has no observation; every item will be left out",
        ));
    }

    let text = render_text(&data);
    Ok(CommandResult::ok(serde_json::to_value(&data)?)
        .with_text(text)
        .with_warnings(warnings))
}

fn render_text(data: &PeriodsResponseData) -> String {
    let mut out = String::new();
    let years = data
        .years
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Reference month : {}", data.reference_month);
    let _ = writeln!(out, "Base years      : {years}");
    let _ = writeln!(
        out,
        "Compared against: {}",
        data.comparison_date.as_deref().unwrap_or("(none)")
    );
    let _ = writeln!(
        out,
        "Latest data     : {}",
        data.latest_observation.as_deref().unwrap_or("(none)")
    );
    out
}

#[cfg(test)]
mod tests {
    use basketwatch_core::{read_price_table, Settings};

    use super::*;

    const TABLE: &str = "\
Date,APU0000708111 - Eggs
05/01/13,1.00
05/01/19,2.00
06/15/24,3.10
05/01/24,3.00
";

    fn session(table: &str) -> Session {
        let table = read_price_table(table.as_bytes()).expect("table");
        Session::from_table(Settings::default(), table)
    }

    #[test]
    fn lists_window_years_and_comparison_date() {
        let result = run(&PeriodsArgs { all: false }, &session(TABLE)).expect("periods");

        assert_eq!(result.data["reference_month"], "May");
        assert_eq!(result.data["years"], serde_json::json!([2019]));
        assert_eq!(result.data["comparison_date"], "2024-05-01");
        assert_eq!(result.data["latest_observation"], "2024-06-15");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn all_includes_years_outside_window() {
        let result = run(&PeriodsArgs { all: true }, &session(TABLE)).expect("periods");
        assert_eq!(result.data["years"], serde_json::json!([2013, 2019, 2024]));
    }

    #[test]
    fn missing_comparison_row_warns() {
        let table = "Date,APU0000708111 - Eggs\n05/01/19,2.00\n05/20/24,3.00\n";
        let result = run(&PeriodsArgs { all: false }, &session(table)).expect("periods");

        assert_eq!(result.data["comparison_date"], "2024-05-01");
        assert_eq!(result.warnings.len(), 1);
    }
}
