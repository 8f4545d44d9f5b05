use std::fmt::Write;

use basketwatch_core::{
    BasketComparison, CostPoint, ItemCost, LineOutcome, MissingSide, Period,
    PercentChange, Quantity, Selection, SeriesId, Session,
};
use serde::Serialize;

use crate::cli::CompareArgs;
use crate::error::CliError;
use crate::output::chart::{line_chart, ChartPoint};
use crate::output::money;

use super::{item_label, resolve_basket, CommandResult};

const CHART_HEIGHT: usize = 10;

#[derive(Debug, Serialize)]
struct CompareResponseData {
    base: Selection,
    comparison: Selection,
    items: Vec<ItemRow>,
    omitted: Vec<OmittedRow>,
    totals: Totals,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<CostPoint>>,
}

#[derive(Debug, Serialize)]
struct ItemRow {
    label: String,
    #[serde(flatten)]
    cost: ItemCost,
}

#[derive(Debug, Serialize)]
struct OmittedRow {
    item: SeriesId,
    label: String,
    quantity: Quantity,
    missing: MissingSide,
}

#[derive(Debug, Serialize)]
struct Totals {
    base: f64,
    comparison: f64,
    difference: f64,
    percentage_change: PercentChange,
}

pub fn run(args: &CompareArgs, session: &Session) -> Result<CommandResult, CliError> {
    let basket = resolve_basket(&args.basket, session)?;
    let base = base_period(args, session)?;

    let mut warnings = Vec::new();
    let comparison = match &args.compare {
        Some(text) => Selection::Month(text.parse::<Period>()?),
        None => session.default_comparison().unwrap_or_else(|| {
            let fallback = session.fallback_comparison();
            warnings.push(format!(
                "price table has no dated observations; comparing against {}",
                fallback.label()
            ));
            fallback
        }),
    };

    let result = session.compare(&basket, base, comparison);
    let history = args.history.then(|| session.history(&basket));
    let data = response_data(session, &result, history);

    if !session.settings().base_years.contains(&base.year()) {
        warnings.push(format!(
            "base year {} is outside the usual range {}-{}",
            base.year(),
            session.settings().base_years.start(),
            session.settings().base_years.end()
        ));
    }
    for line in &data.omitted {
        warnings.push(format!(
            "{} ({}) has no price for {}; left out of the totals",
            line.label,
            line.item,
            missing_text(line.missing, &result)
        ));
    }
    if data.items.is_empty() {
        warnings.push(format!(
            "no basket item has a price in both {} and {}",
            result.base.label(),
            result.comparison.label()
        ));
    }

    let text = render_text(&data);
    Ok(CommandResult::ok(serde_json::to_value(&data)?)
        .with_text(text)
        .with_warnings(warnings))
}

fn base_period(args: &CompareArgs, session: &Session) -> Result<Period, CliError> {
    match (&args.base, args.base_year) {
        (Some(text), _) => Ok(text.parse::<Period>()?),
        (None, Some(year)) => Ok(session.base_period(year)?),
        (None, None) => Err(CliError::Command(String::from(
            "a base period is required: pass --base-year YYYY or --base YYYY-MM",
        ))),
    }
}

fn response_data(
    session: &Session,
    result: &BasketComparison,
    history: Option<Vec<CostPoint>>,
) -> CompareResponseData {
    let items = result
        .breakdown()
        .into_iter()
        .map(|cost| ItemRow {
            label: item_label(session, &cost.item),
            cost,
        })
        .collect();

    let omitted = result
        .omitted()
        .filter_map(|line| match line.outcome {
            LineOutcome::Unavailable { missing } => Some(OmittedRow {
                item: line.item.clone(),
                label: item_label(session, &line.item),
                quantity: line.quantity,
                missing,
            }),
            LineOutcome::Resolved { .. } => None,
        })
        .collect();

    CompareResponseData {
        base: result.base,
        comparison: result.comparison,
        items,
        omitted,
        totals: Totals {
            base: result.base_total,
            comparison: result.comparison_total,
            difference: result.difference,
            percentage_change: result.percentage_change,
        },
        history,
    }
}

fn missing_text(missing: MissingSide, result: &BasketComparison) -> String {
    match missing {
        MissingSide::Base => result.base.label(),
        MissingSide::Comparison => result.comparison.label(),
        MissingSide::Both => format!(
            "{} or {}",
            result.base.label(),
            result.comparison.label()
        ),
    }
}

fn render_text(data: &CompareResponseData) -> String {
    let base = data.base.label();
    let comparison = data.comparison.label();
    let mut out = String::new();

    let _ = writeln!(out, "Basket cost: {base} vs {comparison}");
    let _ = writeln!(out);
    let rows = [
        (format!("Total cost in {base}:"), money(data.totals.base)),
        (format!("Total cost in {comparison}:"), money(data.totals.comparison)),
        (String::from("Difference:"), money(data.totals.difference)),
        (
            String::from("Percentage change:"),
            data.totals.percentage_change.to_string(),
        ),
    ];
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in &rows {
        let _ = writeln!(out, "  {name:<width$}  {value:>12}");
    }

    if !data.items.is_empty() {
        let label_width = data
            .items
            .iter()
            .map(|row| row.label.len())
            .max()
            .unwrap_or(0)
            .max("Item".len());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:<label_width$}  {:>5}  {:>10}  {:>10}  {:>10}  {:>10}",
            "Item", "Qty", "Base price", "Base cost", "Now price", "Now cost"
        );
        for row in &data.items {
            let _ = writeln!(
                out,
                "  {:<label_width$}  {:>5}  {:>10}  {:>10}  {:>10}  {:>10}",
                row.label,
                row.cost.quantity,
                money(row.cost.base_price),
                money(row.cost.base_cost),
                money(row.cost.comparison_price),
                money(row.cost.comparison_cost),
            );
        }
    }

    if !data.omitted.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Left out for missing prices:");
        for row in &data.omitted {
            let side = match row.missing {
                MissingSide::Base => "base",
                MissingSide::Comparison => "comparison",
                MissingSide::Both => "both periods",
            };
            let _ = writeln!(out, "    {} (no {side} price)", row.label);
        }
    }

    if let Some(history) = &data.history {
        let points = history
            .iter()
            .map(|point| ChartPoint::new(point.period.to_string(), point.cost))
            .collect::<Vec<_>>();
        let _ = writeln!(out);
        let _ = writeln!(out, "Basket cost over time");
        out.push_str(&line_chart(&points, CHART_HEIGHT));
    }

    out
}

#[cfg(test)]
mod tests {
    use basketwatch_core::{read_price_table, Settings};

    use super::*;
    use crate::cli::BasketArgs;

    const TABLE: &str = "\
Date,APU0000708111 - Eggs,APU0000709112 - Milk,APU0000711211 - Bananas
05/01/19,2.00,3.50,
05/01/24,3.00,4.00,0.60
";

    fn session() -> Session {
        let table = read_price_table(TABLE.as_bytes()).expect("table");
        Session::from_table(Settings::default(), table)
    }

    fn args(items: &[&str]) -> CompareArgs {
        CompareArgs {
            basket: BasketArgs {
                items: items.iter().map(|item| (*item).to_owned()).collect(),
                preset: None,
            },
            base_year: Some(2019),
            base: None,
            compare: None,
            history: false,
        }
    }

    #[test]
    fn compares_basket_and_renders_summary() {
        let result = run(&args(&["eggs=12", "milk=6"]), &session()).expect("compare");

        assert_eq!(result.data["totals"]["base"], 45.0);
        assert_eq!(result.data["totals"]["comparison"], 60.0);
        assert_eq!(result.data["totals"]["difference"], 15.0);
        assert!(result.warnings.is_empty());

        let text = result.text.expect("text");
        assert!(text.contains("Total cost in May 2019:"));
        assert!(text.contains("$45.00"));
        assert!(text.contains("33.33%"));
        assert!(text.contains("Eggs"));
    }

    #[test]
    fn item_without_base_price_is_reported() {
        let result = run(&args(&["eggs=1", "bananas=3"]), &session()).expect("compare");

        assert_eq!(result.data["items"].as_array().map(Vec::len), Some(1));
        assert_eq!(result.data["omitted"][0]["label"], "Bananas");
        assert_eq!(result.data["omitted"][0]["missing"], "base");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("May 2019"));
    }

    #[test]
    fn table_without_dates_degrades_to_unpriced_basket() {
        let table = read_price_table("Date,APU0000708111 - Eggs\nbad,2.0\n".as_bytes())
            .expect("table");
        let session = Session::from_table(Settings::default(), table);

        let result = run(&args(&["eggs=1"]), &session).expect("compare");

        assert_eq!(result.data["totals"]["base"], 0.0);
        assert_eq!(result.data["totals"]["percentage_change"]["kind"], "infinite");
        assert_eq!(result.data["omitted"][0]["missing"], "both");
        assert!(result.warnings[0].contains("no dated observations"));
    }

    #[test]
    fn base_period_is_required() {
        let mut args = args(&["eggs"]);
        args.base_year = None;

        let err = run(&args, &session()).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn explicit_months_and_history() {
        let mut args = args(&["eggs=2"]);
        args.base_year = None;
        args.base = Some(String::from("2019-05"));
        args.compare = Some(String::from("2024-05"));
        args.history = true;

        let result = run(&args, &session()).expect("compare");

        assert_eq!(result.data["comparison"]["kind"], "month");
        assert_eq!(result.data["history"].as_array().map(Vec::len), Some(2));
        assert!(result.text.expect("text").contains("Basket cost over time"));
    }
}
