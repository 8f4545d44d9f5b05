use std::fmt::Write;

use basketwatch_core::{CostPoint, Quantity, SeriesId, Session};
use serde::Serialize;

use crate::cli::HistoryArgs;
use crate::error::CliError;
use crate::output::chart::{line_chart, ChartPoint};
use crate::output::money;

use super::{item_label, resolve_basket, CommandResult};

const CHART_HEIGHT: usize = 12;

#[derive(Debug, Serialize)]
struct HistoryResponseData {
    items: Vec<BasketItem>,
    points: Vec<CostPoint>,
}

#[derive(Debug, Serialize)]
struct BasketItem {
    item: SeriesId,
    label: String,
    quantity: Quantity,
}

pub fn run(args: &HistoryArgs, session: &Session) -> Result<CommandResult, CliError> {
    let basket = resolve_basket(&args.basket, session)?;
    let points = session.history(&basket);

    let items = basket
        .entries()
        .iter()
        .map(|entry| BasketItem {
            item: entry.item.clone(),
            label: item_label(session, &entry.item),
            quantity: entry.quantity,
        })
        .collect::<Vec<_>>();

    let mut warnings = Vec::new();
    let partial = points
        .iter()
        .filter(|point| point.priced_items < basket.len())
        .count();
    if partial > 0 {
        warnings.push(format!(
            "{partial} of {} months price only part of the basket",
            points.len()
        ));
    }

    let data = HistoryResponseData { items, points };
    let text = render_text(&data);
    Ok(CommandResult::ok(serde_json::to_value(&data)?)
        .with_text(text)
        .with_warnings(warnings))
}

fn render_text(data: &HistoryResponseData) -> String {
    let mut out = String::new();
    let basket = data
        .items
        .iter()
        .map(|item| format!("{} x{}", item.label, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Basket: {basket}");
    let _ = writeln!(out);

    let points = data
        .points
        .iter()
        .map(|point| ChartPoint::new(point.period.to_string(), point.cost))
        .collect::<Vec<_>>();
    out.push_str(&line_chart(&points, CHART_HEIGHT));

    if let (Some(first), Some(last)) = (data.points.first(), data.points.last()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}  {}", first.period.label(), money(first.cost));
        let _ = writeln!(out, "  {}  {}", last.period.label(), money(last.cost));
    }
    out
}
