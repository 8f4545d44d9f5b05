use std::fmt::Write;

use basketwatch_core::{catalog, SeriesId, Session};
use serde::Serialize;

use crate::cli::ItemsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ItemsResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    items: Vec<ItemRow>,
}

#[derive(Debug, Serialize)]
struct ItemRow {
    item: SeriesId,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    citation: Option<String>,
}

pub fn run(args: &ItemsArgs, session: &Session) -> Result<CommandResult, CliError> {
    let query = args
        .search
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase);

    let items = session
        .series()
        .items()
        .iter()
        .filter(|info| {
            query.as_deref().is_none_or(|query| {
                info.id.as_str().to_lowercase().contains(query)
                    || info.label.to_lowercase().contains(query)
            })
        })
        .map(|info| {
            let known = catalog::lookup(&info.id);
            ItemRow {
                item: info.id.clone(),
                label: info.label.clone(),
                unit: known.map(|entry| entry.unit),
                citation: known.map(|entry| entry.citation()),
            }
        })
        .collect::<Vec<_>>();

    let mut result = CommandResult::ok(serde_json::Value::Null);
    if items.is_empty() {
        result = result.with_warning(match &query {
            Some(query) => format!("no tracked item matches '{query}'"),
            None => String::from("price table tracks no items"),
        });
    }

    let data = ItemsResponseData { query, items };
    result.data = serde_json::to_value(&data)?;
    Ok(result.with_text(render_text(&data)))
}

fn render_text(data: &ItemsResponseData) -> String {
    let mut out = String::new();
    let id_width = data
        .items
        .iter()
        .map(|row| row.item.as_str().len())
        .max()
        .unwrap_or(0)
        .max("Series".len());

    let _ = writeln!(out, "  {:<id_width$}  Item", "Series");
    for row in &data.items {
        match row.unit {
            Some(unit) => {
                let _ = writeln!(out, "  {:<id_width$}  {} ({unit})", row.item, row.label);
            }
            None => {
                let _ = writeln!(out, "  {:<id_width$}  {}", row.item, row.label);
            }
        }
    }

    let citations = data
        .items
        .iter()
        .filter_map(|row| row.citation.as_deref())
        .collect::<Vec<_>>();
    if !citations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sources:");
        for citation in citations {
            let _ = writeln!(out, "  {citation}");
        }
    }
    out
}
