use std::fmt::Write;

use basketwatch_core::{catalog, Preset};
use serde::Serialize;

use crate::cli::PresetsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PresetsResponseData {
    presets: Vec<PresetRow>,
}

#[derive(Debug, Serialize)]
struct PresetRow {
    name: &'static str,
    description: &'static str,
    items: Vec<PresetItem>,
}

#[derive(Debug, Serialize)]
struct PresetItem {
    item: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'static str>,
    quantity: u32,
}

pub fn run(args: &PresetsArgs) -> Result<CommandResult, CliError> {
    let selected = match &args.name {
        Some(name) => vec![name.parse::<Preset>()?],
        None => Preset::ALL.to_vec(),
    };

    let presets = selected
        .into_iter()
        .map(|preset| PresetRow {
            name: preset.name,
            description: preset.description,
            items: preset
                .items
                .iter()
                .map(|(id, quantity)| PresetItem {
                    item: *id,
                    label: catalog::CATALOG
                        .iter()
                        .find(|entry| entry.series_id == *id)
                        .map(|entry| entry.label),
                    quantity: *quantity,
                })
                .collect(),
        })
        .collect();

    let data = PresetsResponseData { presets };
    let text = render_text(&data);
    Ok(CommandResult::ok(serde_json::to_value(&data)?).with_text(text))
}

fn render_text(data: &PresetsResponseData) -> String {
    let mut out = String::new();
    for preset in &data.presets {
        let _ = writeln!(out, "{} - {}", preset.name, preset.description);
        for item in &preset.items {
            let _ = writeln!(
                out,
                "  {:>3} x {}",
                item.quantity,
                item.label.unwrap_or(item.item)
            );
        }
    }
    out
}
