pub mod chart;
pub mod stream_writer;

use std::io;

use serde_json::{Map, Value};

use self::stream_writer::NdjsonStreamWriter;
use crate::cli::OutputFormat;
use crate::commands::Response;
use crate::error::CliError;

/// Top-level data fields streamed row by row in NDJSON output.
const ROW_SECTIONS: [&str; 6] = ["items", "omitted", "history", "points", "years", "presets"];

pub fn render(response: &Response, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let envelope = &response.envelope;
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let stdout = io::stdout();
            render_stream(response, stdout.lock())?;
        }
        OutputFormat::Table => render_table(response)?,
    }

    Ok(())
}

pub fn render_stream(response: &Response, sink: impl io::Write) -> Result<(), CliError> {
    let envelope = &response.envelope;
    let mut writer = NdjsonStreamWriter::new(sink);
    writer.emit_start(&envelope.meta)?;

    let (rows, summary) = split_rows(&envelope.data);
    for (section, row) in rows {
        writer.emit_chunk(section, row)?;
    }
    if let Some(summary) = summary {
        writer.emit_chunk("summary", summary)?;
    }

    for warning in &envelope.meta.warnings {
        writer.emit_warning(warning)?;
    }
    for error in &envelope.errors {
        writer.emit_error(error)?;
    }

    writer.emit_end()
}

/// Pull row arrays out of the data object; whatever is left is the summary.
fn split_rows(data: &Value) -> (Vec<(&'static str, Value)>, Option<Value>) {
    match data {
        Value::Object(object) => {
            let mut rows = Vec::new();
            let mut summary = Map::new();
            for (key, value) in object {
                let section = ROW_SECTIONS.iter().find(|section| **section == key.as_str());
                match (section, value) {
                    (Some(section), Value::Array(items)) => {
                        rows.extend(items.iter().map(|item| (*section, item.clone())));
                    }
                    _ => {
                        summary.insert(key.clone(), value.clone());
                    }
                }
            }
            let summary = (!summary.is_empty()).then_some(Value::Object(summary));
            (rows, summary)
        }
        Value::Null => (Vec::new(), None),
        other => (Vec::new(), Some(other.clone())),
    }
}

fn render_table(response: &Response) -> Result<(), CliError> {
    let envelope = &response.envelope;

    match &response.text {
        Some(text) => print!("{text}"),
        None if envelope.data.is_null() => {}
        None => {
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            println!("{pretty_data}");
        }
    }

    if !envelope.meta.warnings.is_empty() {
        println!();
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    if !envelope.errors.is_empty() {
        println!();
        println!("errors:");
        for error in &envelope.errors {
            println!("  - {}: {}", error.code, error.message);
        }
    }

    println!();
    println!(
        "dataset: {}  generated_at: {}",
        envelope.meta.dataset, envelope.meta.generated_at
    );

    Ok(())
}

/// Dollar amount at two decimals, sign before the symbol.
pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}
