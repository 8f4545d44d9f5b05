use std::io::Write;

use basketwatch_core::{EnvelopeError, EnvelopeMeta, SeriesId, UtcDateTime};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamEventType {
    Start,
    Chunk,
    Warning,
    Error,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEventError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<SeriesId>,
}

impl From<&EnvelopeError> for StreamEventError {
    fn from(error: &EnvelopeError) -> Self {
        Self {
            code: error.code.clone(),
            message: error.message.clone(),
            item: error.item.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamEvent {
    pub event: StreamEventType,
    pub seq: u64,
    pub ts: UtcDateTime,
    /// Data section a chunk belongs to, such as `items` or `summary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StreamEventError>,
}

/// Writes one JSON event per line, numbering events from 1.
///
/// A stream is `start`, then `chunk` events, then any `warning` and `error`
/// events, then `end` with the counts of both.
pub struct NdjsonStreamWriter<W: Write> {
    writer: W,
    next_seq: u64,
    warnings: usize,
    errors: usize,
}

impl<W: Write> NdjsonStreamWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_seq: 1,
            warnings: 0,
            errors: 0,
        }
    }

    pub fn emit_start(&mut self, meta: &EnvelopeMeta) -> Result<(), CliError> {
        let data = json!({
            "request_id": meta.request_id,
            "schema_version": meta.schema_version,
            "generated_at": meta.generated_at,
            "dataset": meta.dataset,
        });
        self.emit(StreamEventType::Start, None, Some(data), None)
    }

    pub fn emit_chunk(&mut self, section: &str, row: Value) -> Result<(), CliError> {
        self.emit(StreamEventType::Chunk, Some(section.to_owned()), Some(row), None)
    }

    pub fn emit_warning(&mut self, message: &str) -> Result<(), CliError> {
        self.warnings += 1;
        let data = json!({ "message": message });
        self.emit(StreamEventType::Warning, None, Some(data), None)
    }

    pub fn emit_error(&mut self, error: &EnvelopeError) -> Result<(), CliError> {
        self.errors += 1;
        self.emit(StreamEventType::Error, None, None, Some(error.into()))
    }

    /// Close the stream; the status is `error` once any error was emitted.
    pub fn emit_end(&mut self) -> Result<(), CliError> {
        let data = json!({
            "status": if self.errors == 0 { "ok" } else { "error" },
            "warning_count": self.warnings,
            "error_count": self.errors,
        });
        self.emit(StreamEventType::End, None, Some(data), None)
    }

    fn emit(
        &mut self,
        event: StreamEventType,
        section: Option<String>,
        data: Option<Value>,
        error: Option<StreamEventError>,
    ) -> Result<(), CliError> {
        let event = StreamEvent {
            event,
            seq: self.next_seq,
            ts: UtcDateTime::now(),
            section,
            data,
            error,
        };
        self.next_seq += 1;

        let payload = serde_json::to_string(&event)?;
        self.writer.write_all(payload.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
