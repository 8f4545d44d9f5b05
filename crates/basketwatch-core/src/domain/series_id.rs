use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SERIES_ID_LEN: usize = 64;
const LABEL_SEPARATOR: &str = " - ";

/// Stable identifier of a tracked item's price history (e.g. `APU0000708111`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesId(String);

impl SeriesId {
    /// Parse and trim a series identifier. Case is preserved.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySeriesId);
        }

        let len = trimmed.chars().count();
        if len > MAX_SERIES_ID_LEN {
            return Err(ValidationError::SeriesIdTooLong {
                len,
                max: MAX_SERIES_ID_LEN,
            });
        }

        if let Some(index) = trimmed.chars().position(char::is_control) {
            return Err(ValidationError::SeriesIdControlChar { index });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SeriesId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SeriesId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SeriesId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SeriesId> for String {
    fn from(value: SeriesId) -> Self {
        value.0
    }
}

/// A tracked item: identifier plus the label shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub id: SeriesId,
    pub label: String,
}

impl SeriesInfo {
    /// Split a column header of the form `CODE - Label`.
    ///
    /// Headers without the separator use the whole header as both id and label.
    pub fn from_header(header: &str) -> Result<Self, ValidationError> {
        let header = header.trim();
        match header.split_once(LABEL_SEPARATOR) {
            Some((code, label)) if !code.trim().is_empty() && !label.trim().is_empty() => {
                Ok(Self {
                    id: SeriesId::parse(code)?,
                    label: label.trim().to_owned(),
                })
            }
            _ => Ok(Self {
                id: SeriesId::parse(header)?,
                label: header.to_owned(),
            }),
        }
    }
}
