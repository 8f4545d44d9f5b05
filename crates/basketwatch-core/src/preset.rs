//! Hardcoded convenience baskets.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::{Basket, Quantity, SeriesId, ValidationError};

/// A named basket with fixed items and quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [(&'static str, u32)],
}

impl Preset {
    /// Weekly groceries for an average family of four.
    pub const FAMILY_OF_FOUR: Self = Self {
        name: "family-of-four",
        description: "Weekly groceries for an average family of four",
        items: &[
            ("APU0000708111", 2),
            ("APU0000709112", 3),
            ("APU0000702111", 2),
            ("APU0000703112", 2),
            ("APU0000706111", 3),
            ("APU0000710212", 1),
            ("APU0000711211", 3),
            ("APU0000711311", 2),
            ("APU0000712311", 2),
            ("APU0000712112", 5),
            ("APU0000717311", 1),
        ],
    };

    pub const ALL: [Self; 1] = [Self::FAMILY_OF_FOUR];

    pub fn basket(&self) -> Result<Basket, ValidationError> {
        self.items
            .iter()
            .map(|(id, quantity)| {
                Ok::<_, ValidationError>((SeriesId::parse(id)?, Quantity::new(*quantity)))
            })
            .collect()
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name == wanted)
            .ok_or_else(|| ValidationError::UnknownPreset {
                value: value.to_owned(),
                expected: Self::ALL
                    .iter()
                    .map(|preset| preset.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
