//! Runtime settings and their built-in defaults.
//!
//! Defaults live here; the CLI layers environment variables and flags on top.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use time::Month;

use crate::domain::month_from_number;
use crate::ValidationError;

pub const DEFAULT_DATA_FILE: &str = "May2020_Full_City.csv";
pub const DEFAULT_REFERENCE_MONTH: u8 = 5;
pub const DEFAULT_FIRST_BASE_YEAR: i32 = 2014;
pub const DEFAULT_LAST_BASE_YEAR: i32 = 2023;
pub const SCHEMA_VERSION: &str = "v1.0.0";

pub const DATA_ENV: &str = "BASKETWATCH_DATA";
pub const REFERENCE_MONTH_ENV: &str = "BASKETWATCH_REFERENCE_MONTH";

/// Settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub reference_month: Month,
    pub base_years: RangeInclusive<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            reference_month: Month::May,
            base_years: DEFAULT_FIRST_BASE_YEAR..=DEFAULT_LAST_BASE_YEAR,
        }
    }
}

impl Settings {
    pub fn new(
        data_path: impl Into<PathBuf>,
        reference_month: u8,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            data_path: data_path.into(),
            reference_month: month_from_number(reference_month)?,
            ..Self::default()
        })
    }
}
