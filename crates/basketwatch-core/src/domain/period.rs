use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::ValidationError;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Calendar month of a specific year, the unit prices are averaged over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    pub fn new(year: i32, month: u8) -> Result<Self, ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear { value: year });
        }
        let month = month_from_number(month)?;
        Ok(Self { year, month })
    }

    /// Period a calendar date falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> Month {
        self.month
    }

    pub fn month_number(self) -> u8 {
        u8::from(self.month)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(self) -> Date {
        // Day 1 exists in every month and the year range is checked in `new`.
        Date::from_calendar_date(self.year, self.month, 1).unwrap_or(Date::MIN)
    }

    /// Human label such as `May 2019`.
    pub fn label(self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Validate a 1-based month number.
pub fn month_from_number(value: u8) -> Result<Month, ValidationError> {
    Month::try_from(value).map_err(|_| ValidationError::InvalidMonth { value })
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month_number()).cmp(&(other.year, other.month_number()))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_number())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPeriod {
            value: value.to_owned(),
        };

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value).map_err(D::Error::custom)
    }
}
