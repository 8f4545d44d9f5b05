use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SeriesId, ValidationError};

/// Amount of an item in a basket: a whole, non-negative count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parse user input, rejecting negative and fractional amounts.
    ///
    /// Whole values written with a fraction part (`3.0`) are accepted.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value = trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidQuantity {
                value: input.to_owned(),
            })?;

        if value < 0.0 {
            return Err(ValidationError::NegativeQuantity {
                value: input.to_owned(),
            });
        }
        if value.fract() != 0.0 {
            return Err(ValidationError::FractionalQuantity {
                value: input.to_owned(),
            });
        }
        if value > f64::from(u32::MAX) {
            return Err(ValidationError::InvalidQuantity {
                value: input.to_owned(),
            });
        }

        Ok(Self(value as u32))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Raw `ID` or `ID=QTY` item request before it is matched against a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub reference: String,
    pub quantity: Quantity,
}

impl FromStr for ItemSpec {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (reference, quantity) = match value.rsplit_once('=') {
            Some((reference, quantity)) => (reference, Quantity::parse(quantity)?),
            None => (value, Quantity::ONE),
        };

        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ValidationError::InvalidItemSpec {
                value: value.to_owned(),
            });
        }

        Ok(Self {
            reference: reference.to_owned(),
            quantity,
        })
    }
}

/// One requested item and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketEntry {
    pub item: SeriesId,
    pub quantity: Quantity,
}

/// The user's selection: ordered (item, quantity) pairs, unique by item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Basket {
    entries: Vec<BasketEntry>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, summing quantities when the item is already present.
    pub fn add(&mut self, item: SeriesId, quantity: Quantity) {
        match self.entries.iter_mut().find(|entry| entry.item == item) {
            Some(entry) => {
                entry.quantity = Quantity(entry.quantity.0.saturating_add(quantity.0));
            }
            None => self.entries.push(BasketEntry { item, quantity }),
        }
    }

    pub fn with(mut self, item: SeriesId, quantity: Quantity) -> Self {
        self.add(item, quantity);
        self
    }

    pub fn entries(&self) -> &[BasketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SeriesId, Quantity)> for Basket {
    fn from_iter<I: IntoIterator<Item = (SeriesId, Quantity)>>(iter: I) -> Self {
        let mut basket = Self::new();
        for (item, quantity) in iter {
            basket.add(item, quantity);
        }
        basket
    }
}
