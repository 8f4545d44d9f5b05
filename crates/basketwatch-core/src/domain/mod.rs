//! # Domain Models
//!
//! Canonical domain types for basket cost comparison.
//!
//! All types validate their invariants at construction, so a calculation
//! never sees a malformed identifier, period, or quantity.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SeriesId`] | Stable price-series identifier |
//! | [`SeriesInfo`] | Identifier plus display label |
//! | [`Period`] | Year and month |
//! | [`Quantity`] | Whole, non-negative item amount |
//! | [`Basket`] | Ordered (item, quantity) selection |
//! | [`UtcDateTime`] | UTC timestamp for envelopes |

mod calendar;
mod models;
mod period;
mod series_id;
mod timestamp;

pub use calendar::{format_iso_date, parse_observation_date};
pub use models::{Basket, BasketEntry, ItemSpec, Quantity};
pub use period::{month_from_number, Period};
pub use series_id::{SeriesId, SeriesInfo};
pub use timestamp::UtcDateTime;
