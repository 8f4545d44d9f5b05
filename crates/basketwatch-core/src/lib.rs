//! # Basketwatch Core
//!
//! Core contracts and calculations for the basketwatch cost-of-living toolkit.
//!
//! ## Overview
//!
//! Given a table of monthly average prices, basketwatch answers one
//! question: how much more (or less) does my basket of goods cost now than it
//! did in a base year?
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`basket`] | Basket calculator and percentage change |
//! | [`catalog`] | Known price series and citations |
//! | [`config`] | Settings and defaults |
//! | [`domain`] | Domain models (SeriesId, Period, Quantity, Basket) |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`history`] | Basket cost over time |
//! | [`ingest`] | CSV price table loading |
//! | [`preset`] | Hardcoded convenience baskets |
//! | [`selector`] | Period selection and averaging |
//! | [`series`] | Sorted, merged price series |
//! | [`session`] | Request-scoped calculation state |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use basketwatch_core::{Session, Settings, ItemSpec};
//!
//! let session = Session::open(Settings::default())?;
//! let basket = session.resolve_basket(&["eggs=12".parse()?, "milk=6".parse()?])?;
//! let base = session.base_period(2019)?;
//! if let Some(comparison) = session.default_comparison() {
//!     let result = session.compare(&basket, base, comparison);
//!     println!("change: {}", result.percentage_change);
//! }
//! ```
//!
//! ## Degradation
//!
//! Calculations never fail on bad data. Rows with unparsable dates drop out
//! of every period, items without a price become [`LineOutcome::Unavailable`],
//! and a zero base total yields [`PercentChange::Infinite`].

pub mod basket;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod history;
pub mod ingest;
pub mod preset;
pub mod selector;
pub mod series;
pub mod session;

pub use basket::{
    compute_basket_comparison, percentage_change, price_basket, BasketComparison, BasketLine,
    ItemCost, LineOutcome, MissingSide, PercentChange,
};
pub use catalog::CatalogEntry;
pub use config::Settings;
pub use domain::{
    format_iso_date, parse_observation_date, Basket, BasketEntry, ItemSpec, Period, Quantity,
    SeriesId, SeriesInfo, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, IngestError, ValidationError};
pub use history::{cost_history, CostPoint};
pub use ingest::{load_price_table, read_price_table, IngestReport, LoadedTable};
pub use preset::Preset;
pub use selector::{comparison_date, select_prices, PeriodPrices, Selection};
pub use series::{Observation, PriceSeries, RawObservation};
pub use session::Session;
