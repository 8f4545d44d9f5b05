//! Period selection: which observations price a basket, and at what average.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use time::{Date, Month};
use tracing::debug;

use crate::domain::format_iso_date;
use crate::series::pooled_mean;
use crate::{Period, PriceSeries, SeriesId};

/// Rows a price lookup averages over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every observation dated within the month.
    Month(Period),
    /// Only observations dated exactly on the day.
    Exact(Date),
}

impl Selection {
    pub fn matches(self, date: Date) -> bool {
        match self {
            Self::Month(period) => period.contains(date),
            Self::Exact(day) => day == date,
        }
    }

    pub fn period(self) -> Period {
        match self {
            Self::Month(period) => period,
            Self::Exact(day) => Period::of(day),
        }
    }

    /// Human label such as `May 2019` or `May 1, 2024`.
    pub fn label(self) -> String {
        match self {
            Self::Month(period) => period.label(),
            Self::Exact(day) => format!("{} {}, {}", day.month(), day.day(), day.year()),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Selection", 3)?;
        match self {
            Self::Month(period) => {
                state.serialize_field("kind", "month")?;
                state.serialize_field("value", &period.to_string())?;
            }
            Self::Exact(day) => {
                state.serialize_field("kind", "date")?;
                state.serialize_field("value", &format_iso_date(*day))?;
            }
        }
        state.serialize_field("label", &self.label())?;
        state.end()
    }
}

/// Unit prices resolved for one selection. Items without a price are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodPrices {
    selection: Selection,
    matched_dates: usize,
    prices: BTreeMap<SeriesId, f64>,
}

impl PeriodPrices {
    /// Build a price set from prices averaged elsewhere over `matched_dates`
    /// observation dates.
    pub fn from_prices(
        selection: Selection,
        matched_dates: usize,
        prices: impl IntoIterator<Item = (SeriesId, f64)>,
    ) -> Self {
        let prices = prices
            .into_iter()
            .filter(|(_, price)| price.is_finite())
            .collect::<BTreeMap<_, _>>();
        Self {
            selection,
            matched_dates,
            prices,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Distinct observation dates the selection matched.
    pub fn matched_dates(&self) -> usize {
        self.matched_dates
    }

    pub fn price(&self, item: &SeriesId) -> Option<f64> {
        self.prices.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Average every item over the observations the selection matches.
///
/// Each item's mean only counts rows that carry a value for it, and every
/// source row weighs the same even when rows share a date. When no row
/// matches, or a column is blank in every matching row, that item is absent.
pub fn select_prices(series: &PriceSeries, selection: Selection) -> PeriodPrices {
    let matching = series
        .observations()
        .iter()
        .filter(|observation| selection.matches(observation.date()))
        .collect::<Vec<_>>();

    let prices = series
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            pooled_mean(matching.iter().map(|observation| observation.tally(index)))
                .map(|price| (item.id.clone(), price))
        })
        .collect::<BTreeMap<_, _>>();

    debug!(
        selection = %selection.label(),
        matched_dates = matching.len(),
        priced_items = prices.len(),
        "selected period prices"
    );

    PeriodPrices {
        selection,
        matched_dates: matching.len(),
        prices,
    }
}

/// The comparison date: first day of the reference month in the latest year
/// that has any dated observation.
///
/// Returns `None` when the series has no dated observations.
pub fn comparison_date(series: &PriceSeries, reference_month: Month) -> Option<Date> {
    let latest_year = series.latest_date()?.year();
    Date::from_calendar_date(latest_year, reference_month, 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::RawObservation;
    use crate::SeriesInfo;

    fn day(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).expect("valid date")
    }

    fn series() -> PriceSeries {
        PriceSeries::new(
            vec![
                SeriesInfo::from_header("eggs").expect("valid"),
                SeriesInfo::from_header("milk").expect("valid"),
            ],
            vec![
                RawObservation {
                    date: Some(day(2019, Month::May, 1)),
                    prices: vec![Some(2.0), Some(3.0)],
                },
                RawObservation {
                    date: Some(day(2019, Month::May, 20)),
                    prices: vec![Some(4.0), None],
                },
                RawObservation {
                    date: Some(day(2024, Month::May, 1)),
                    prices: vec![Some(3.0), Some(4.0)],
                },
                RawObservation {
                    date: Some(day(2024, Month::August, 1)),
                    prices: vec![Some(5.0), Some(5.0)],
                },
            ],
        )
        .expect("series")
    }

    fn id(value: &str) -> SeriesId {
        SeriesId::parse(value).expect("valid id")
    }

    #[test]
    fn month_selection_averages_matching_rows() {
        let period = Period::new(2019, 5).expect("valid");
        let prices = select_prices(&series(), Selection::Month(period));

        assert_eq!(prices.matched_dates(), 2);
        assert_eq!(prices.price(&id("eggs")), Some(3.0));
        assert_eq!(prices.price(&id("milk")), Some(3.0));
    }

    #[test]
    fn month_average_weights_rows_that_share_a_date() {
        let series = PriceSeries::new(
            vec![SeriesInfo::from_header("eggs").expect("valid")],
            vec![
                RawObservation {
                    date: Some(day(2019, Month::May, 1)),
                    prices: vec![Some(2.0)],
                },
                RawObservation {
                    date: Some(day(2019, Month::May, 1)),
                    prices: vec![Some(4.0)],
                },
                RawObservation {
                    date: Some(day(2019, Month::May, 20)),
                    prices: vec![Some(6.0)],
                },
            ],
        )
        .expect("series");
        let period = Period::new(2019, 5).expect("valid");

        let month = select_prices(&series, Selection::Month(period));
        assert_eq!(month.matched_dates(), 2);
        assert_eq!(month.price(&id("eggs")), Some(4.0));

        let first = select_prices(&series, Selection::Exact(day(2019, Month::May, 1)));
        assert_eq!(first.price(&id("eggs")), Some(3.0));
    }

    #[test]
    fn empty_month_leaves_every_item_absent() {
        let period = Period::new(2015, 5).expect("valid");
        let prices = select_prices(&series(), Selection::Month(period));

        assert_eq!(prices.matched_dates(), 0);
        assert!(prices.is_empty());
        assert_eq!(prices.price(&id("eggs")), None);
    }

    #[test]
    fn exact_selection_matches_single_day() {
        let prices = select_prices(&series(), Selection::Exact(day(2024, Month::May, 1)));

        assert_eq!(prices.matched_dates(), 1);
        assert_eq!(prices.price(&id("eggs")), Some(3.0));
    }

    #[test]
    fn comparison_date_uses_latest_year_and_reference_month() {
        let date = comparison_date(&series(), Month::May).expect("date");
        assert_eq!(date, day(2024, Month::May, 1));
    }

    #[test]
    fn comparison_date_needs_dated_rows() {
        let empty = PriceSeries::new(
            vec![SeriesInfo::from_header("eggs").expect("valid")],
            vec![RawObservation {
                date: None,
                prices: vec![Some(1.0)],
            }],
        )
        .expect("series");
        assert_eq!(comparison_date(&empty, Month::May), None);
    }

    #[test]
    fn selection_serializes_with_label() {
        let json = serde_json::to_value(Selection::Exact(day(2024, Month::May, 1)))
            .expect("serializes");
        assert_eq!(json["kind"], "date");
        assert_eq!(json["value"], "2024-05-01");
        assert_eq!(json["label"], "May 1, 2024");
    }
}
