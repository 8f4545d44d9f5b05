//! In-memory price table: tracked items and dated observations.

use std::collections::HashSet;

use time::Date;
use tracing::debug;

use crate::{Period, SeriesId, SeriesInfo, ValidationError};

/// A single table row before dates are ordered and merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    /// `None` when the row's date could not be parsed.
    pub date: Option<Date>,
    /// One cell per tracked item, in item order. `None` is a missing value.
    pub prices: Vec<Option<f64>>,
}

/// Average prices of every tracked item on one date.
///
/// Each column keeps the sum and the number of rows it merged, so averages
/// over several dates still weight every source row equally.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    date: Date,
    columns: Vec<ColumnTally>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ColumnTally {
    pub(crate) sum: f64,
    pub(crate) rows: usize,
}

impl ColumnTally {
    fn add(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            rows: self.rows + other.rows,
        }
    }

    fn mean(self) -> Option<f64> {
        (self.rows > 0).then(|| self.sum / self.rows as f64)
    }
}

impl Observation {
    pub fn date(&self) -> Date {
        self.date
    }

    /// Price of the item at `index` (see [`PriceSeries::column_index`]).
    pub fn price(&self, index: usize) -> Option<f64> {
        self.columns.get(index).and_then(|column| column.mean())
    }

    /// Source rows behind the price at `index`.
    pub fn rows(&self, index: usize) -> usize {
        self.columns.get(index).map_or(0, |column| column.rows)
    }

    pub(crate) fn tally(&self, index: usize) -> ColumnTally {
        self.columns.get(index).copied().unwrap_or_default()
    }
}

/// Time series of average prices, sorted by date with unique dates.
///
/// Rows sharing a date are merged by averaging each item over the rows that
/// carry a value for it. Rows without a usable date are counted but never
/// take part in period selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    items: Vec<SeriesInfo>,
    observations: Vec<Observation>,
    undated_rows: usize,
}

impl PriceSeries {
    pub fn new(
        items: Vec<SeriesInfo>,
        rows: impl IntoIterator<Item = RawObservation>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(ValidationError::DuplicateSeriesId {
                    value: item.id.to_string(),
                });
            }
        }

        let width = items.len();
        let mut undated_rows = 0usize;
        let mut dated = Vec::new();
        for mut row in rows {
            let Some(date) = row.date else {
                undated_rows += 1;
                continue;
            };
            row.prices.resize(width, None);
            let prices = row
                .prices
                .into_iter()
                .map(|price| price.filter(|value| value.is_finite()))
                .collect::<Vec<_>>();
            dated.push((date, prices));
        }

        dated.sort_by_key(|(date, _)| *date);
        let observations = merge_same_day(dated, width);
        debug!(
            items = width,
            observations = observations.len(),
            undated_rows,
            "built price series"
        );

        Ok(Self {
            items,
            observations,
            undated_rows,
        })
    }

    pub fn items(&self) -> &[SeriesInfo] {
        &self.items
    }

    pub fn item(&self, id: &SeriesId) -> Option<&SeriesInfo> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn column_index(&self, id: &SeriesId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Display label for an item, falling back to its identifier.
    pub fn label<'a>(&'a self, id: &'a SeriesId) -> &'a str {
        self.item(id)
            .map(|item| item.label.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    /// Find an item by identifier or label, ignoring case.
    pub fn resolve_item(&self, reference: &str) -> Option<&SeriesInfo> {
        let reference = reference.trim();
        self.items
            .iter()
            .find(|item| item.id.as_str() == reference)
            .or_else(|| {
                self.items
                    .iter()
                    .find(|item| item.id.as_str().eq_ignore_ascii_case(reference))
            })
            .or_else(|| {
                let lowered = reference.to_lowercase();
                self.items
                    .iter()
                    .find(|item| item.label.to_lowercase() == lowered)
            })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn undated_rows(&self) -> usize {
        self.undated_rows
    }

    pub fn latest_date(&self) -> Option<Date> {
        self.observations.last().map(Observation::date)
    }

    /// Distinct months with at least one observation, ascending.
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = Vec::new();
        for observation in &self.observations {
            let period = Period::of(observation.date);
            if periods.last() != Some(&period) {
                periods.push(period);
            }
        }
        periods
    }
}

fn merge_same_day(sorted: Vec<(Date, Vec<Option<f64>>)>, width: usize) -> Vec<Observation> {
    let mut merged: Vec<Observation> = Vec::with_capacity(sorted.len());
    let mut index = 0;
    while index < sorted.len() {
        let date = sorted[index].0;
        let end = sorted[index..]
            .iter()
            .position(|(other, _)| *other != date)
            .map_or(sorted.len(), |offset| index + offset);

        let columns = (0..width)
            .map(|column| {
                sorted[index..end]
                    .iter()
                    .filter_map(|(_, prices)| prices[column])
                    .map(|price| ColumnTally {
                        sum: price,
                        rows: 1,
                    })
                    .fold(ColumnTally::default(), ColumnTally::add)
            })
            .collect();

        merged.push(Observation { date, columns });
        index = end;
    }
    merged
}

/// Mean over every source row behind the tallies, `None` when there are none.
pub(crate) fn pooled_mean(tallies: impl Iterator<Item = ColumnTally>) -> Option<f64> {
    tallies.fold(ColumnTally::default(), ColumnTally::add).mean()
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    fn info(id: &str) -> SeriesInfo {
        SeriesInfo::from_header(id).expect("valid header")
    }

    fn day(year: i32, month: Month, day: u8) -> Option<Date> {
        Some(Date::from_calendar_date(year, month, day).expect("valid date"))
    }

    #[test]
    fn sorts_observations_by_date() {
        let series = PriceSeries::new(
            vec![info("eggs")],
            vec![
                RawObservation {
                    date: day(2021, Month::May, 1),
                    prices: vec![Some(2.0)],
                },
                RawObservation {
                    date: day(2020, Month::May, 1),
                    prices: vec![Some(1.0)],
                },
            ],
        )
        .expect("series");

        let dates = series
            .observations()
            .iter()
            .map(Observation::date)
            .collect::<Vec<_>>();
        assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(series.latest_date(), day(2021, Month::May, 1));
    }

    #[test]
    fn averages_duplicate_dates_per_column() {
        let series = PriceSeries::new(
            vec![info("eggs"), info("milk")],
            vec![
                RawObservation {
                    date: day(2020, Month::May, 1),
                    prices: vec![Some(2.0), None],
                },
                RawObservation {
                    date: day(2020, Month::May, 1),
                    prices: vec![Some(4.0), Some(3.5)],
                },
            ],
        )
        .expect("series");

        assert_eq!(series.observations().len(), 1);
        let observation = &series.observations()[0];
        assert_eq!(observation.price(0), Some(3.0));
        assert_eq!(observation.price(1), Some(3.5));
        assert_eq!(observation.rows(0), 2);
        assert_eq!(observation.rows(1), 1);
    }

    #[test]
    fn counts_undated_rows_separately() {
        let series = PriceSeries::new(
            vec![info("eggs")],
            vec![
                RawObservation {
                    date: None,
                    prices: vec![Some(9.0)],
                },
                RawObservation {
                    date: day(2020, Month::May, 1),
                    prices: vec![Some(2.0)],
                },
            ],
        )
        .expect("series");

        assert_eq!(series.undated_rows(), 1);
        assert_eq!(series.observations().len(), 1);
    }

    #[test]
    fn rejects_duplicate_items() {
        let err = PriceSeries::new(vec![info("eggs"), info("eggs")], Vec::new())
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateSeriesId { .. }));
    }

    #[test]
    fn resolves_items_by_id_or_label() {
        let series = PriceSeries::new(
            vec![SeriesInfo::from_header("APU0000708111 - Eggs").expect("valid")],
            Vec::new(),
        )
        .expect("series");

        assert!(series.resolve_item("APU0000708111").is_some());
        assert!(series.resolve_item("apu0000708111").is_some());
        assert!(series.resolve_item("eggs").is_some());
        assert!(series.resolve_item("milk").is_none());
    }

    #[test]
    fn lists_distinct_periods() {
        let series = PriceSeries::new(
            vec![info("eggs")],
            vec![
                RawObservation {
                    date: day(2020, Month::May, 1),
                    prices: vec![Some(1.0)],
                },
                RawObservation {
                    date: day(2020, Month::May, 15),
                    prices: vec![Some(1.0)],
                },
                RawObservation {
                    date: day(2020, Month::June, 1),
                    prices: vec![Some(1.0)],
                },
            ],
        )
        .expect("series");

        let periods = series.periods();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].to_string(), "2020-05");
        assert_eq!(periods[1].to_string(), "2020-06");
    }
}
