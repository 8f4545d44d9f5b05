//! Basket cost over time, one point per month with data.

use serde::Serialize;

use crate::selector::{select_prices, Selection};
use crate::{Basket, Period, PriceSeries};

/// Basket cost for a single month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPoint {
    pub period: Period,
    pub cost: f64,
    /// How many basket items had a price that month.
    pub priced_items: usize,
}

/// Cost of the basket in every month of the series, ascending.
///
/// Items without a price in a month add nothing to that month's cost.
pub fn cost_history(series: &PriceSeries, basket: &Basket) -> Vec<CostPoint> {
    series
        .periods()
        .into_iter()
        .map(|period| {
            let prices = select_prices(series, Selection::Month(period));
            let (cost, priced_items) = basket
                .entries()
                .iter()
                .filter_map(|entry| {
                    prices
                        .price(&entry.item)
                        .map(|price| price * entry.quantity.as_f64())
                })
                .fold((0.0_f64, 0usize), |(cost, count), line| (cost + line, count + 1));

            CostPoint {
                period,
                cost,
                priced_items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{Date, Month};

    use super::*;
    use crate::series::RawObservation;
    use crate::{Quantity, SeriesId, SeriesInfo};

    fn row(year: i32, month: Month, prices: Vec<Option<f64>>) -> RawObservation {
        RawObservation {
            date: Some(Date::from_calendar_date(year, month, 1).expect("valid date")),
            prices,
        }
    }

    #[test]
    fn one_point_per_month_in_order() {
        let series = PriceSeries::new(
            vec![
                SeriesInfo::from_header("eggs").expect("valid"),
                SeriesInfo::from_header("milk").expect("valid"),
            ],
            vec![
                row(2021, Month::May, vec![Some(3.0), None]),
                row(2020, Month::May, vec![Some(2.0), Some(4.0)]),
            ],
        )
        .expect("series");
        let basket = Basket::new()
            .with(SeriesId::parse("eggs").expect("valid"), Quantity::new(2))
            .with(SeriesId::parse("milk").expect("valid"), Quantity::new(1));

        let history = cost_history(&series, &basket);

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].period.to_string(), "2020-05");
        assert_eq!(history[0].cost, 8.0);
        assert_eq!(history[0].priced_items, 2);
        assert_eq!(history[1].cost, 6.0);
        assert_eq!(history[1].priced_items, 1);
    }
}
