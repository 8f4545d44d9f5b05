//! Request-scoped state: the loaded table plus the settings it was read with.

use time::Date;
use tracing::{info, warn};

use crate::basket::{compute_basket_comparison, BasketComparison};
use crate::config::Settings;
use crate::error::CoreError;
use crate::history::{cost_history, CostPoint};
use crate::ingest::{load_price_table, IngestReport, LoadedTable};
use crate::selector::{comparison_date, Selection};
use crate::{Basket, ItemSpec, Period, PriceSeries, UtcDateTime, ValidationError};

/// Everything one calculation needs, passed explicitly instead of held globally.
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    series: PriceSeries,
    report: IngestReport,
}

impl Session {
    /// Load the configured price table.
    pub fn open(settings: Settings) -> Result<Self, CoreError> {
        let table = load_price_table(&settings.data_path)?;
        info!(
            path = %settings.data_path.display(),
            items = table.series.items().len(),
            observations = table.series.observations().len(),
            "session opened"
        );
        Ok(Self::from_table(settings, table))
    }

    pub fn from_table(settings: Settings, table: LoadedTable) -> Self {
        Self {
            settings,
            series: table.series,
            report: table.report,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Match item specs against the loaded series.
    pub fn resolve_basket(&self, specs: &[ItemSpec]) -> Result<Basket, ValidationError> {
        if specs.is_empty() {
            return Err(ValidationError::EmptyBasket);
        }

        let mut basket = Basket::new();
        for spec in specs {
            let item = self.series.resolve_item(&spec.reference).ok_or_else(|| {
                ValidationError::UnknownItem {
                    value: spec.reference.clone(),
                }
            })?;
            basket.add(item.id.clone(), spec.quantity);
        }
        Ok(basket)
    }

    /// Base period for a year in the configured reference month.
    pub fn base_period(&self, year: i32) -> Result<Period, ValidationError> {
        Period::new(year, u8::from(self.settings.reference_month))
    }

    pub fn comparison_date(&self) -> Option<Date> {
        comparison_date(&self.series, self.settings.reference_month)
    }

    /// Default comparison: the exact comparison date, when the data has one.
    pub fn default_comparison(&self) -> Option<Selection> {
        self.comparison_date().map(Selection::Exact)
    }

    /// Comparison used when the table has no dated rows: the first day of the
    /// reference month in the current year. Every item ends up unpriced.
    pub fn fallback_comparison(&self) -> Selection {
        let today = UtcDateTime::now().date();
        let selection = Date::from_calendar_date(today.year(), self.settings.reference_month, 1)
            .map_or_else(|_| Selection::Month(Period::of(today)), Selection::Exact);
        warn!(
            comparison = %selection.label(),
            "no dated observations; using fallback comparison"
        );
        selection
    }

    /// Years whose reference month has observations, ascending.
    ///
    /// Restricted to the configured base-year window unless `include_all`.
    pub fn base_years(&self, include_all: bool) -> Vec<i32> {
        let month = self.settings.reference_month;
        let mut years = self
            .series
            .periods()
            .into_iter()
            .filter(|period| period.month() == month)
            .map(Period::year)
            .filter(|year| include_all || self.settings.base_years.contains(year))
            .collect::<Vec<_>>();
        years.dedup();
        years
    }

    pub fn compare(
        &self,
        basket: &Basket,
        base: Period,
        comparison: Selection,
    ) -> BasketComparison {
        compute_basket_comparison(&self.series, basket, base, comparison)
    }

    pub fn history(&self, basket: &Basket) -> Vec<CostPoint> {
        cost_history(&self.series, basket)
    }
}
