//! Basket cost comparison between a base period and a comparison period.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::debug;

use crate::selector::{select_prices, PeriodPrices, Selection};
use crate::{Basket, Period, PriceSeries, Quantity, SeriesId};

/// Relative change between two totals.
///
/// A zero base has no meaningful ratio; it is reported as `Infinite` instead
/// of relying on float division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentChange {
    Finite(f64),
    Infinite,
}

impl PercentChange {
    pub fn as_finite(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Infinite => None,
        }
    }
}

impl Display for PercentChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value:.2}%"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

/// `(comparison - base) / base * 100`, or `Infinite` when `base == 0`.
pub fn percentage_change(base: f64, comparison: f64) -> PercentChange {
    if base == 0.0 {
        return PercentChange::Infinite;
    }
    PercentChange::Finite((comparison - base) / base * 100.0)
}

/// Which side of the comparison lacked a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSide {
    Base,
    Comparison,
    Both,
}

/// Per-item result: priced on both sides, or left out of the totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    Resolved {
        base_price: f64,
        comparison_price: f64,
    },
    Unavailable {
        missing: MissingSide,
    },
}

/// One basket item with its quantity and outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketLine {
    pub item: SeriesId,
    pub quantity: Quantity,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

impl BasketLine {
    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, LineOutcome::Resolved { .. })
    }

    pub fn base_cost(&self) -> Option<f64> {
        match self.outcome {
            LineOutcome::Resolved { base_price, .. } => Some(base_price * self.quantity.as_f64()),
            LineOutcome::Unavailable { .. } => None,
        }
    }

    pub fn comparison_cost(&self) -> Option<f64> {
        match self.outcome {
            LineOutcome::Resolved {
                comparison_price, ..
            } => Some(comparison_price * self.quantity.as_f64()),
            LineOutcome::Unavailable { .. } => None,
        }
    }
}

/// A priced basket item as shown in the per-item breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCost {
    pub item: SeriesId,
    pub quantity: Quantity,
    pub base_price: f64,
    pub comparison_price: f64,
    pub base_cost: f64,
    pub comparison_cost: f64,
}

/// Result of comparing one basket across two periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketComparison {
    pub base: Selection,
    pub comparison: Selection,
    pub lines: Vec<BasketLine>,
    pub base_total: f64,
    pub comparison_total: f64,
    pub difference: f64,
    pub percentage_change: PercentChange,
}

impl BasketComparison {
    /// Items priced on both sides, in basket order.
    pub fn breakdown(&self) -> Vec<ItemCost> {
        self.lines
            .iter()
            .filter_map(|line| match line.outcome {
                LineOutcome::Resolved {
                    base_price,
                    comparison_price,
                } => Some(ItemCost {
                    item: line.item.clone(),
                    quantity: line.quantity,
                    base_price,
                    comparison_price,
                    base_cost: base_price * line.quantity.as_f64(),
                    comparison_cost: comparison_price * line.quantity.as_f64(),
                }),
                LineOutcome::Unavailable { .. } => None,
            })
            .collect()
    }

    /// Items left out of the totals for lack of a price.
    pub fn omitted(&self) -> impl Iterator<Item = &BasketLine> {
        self.lines.iter().filter(|line| !line.is_resolved())
    }
}

/// Compare a basket's cost between a base month and a comparison selection.
///
/// The base period averages every observation in its month; the comparison
/// selection decides its own rows (see [`Selection`]).
pub fn compute_basket_comparison(
    series: &PriceSeries,
    basket: &Basket,
    base_period: Period,
    comparison_period: Selection,
) -> BasketComparison {
    let base = select_prices(series, Selection::Month(base_period));
    let comparison = select_prices(series, comparison_period);
    price_basket(basket, &base, &comparison)
}

/// Price a basket against two already-resolved price sets.
pub fn price_basket(
    basket: &Basket,
    base: &PeriodPrices,
    comparison: &PeriodPrices,
) -> BasketComparison {
    let mut lines = Vec::with_capacity(basket.len());
    let mut base_total = 0.0_f64;
    let mut comparison_total = 0.0_f64;

    for entry in basket.entries() {
        let outcome = match (base.price(&entry.item), comparison.price(&entry.item)) {
            (Some(base_price), Some(comparison_price)) => {
                let amount = entry.quantity.as_f64();
                base_total += base_price * amount;
                comparison_total += comparison_price * amount;
                LineOutcome::Resolved {
                    base_price,
                    comparison_price,
                }
            }
            (None, Some(_)) => LineOutcome::Unavailable {
                missing: MissingSide::Base,
            },
            (Some(_), None) => LineOutcome::Unavailable {
                missing: MissingSide::Comparison,
            },
            (None, None) => LineOutcome::Unavailable {
                missing: MissingSide::Both,
            },
        };

        if let LineOutcome::Unavailable { missing } = outcome {
            debug!(item = %entry.item, ?missing, "item left out of basket totals");
        }

        lines.push(BasketLine {
            item: entry.item.clone(),
            quantity: entry.quantity,
            outcome,
        });
    }

    BasketComparison {
        base: base.selection(),
        comparison: comparison.selection(),
        lines,
        base_total,
        comparison_total,
        difference: comparison_total - base_total,
        percentage_change: percentage_change(base_total, comparison_total),
    }
}
