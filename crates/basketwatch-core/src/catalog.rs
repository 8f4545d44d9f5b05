//! Static catalog of U.S. city-average price series, used for citations.

use serde::Serialize;

use crate::SeriesId;

const PUBLISHER: &str = "U.S. Bureau of Labor Statistics";
const SERIES_URL: &str = "https://fred.stlouisfed.org/series";

/// A known average-price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub series_id: &'static str,
    pub unit: &'static str,
}

impl CatalogEntry {
    /// Source attribution shown next to an item.
    pub fn citation(&self) -> String {
        format!(
            "{PUBLISHER}, Average Price: {} ({}) in U.S. City Average [{}], retrieved from FRED, Federal Reserve Bank of St. Louis; {SERIES_URL}/{}",
            self.label, self.unit, self.series_id, self.series_id
        )
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        label: "Eggs, Grade A, Large",
        series_id: "APU0000708111",
        unit: "per dozen",
    },
    CatalogEntry {
        label: "Milk, Fresh, Whole, Fortified",
        series_id: "APU0000709112",
        unit: "per gallon",
    },
    CatalogEntry {
        label: "Bread, White, Pan",
        series_id: "APU0000702111",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Ground Beef, 100% Beef",
        series_id: "APU0000703112",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Chicken, Fresh, Whole",
        series_id: "APU0000706111",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Chicken Breast, Boneless",
        series_id: "APU0000FF1101",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Bacon, Sliced",
        series_id: "APU0000704111",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Cheddar Cheese, Natural",
        series_id: "APU0000710212",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Butter, Stick",
        series_id: "APU0000FS1101",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Bananas",
        series_id: "APU0000711211",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Apples, Red Delicious",
        series_id: "APU0000711111",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Oranges, Navel",
        series_id: "APU0000711311",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Tomatoes, Field Grown",
        series_id: "APU0000712311",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Potatoes, White",
        series_id: "APU0000712112",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Flour, White, All Purpose",
        series_id: "APU0000701111",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Sugar, White, All Sizes",
        series_id: "APU0000715211",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Coffee, 100%, Ground Roast",
        series_id: "APU0000717311",
        unit: "per pound",
    },
    CatalogEntry {
        label: "Gasoline, Unleaded Regular",
        series_id: "APU000074714",
        unit: "per gallon",
    },
];

/// Catalog entry for a series id, if the series is a known one.
pub fn lookup(id: &SeriesId) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|entry| entry.series_id.eq_ignore_ascii_case(id.as_str()))
}

/// Catalog entry whose label matches, ignoring case.
pub fn lookup_label(label: &str) -> Option<&'static CatalogEntry> {
    let label = label.trim();
    CATALOG
        .iter()
        .find(|entry| entry.label.eq_ignore_ascii_case(label))
}
