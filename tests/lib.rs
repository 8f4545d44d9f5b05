//! Shared fixtures for basketwatch behavior tests.

use std::fs;
use std::path::PathBuf;

pub use basketwatch_core::{
    Basket, ItemSpec, LineOutcome, MissingSide, PercentChange, Period, Quantity, Selection,
    SeriesId, Session, Settings,
};
use tempfile::TempDir;

/// A small city-average table in the layout the calculator expects.
///
/// Bananas have no May 2019 price, coffee has no row on the comparison
/// date, and May 2019 has two observations for eggs and milk.
pub const CITY_TABLE: &str = "\
Date,APU0000708111 - Eggs,APU0000709112 - Milk,APU0000711211 - Bananas,APU0000717311 - Coffee
05/01/13,1.90,3.40,0.55,4.00
05/01/19,1.80,3.40,,4.50
05/15/19,2.20,3.60,,4.70
06/01/19,2.30,3.70,0.58,4.80
05/01/24,3.00,4.00,0.60,
05/20/24,3.10,4.10,0.61,6.90
";

/// A price table written to a temporary directory.
pub struct TableFixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TableFixture {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("prices.csv");
        fs::write(&path, contents).expect("write price table");
        Self { _dir: dir, path }
    }

    pub fn session(&self) -> Session {
        Session::open(Settings::new(self.path.clone(), 5).expect("settings"))
            .expect("session should open")
    }
}

pub fn id(value: &str) -> SeriesId {
    SeriesId::parse(value).expect("valid series id")
}

pub fn specs(values: &[&str]) -> Vec<ItemSpec> {
    values
        .iter()
        .map(|value| value.parse().expect("valid item spec"))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
