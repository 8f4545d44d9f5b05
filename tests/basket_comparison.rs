//! Behavior-driven tests for basket comparison journeys
//!
//! These tests verify what a user learns about their basket's cost, driving
//! the calculator through a price table on disk.

use basketwatch_core::{CoreError, IngestError};
use basketwatch_tests::*;
use time::{Date, Month};

// =============================================================================
// Comparison Journey: Base Year vs Latest Data
// =============================================================================

#[test]
fn user_compares_eggs_and_milk_against_2019() {
    // Given: A user buys a dozen eggs and six gallons of milk
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();
    let basket = session
        .resolve_basket(&specs(&["APU0000708111=12", "APU0000709112=6"]))
        .expect("basket");

    // When: They compare May 2019 with the latest May data
    let base = session.base_period(2019).expect("period");
    let comparison = session.default_comparison().expect("comparison date");
    let result = session.compare(&basket, base, comparison);

    // Then: May 2019 prices are averaged and the latest date is May 1, 2024
    assert_eq!(result.comparison.label(), "May 1, 2024");
    assert_close(result.base_total, 45.0);
    assert_close(result.comparison_total, 60.0);
    assert_close(result.difference, 15.0);
    assert_eq!(result.percentage_change.to_string(), "33.33%");

    // And: Each item shows its unit prices and costs
    let breakdown = result.breakdown();
    assert_eq!(breakdown.len(), 2);
    assert_close(breakdown[0].base_price, 2.0);
    assert_close(breakdown[0].comparison_cost, 36.0);
    assert_close(breakdown[1].base_cost, 21.0);
}

#[test]
fn user_refers_to_items_by_label_in_any_case() {
    // Given: A user types item names instead of series codes
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();

    // When: The basket is resolved
    let basket = session
        .resolve_basket(&specs(&["EGGS=2", "milk"]))
        .expect("labels resolve");

    // Then: Both items map to their series with the given amounts
    let entries = basket.entries();
    assert_eq!(entries[0].item, id("APU0000708111"));
    assert_eq!(entries[0].quantity, Quantity::new(2));
    assert_eq!(entries[1].item, id("APU0000709112"));
    assert_eq!(entries[1].quantity, Quantity::ONE);
}

#[test]
fn user_sees_items_without_prices_left_out_of_totals() {
    // Given: Bananas have no May 2019 price and coffee none on May 1, 2024
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();
    let basket = session
        .resolve_basket(&specs(&["eggs=1", "bananas=3", "coffee=1"]))
        .expect("basket");

    // When: They compare against 2019
    let base = session.base_period(2019).expect("period");
    let comparison = session.default_comparison().expect("comparison date");
    let result = session.compare(&basket, base, comparison);

    // Then: Only eggs are priced and totalled
    assert_eq!(result.breakdown().len(), 1);
    assert_close(result.base_total, 2.0);
    assert_close(result.comparison_total, 3.0);

    // And: The other items are reported with the side that lacked a price
    let omitted = result
        .omitted()
        .map(|line| (line.item.as_str().to_owned(), line.outcome))
        .collect::<Vec<_>>();
    assert_eq!(
        omitted,
        vec![
            (
                String::from("APU0000711211"),
                LineOutcome::Unavailable {
                    missing: MissingSide::Base
                }
            ),
            (
                String::from("APU0000717311"),
                LineOutcome::Unavailable {
                    missing: MissingSide::Comparison
                }
            ),
        ]
    );
}

#[test]
fn user_with_no_priced_items_gets_infinite_change_not_a_crash() {
    // Given: A basket holding only an item with no May 2019 price
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();
    let basket = session
        .resolve_basket(&specs(&["bananas=5"]))
        .expect("basket");

    // When: They compare against 2019
    let base = session.base_period(2019).expect("period");
    let comparison = session.default_comparison().expect("comparison date");
    let result = session.compare(&basket, base, comparison);

    // Then: Totals are zero and the change is reported as infinite
    assert_eq!(result.base_total, 0.0);
    assert_eq!(result.comparison_total, 0.0);
    assert_eq!(result.percentage_change, PercentChange::Infinite);
    assert_eq!(result.percentage_change.to_string(), "inf");
}

#[test]
fn user_can_compare_whole_months_instead_of_the_exact_date() {
    // Given: A user wants May 2024 averaged rather than May 1 alone
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();
    let basket = session
        .resolve_basket(&specs(&["eggs=2", "coffee=1"]))
        .expect("basket");
    let comparison = Selection::Month("2024-05".parse::<Period>().expect("period"));

    // When: They compare against May 2019
    let result = session.compare(&basket, "2019-05".parse().expect("period"), comparison);

    // Then: Every May 2024 row counts, so coffee is priced too
    assert!(result.omitted().next().is_none());
    assert_close(result.comparison_total, 2.0 * 3.05 + 6.90);
    assert_close(result.base_total, 2.0 * 2.0 + 4.6);
}

#[test]
fn user_can_change_the_reference_month() {
    // Given: A session configured to compare June
    let fixture = TableFixture::new(CITY_TABLE);
    let settings = Settings::new(fixture.path.clone(), 6).expect("settings");
    let session = Session::open(settings).expect("session");
    let basket = session.resolve_basket(&specs(&["eggs=1"])).expect("basket");

    // When: They compare June 2019 with the latest June
    let base = session.base_period(2019).expect("period");
    let comparison = session.default_comparison().expect("comparison date");
    let result = session.compare(&basket, base, comparison);

    // Then: The comparison date is June 1 of the latest year, which has no row
    assert_eq!(
        comparison,
        Selection::Exact(Date::from_calendar_date(2024, Month::June, 1).expect("date"))
    );
    assert!(result.breakdown().is_empty());
    assert_eq!(
        result.lines[0].outcome,
        LineOutcome::Unavailable {
            missing: MissingSide::Comparison
        }
    );
}

#[test]
fn user_sees_basket_cost_for_every_month() {
    // Given: A basket of eggs and milk
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();
    let basket = session
        .resolve_basket(&specs(&["eggs=1", "milk=1"]))
        .expect("basket");

    // When: They ask for the cost history
    let history = session.history(&basket);

    // Then: There is one ascending point per month with data
    let periods = history
        .iter()
        .map(|point| point.period.to_string())
        .collect::<Vec<_>>();
    assert_eq!(periods, ["2013-05", "2019-05", "2019-06", "2024-05"]);
    assert_close(history[1].cost, 5.5);
    assert!(history.iter().all(|point| point.priced_items == 2));
}

// =============================================================================
// Error Journey: Unusable Input
// =============================================================================

#[test]
fn user_is_told_when_the_price_table_is_missing() {
    // Given: A data path that does not exist
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = Settings::new(dir.path().join("missing.csv"), 5).expect("settings");

    // When: A session is opened
    let err = Session::open(settings).expect_err("must fail");

    // Then: The error names the file
    assert!(matches!(err, CoreError::Ingest(IngestError::Open { .. })));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn user_is_told_about_unknown_items() {
    // Given: A basket naming an item the table does not track
    let fixture = TableFixture::new(CITY_TABLE);
    let session = fixture.session();

    // When: The basket is resolved
    let err = session
        .resolve_basket(&specs(&["caviar=1"]))
        .expect_err("must fail");

    // Then: The unknown item is named
    assert!(err.to_string().contains("caviar"));
}
