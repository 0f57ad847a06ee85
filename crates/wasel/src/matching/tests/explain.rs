use super::common::*;
use crate::matching::domain::FactorBreakdown;
use crate::matching::explain::{explain, MAX_REASONS};
use crate::matching::ReasonThresholds;

fn factors(route: u8, preferences: u8, price: u8) -> FactorBreakdown {
    FactorBreakdown {
        route,
        preferences,
        rating: 0,
        price,
        timing: 0,
    }
}

#[test]
fn reasons_follow_priority_order_and_stop_at_three() {
    let candidate = trip("t-1");

    let reasons = explain(&candidate, &factors(100, 100, 90), &ReasonThresholds::default());

    assert_eq!(reasons.len(), MAX_REASONS);
    assert_eq!(
        reasons,
        vec![
            "route strongly matches",
            "strong preference fit",
            "highly rated driver"
        ]
    );
}

#[test]
fn partial_route_replaces_strong_route_reason() {
    let mut candidate = trip("t-2");
    candidate.driver_rating = 3.9;
    candidate.driver_verified = false;
    candidate.available_seats = 1;

    let reasons = explain(&candidate, &factors(60, 50, 10), &ReasonThresholds::default());

    assert_eq!(reasons, vec!["route partially matches"]);
}

#[test]
fn lower_priority_reasons_surface_when_higher_ones_do_not_apply() {
    let mut candidate = trip("t-3");
    candidate.driver_rating = 4.0;
    candidate.available_seats = 3;

    let reasons = explain(&candidate, &factors(20, 50, 70), &ReasonThresholds::default());

    assert_eq!(
        reasons,
        vec!["verified driver", "attractive price", "3 seats available"]
    );
}

#[test]
fn no_reasons_when_nothing_stands_out() {
    let mut candidate = trip("t-4");
    candidate.driver_rating = 3.0;
    candidate.driver_verified = false;
    candidate.available_seats = 1;

    assert!(explain(&candidate, &factors(20, 25, 0), &ReasonThresholds::default()).is_empty());
}

#[test]
fn thresholds_are_configurable() {
    let mut candidate = trip("t-5");
    candidate.driver_rating = 4.2;
    candidate.driver_verified = false;
    let thresholds = ReasonThresholds {
        driver_rating: 4.0,
        ..ReasonThresholds::default()
    };

    let reasons = explain(&candidate, &factors(20, 0, 0), &thresholds);

    assert_eq!(reasons, vec!["highly rated driver", "2 seats available"]);
}
