use std::sync::Arc;

use chrono::Duration;

use super::common::*;
use crate::matching::domain::{ConversationLevel, TripStatus, UserId};
use crate::matching::{
    Leg, MatchingConfig, MatchingEngine, ReasonThresholds, RouteCompatibility, ScoreWeights,
    SearchValidationError,
};

#[test]
fn perfect_fit_scores_in_the_low_nineties() {
    let results = engine()
        .rank(&intent(), vec![trip("t-1")], now())
        .expect("ranking succeeds");

    let result = &results[0];
    assert_eq!(result.factors.route, 100);
    assert_eq!(result.factors.preferences, 100);
    assert_eq!(result.factors.rating, 96);
    assert_eq!(result.factors.price, 50);
    assert_eq!(result.factors.timing, 100);
    assert_eq!(result.score, 92);
}

#[test]
fn results_are_sorted_by_descending_score() {
    let mut far_route = trip("far-route");
    far_route.origin = "Ajman".to_string();
    far_route.destination = "Fujairah".to_string();
    let mut mid_route = trip("mid-route");
    mid_route.destination = "Al Ain".to_string();

    let results = engine()
        .rank(&intent(), vec![far_route, trip("exact"), mid_route], now())
        .expect("ranking succeeds");

    assert_eq!(trip_ids(&results), vec!["exact", "mid-route", "far-route"]);
    assert!(results
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn equal_scores_break_ties_on_price_then_input_order() {
    let mut pricier = trip("pricier");
    pricier.price_per_seat = 50.4;
    let mut cheaper = trip("cheaper");
    cheaper.price_per_seat = 49.6;

    let results = engine()
        .rank(
            &intent(),
            vec![pricier, trip("first-50"), cheaper, trip("second-50")],
            now(),
        )
        .expect("ranking succeeds");

    assert!(results.iter().all(|result| result.score == results[0].score));
    assert_eq!(
        trip_ids(&results),
        vec!["cheaper", "first-50", "second-50", "pricier"]
    );
}

#[test]
fn ranking_is_deterministic_for_identical_input() {
    let mut pool = Vec::new();
    for index in 0..12 {
        let mut candidate = trip(&format!("t-{index}"));
        candidate.price_per_seat = 20.0 + (index % 4) as f64 * 10.0;
        candidate.departure_time = Some(now() + Duration::hours(index * 9));
        candidate.preferences.conversation = match index % 3 {
            0 => ConversationLevel::Quiet,
            1 => ConversationLevel::Moderate,
            _ => ConversationLevel::Chatty,
        };
        pool.push(candidate);
    }

    let engine = engine();
    let first = engine
        .rank(&intent(), pool.clone(), now())
        .expect("first run");
    let second = engine.rank(&intent(), pool, now()).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn ineligible_trips_never_reach_the_output() {
    let mut cancelled = trip("cancelled");
    cancelled.status = TripStatus::Cancelled;
    let mut completed = trip("completed");
    completed.status = TripStatus::Completed;
    let mut full = trip("full");
    full.available_seats = 0;
    let mut own = trip("own");
    own.driver_id = UserId(RIDER.to_string());

    let results = engine()
        .rank(
            &intent(),
            vec![cancelled, completed, full, own, trip("open")],
            now(),
        )
        .expect("ranking succeeds");

    assert_eq!(trip_ids(&results), vec!["open"]);
}

#[test]
fn malformed_candidates_are_skipped_without_failing_the_batch() {
    let mut no_departure = trip("no-departure");
    no_departure.departure_time = None;
    let mut bad_price = trip("bad-price");
    bad_price.price_per_seat = f64::NAN;

    let results = engine()
        .rank(&intent(), vec![no_departure, trip("good"), bad_price], now())
        .expect("ranking succeeds");

    assert_eq!(trip_ids(&results), vec!["good"]);
}

#[test]
fn empty_pool_is_not_an_error() {
    let results = engine()
        .rank(&intent(), Vec::new(), now())
        .expect("empty ranking succeeds");
    assert!(results.is_empty());
}

#[test]
fn invalid_intent_fails_before_scoring() {
    let mut missing_origin = intent();
    missing_origin.origin = "  ".to_string();
    assert_eq!(
        engine().rank(&missing_origin, vec![trip("t-1")], now()),
        Err(SearchValidationError::MissingOrigin)
    );

    let mut missing_destination = intent();
    missing_destination.destination = String::new();
    assert_eq!(
        engine().rank(&missing_destination, Vec::new(), now()),
        Err(SearchValidationError::MissingDestination)
    );

    let mut zero_cap = intent();
    zero_cap.max_price = Some(0.0);
    assert_eq!(
        engine().rank(&zero_cap, vec![trip("t-1")], now()),
        Err(SearchValidationError::InvalidPriceCap(0.0))
    );
}

#[test]
fn missing_max_price_falls_back_to_configured_cap() {
    let mut open_budget = intent();
    open_budget.max_price = None;

    let results = engine()
        .rank(&open_budget, vec![trip("t-1")], now())
        .expect("ranking succeeds");

    assert_eq!(results[0].factors.price, 90);
}

#[test]
fn departed_trips_still_rank_with_zero_timing() {
    let mut departed = trip("departed");
    departed.status = TripStatus::Active;
    departed.departure_time = Some(now() - Duration::hours(1));

    let results = engine()
        .rank(&intent(), vec![departed], now())
        .expect("ranking succeeds");

    assert_eq!(results[0].factors.timing, 0);
}

struct FixedRoute(u8);

impl RouteCompatibility for FixedRoute {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn score(&self, _requested: Leg<'_>, _offered: Leg<'_>) -> u8 {
        self.0
    }
}

#[test]
fn route_strategy_can_be_swapped() {
    let engine =
        MatchingEngine::with_route_strategy(MatchingConfig::default(), Arc::new(FixedRoute(0)));

    let results = engine
        .rank(&intent(), vec![trip("t-1")], now())
        .expect("ranking succeeds");

    assert_eq!(results[0].factors.route, 0);
    assert_eq!(results[0].score, 57);
    assert_eq!(results[0].reasons[0], "strong preference fit");
}

#[test]
fn custom_weights_change_the_aggregate() {
    let weights = ScoreWeights::new(0.0, 0.0, 0.0, 1.0, 0.0).expect("price-only weights");
    let config = MatchingConfig::new(weights, 500.0, ReasonThresholds::default())
        .expect("valid config");

    let results = MatchingEngine::new(config)
        .rank(&intent(), vec![trip("t-1")], now())
        .expect("ranking succeeds");

    assert_eq!(results[0].score, 50);
}

#[test]
fn aggregate_uses_unrounded_factor_scores() {
    let mut quiet_rider = intent();
    quiet_rider.max_price = None;
    quiet_rider.preferences.music = false;
    quiet_rider.preferences.conversation = ConversationLevel::Quiet;
    let mut candidate = trip("t-1");
    candidate.preferences.music = false;
    candidate.driver_rating = 4.75;
    candidate.price_per_seat = 1.0;

    let results = engine()
        .rank(&quiet_rider, vec![candidate], now())
        .expect("ranking succeeds");

    let factors = results[0].factors;
    assert_eq!(factors.preferences, 88);
    assert_eq!(factors.rating, 95);
    assert_eq!(factors.price, 100);
    assert_eq!(results[0].score, 96);
}

#[test]
fn inconsistent_seat_counts_are_skipped() {
    let mut inconsistent = trip("inconsistent");
    inconsistent.total_seats = 2;
    inconsistent.available_seats = 4;

    let results = engine()
        .rank(&intent(), vec![inconsistent, trip("good")], now())
        .expect("ranking succeeds");

    assert_eq!(trip_ids(&results), vec!["good"]);
}
