use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::common::*;
use crate::matching::domain::TripType;
use crate::matching::repository::RepositoryError;
use crate::matching::{
    MatchingConfig, SearchValidationError, TripQuery, TripSearchError, TripSearchService,
};

#[test]
fn search_ranks_repository_candidates() {
    let mut far = trip("far");
    far.departure_time = Some(now() + Duration::hours(100));
    let (service, _) = build_service(vec![far, trip("soon")]);

    let results = service.search(&intent(), now()).expect("search succeeds");

    assert_eq!(trip_ids(&results), vec!["soon", "far"]);
    assert_eq!(results[1].factors.timing, 40);
}

#[test]
fn search_validates_before_querying_the_store() {
    let (service, repository) = build_service(vec![trip("t-1")]);
    let mut invalid = intent();
    invalid.max_price = Some(-10.0);

    match service.search(&invalid, now()) {
        Err(TripSearchError::Validation(SearchValidationError::InvalidPriceCap(cap))) => {
            assert_eq!(cap, -10.0)
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repository.queries().is_empty());
}

#[test]
fn search_forwards_date_and_trip_type_hints() {
    let mut tomorrow = trip("tomorrow");
    tomorrow.departure_time = Some(now() + Duration::days(1));
    let mut round_trip = trip("round-trip");
    round_trip.trip_type = TripType::Raje3;
    let (service, repository) = build_service(vec![trip("today"), tomorrow, round_trip]);

    let mut dated = intent();
    dated.date = NaiveDate::from_ymd_opt(2025, 10, 13);
    dated.trip_type = Some(TripType::Wasel);

    let results = service.search(&dated, now()).expect("search succeeds");

    assert_eq!(trip_ids(&results), vec!["today"]);
    assert_eq!(
        repository.queries(),
        vec![TripQuery {
            departing_on: NaiveDate::from_ymd_opt(2025, 10, 13),
            trip_type: Some(TripType::Wasel),
        }]
    );
}

#[test]
fn search_propagates_repository_failures() {
    let service = TripSearchService::new(Arc::new(OfflineTrips), MatchingConfig::default());

    match service.search(&intent(), now()) {
        Err(TripSearchError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "trip store offline")
        }
        other => panic!("expected repository error, got {other:?}"),
    }
}

#[test]
fn rank_bypasses_the_store() {
    let (service, repository) = build_service(vec![trip("stored")]);

    let results = service
        .rank(&intent(), vec![trip("supplied")], now())
        .expect("rank succeeds");

    assert_eq!(trip_ids(&results), vec!["supplied"]);
    assert!(repository.queries().is_empty());
}

#[test]
fn query_without_hints_matches_everything() {
    let mut undated = trip("undated");
    undated.departure_time = None;

    assert!(TripQuery::default().matches(&undated));
    assert!(!TripQuery {
        departing_on: NaiveDate::from_ymd_opt(2025, 10, 13),
        trip_type: None,
    }
    .matches(&undated));
}
