use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::matching::domain::{
    ConversationLevel, RidePreferences, SearchIntent, TripCandidate, TripId, TripStatus, TripType,
    UserId,
};
use crate::matching::repository::{RepositoryError, TripQuery, TripRepository};
use crate::matching::{trip_match_router, MatchingConfig, MatchingEngine, TripSearchService};

pub(super) const RIDER: &str = "rider-42";

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 13, 6, 0, 0).unwrap()
}

pub(super) fn rider_preferences() -> RidePreferences {
    RidePreferences {
        smoking: false,
        music: true,
        pets: false,
        conversation: ConversationLevel::Moderate,
    }
}

pub(super) fn intent() -> SearchIntent {
    SearchIntent {
        rider_id: UserId(RIDER.to_string()),
        origin: "Dubai Marina".to_string(),
        destination: "Abu Dhabi Corniche".to_string(),
        date: None,
        max_price: Some(100.0),
        trip_type: None,
        preferences: rider_preferences(),
    }
}

/// Perfect-fit trip for [`intent`]: same route, matching preferences, 10 hours out.
pub(super) fn trip(id: &str) -> TripCandidate {
    TripCandidate {
        id: TripId(id.to_string()),
        driver_id: UserId(format!("driver-{id}")),
        status: TripStatus::Upcoming,
        origin: "Dubai Marina".to_string(),
        destination: "Abu Dhabi Corniche".to_string(),
        departure_time: Some(now() + Duration::hours(10)),
        price_per_seat: 50.0,
        total_seats: 4,
        available_seats: 2,
        driver_rating: 4.8,
        driver_verified: true,
        trip_type: TripType::Wasel,
        preferences: rider_preferences(),
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(MatchingConfig::default())
}

pub(super) fn trip_ids(results: &[crate::matching::MatchResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.trip_id.0.as_str())
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryTrips {
    trips: Arc<Mutex<Vec<TripCandidate>>>,
    queries: Arc<Mutex<Vec<TripQuery>>>,
}

impl MemoryTrips {
    pub(super) fn with(trips: Vec<TripCandidate>) -> Self {
        Self {
            trips: Arc::new(Mutex::new(trips)),
            queries: Arc::default(),
        }
    }

    pub(super) fn queries(&self) -> Vec<TripQuery> {
        self.queries.lock().expect("query mutex poisoned").clone()
    }
}

impl TripRepository for MemoryTrips {
    fn searchable(&self, query: &TripQuery) -> Result<Vec<TripCandidate>, RepositoryError> {
        self.queries
            .lock()
            .expect("query mutex poisoned")
            .push(*query);
        let guard = self.trips.lock().expect("trip mutex poisoned");
        Ok(guard
            .iter()
            .filter(|trip| query.matches(trip))
            .cloned()
            .collect())
    }
}

pub(super) struct OfflineTrips;

impl TripRepository for OfflineTrips {
    fn searchable(&self, _query: &TripQuery) -> Result<Vec<TripCandidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("trip store offline".to_string()))
    }
}

pub(super) fn build_service(
    trips: Vec<TripCandidate>,
) -> (TripSearchService<MemoryTrips>, MemoryTrips) {
    let repository = MemoryTrips::with(trips);
    let service = TripSearchService::new(Arc::new(repository.clone()), MatchingConfig::default());
    (service, repository)
}

pub(super) fn router_with_service(service: TripSearchService<MemoryTrips>) -> axum::Router {
    trip_match_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
