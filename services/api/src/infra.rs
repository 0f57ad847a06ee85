use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use wasel::matching::{RepositoryError, TripCandidate, TripQuery, TripRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the trip store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTripRepository {
    trips: Arc<RwLock<Vec<TripCandidate>>>,
}

impl InMemoryTripRepository {
    pub(crate) fn with_trips(trips: Vec<TripCandidate>) -> Self {
        Self {
            trips: Arc::new(RwLock::new(trips)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.trips.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl TripRepository for InMemoryTripRepository {
    fn searchable(&self, query: &TripQuery) -> Result<Vec<TripCandidate>, RepositoryError> {
        let guard = self
            .trips
            .read()
            .map_err(|_| RepositoryError::Unavailable("trip store lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|trip| query.matches(trip))
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
