use chrono::NaiveDate;

use super::domain::{SearchIntent, TripCandidate, TripType};

/// Filter hints a trip store may apply before handing over candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripQuery {
    pub departing_on: Option<NaiveDate>,
    pub trip_type: Option<TripType>,
}

impl TripQuery {
    pub fn matches(&self, candidate: &TripCandidate) -> bool {
        let date_matches = match (self.departing_on, candidate.departure_time) {
            (Some(date), Some(departure)) => departure.date_naive() == date,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let type_matches = self
            .trip_type
            .map(|trip_type| trip_type == candidate.trip_type)
            .unwrap_or(true);

        date_matches && type_matches
    }
}

impl From<&SearchIntent> for TripQuery {
    fn from(intent: &SearchIntent) -> Self {
        Self {
            departing_on: intent.date,
            trip_type: intent.trip_type,
        }
    }
}

/// Source of candidate trips so the search service can be exercised in isolation.
pub trait TripRepository: Send + Sync {
    fn searchable(&self, query: &TripQuery) -> Result<Vec<TripCandidate>, RepositoryError>;
}

/// Error enumeration for trip store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("trip store unavailable: {0}")]
    Unavailable(String),
}
