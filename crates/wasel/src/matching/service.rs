use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{MatchResult, SearchIntent, TripCandidate};
use super::engine::MatchingEngine;
use super::repository::{RepositoryError, TripQuery, TripRepository};
use super::scoring::MatchingConfig;
use super::validation::SearchValidationError;

/// Service composing the trip store with the ranking engine.
pub struct TripSearchService<R> {
    repository: Arc<R>,
    engine: Arc<MatchingEngine>,
}

impl<R> TripSearchService<R>
where
    R: TripRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: MatchingConfig) -> Self {
        Self::with_engine(repository, MatchingEngine::new(config))
    }

    pub fn with_engine(repository: Arc<R>, engine: MatchingEngine) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Rank the trips the store offers for this intent.
    pub fn search(
        &self,
        intent: &SearchIntent,
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchResult>, TripSearchError> {
        self.engine.validate(intent)?;

        let query = TripQuery::from(intent);
        let candidates = self.repository.searchable(&query)?;
        let matches = self.engine.rank(intent, candidates, now)?;

        info!(
            rider_id = %intent.rider_id.0,
            matches = matches.len(),
            "trip search completed"
        );
        Ok(matches)
    }

    /// Rank a caller-supplied pool without consulting the store.
    pub fn rank(
        &self,
        intent: &SearchIntent,
        candidates: Vec<TripCandidate>,
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchResult>, TripSearchError> {
        Ok(self.engine.rank(intent, candidates, now)?)
    }
}

/// Error raised by the trip search service.
#[derive(Debug, thiserror::Error)]
pub enum TripSearchError {
    #[error(transparent)]
    Validation(#[from] SearchValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
