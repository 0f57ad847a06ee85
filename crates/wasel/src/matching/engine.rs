use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::domain::{MatchResult, SearchIntent, TripCandidate};
use super::explain::explain;
use super::gate::{admit, well_formed};
use super::scoring::{
    aggregate, score_candidate, sort_ranked, MatchingConfig, RankedEntry, RouteCompatibility,
    ScoringContext, TextContainmentRoute,
};
use super::validation::{validate_intent, SearchValidationError};

/// Stateless ranking engine: gate, score, aggregate, explain.
#[derive(Clone)]
pub struct MatchingEngine {
    config: MatchingConfig,
    route: Arc<dyn RouteCompatibility>,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self::with_route_strategy(config, Arc::new(TextContainmentRoute))
    }

    pub fn with_route_strategy(
        config: MatchingConfig,
        route: Arc<dyn RouteCompatibility>,
    ) -> Self {
        Self { config, route }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Checks the intent without touching any candidate.
    pub fn validate(&self, intent: &SearchIntent) -> Result<(), SearchValidationError> {
        validate_intent(intent, &self.config).map(|_| ())
    }

    /// Ranks `candidates` for `intent` as of `now`, best match first.
    pub fn rank(
        &self,
        intent: &SearchIntent,
        candidates: Vec<TripCandidate>,
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchResult>, SearchValidationError> {
        let price_cap = validate_intent(intent, &self.config)?;

        let supplied = candidates.len();
        let eligible = admit(candidates, &intent.rider_id);
        let context = ScoringContext {
            intent,
            route: self.route.as_ref(),
            price_cap,
            now,
        };

        let mut entries = Vec::with_capacity(eligible.len());
        for candidate in &eligible {
            let departure = match well_formed(candidate) {
                Ok(departure) => departure,
                Err(error) => {
                    warn!(trip_id = %candidate.id.0, %error, "skipping malformed trip candidate");
                    continue;
                }
            };

            let scores = score_candidate(&context, candidate, departure);
            let score = aggregate(&scores, self.config.weights());
            let factors = scores.rounded();
            let reasons = explain(candidate, &factors, self.config.reasons());

            entries.push(RankedEntry {
                result: MatchResult {
                    trip_id: candidate.id.clone(),
                    score,
                    factors,
                    reasons,
                },
                price_per_seat: candidate.price_per_seat,
            });
        }

        sort_ranked(&mut entries);

        debug!(
            supplied,
            eligible = eligible.len(),
            ranked = entries.len(),
            route_strategy = self.route.name(),
            "ranked trip candidates"
        );

        Ok(entries.into_iter().map(|entry| entry.result).collect())
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(MatchingConfig::default())
    }
}

impl std::fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("config", &self.config)
            .field("route", &self.route.name())
            .finish()
    }
}
