mod aggregate;
mod config;
mod factors;
mod route;

pub use aggregate::aggregate;
pub use config::{
    MatchingConfig, MatchingConfigError, ReasonThresholds, ScoreWeights, DEFAULT_PRICE_CAP,
};
pub use factors::FactorScores;
pub use route::{Leg, RouteCompatibility, TextContainmentRoute};

pub(crate) use aggregate::{sort_ranked, RankedEntry};

use chrono::{DateTime, Utc};

use super::domain::{SearchIntent, TripCandidate};

/// Per-query inputs shared by every candidate scored for one search.
pub(crate) struct ScoringContext<'a> {
    pub(crate) intent: &'a SearchIntent,
    pub(crate) route: &'a dyn RouteCompatibility,
    pub(crate) price_cap: f64,
    pub(crate) now: DateTime<Utc>,
}

/// Runs the five factor scorers for a single well-formed candidate.
pub(crate) fn score_candidate(
    context: &ScoringContext<'_>,
    candidate: &TripCandidate,
    departure: DateTime<Utc>,
) -> FactorScores {
    let route = context.route.score(
        Leg::new(&context.intent.origin, &context.intent.destination),
        Leg::new(&candidate.origin, &candidate.destination),
    );

    FactorScores {
        route: f64::from(route.min(100)),
        preferences: factors::preference_score(
            &context.intent.preferences,
            &candidate.preferences,
        ),
        rating: factors::rating_score(candidate.driver_rating),
        price: factors::price_score(candidate.price_per_seat, context.price_cap),
        timing: factors::timing_score(departure, context.now),
    }
}
