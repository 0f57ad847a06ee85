//! Trip compatibility ranking.
//!
//! A rider's [`SearchIntent`] and a pool of [`TripCandidate`]s flow through the candidate gate,
//! the five factor scorers, the weighted aggregator and the explanation generator. Every stage is
//! a pure function of its arguments; the current time is always passed in by the caller.

pub mod domain;
pub mod engine;
pub mod explain;
pub mod gate;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ConversationLevel, FactorBreakdown, MatchResult, MatchTier, RidePreferences, SearchIntent,
    TripCandidate, TripId, TripStatus, TripType, UserId,
};
pub use engine::MatchingEngine;
pub use gate::{admit, MalformedCandidate};
pub use import::{TripCsvImporter, TripImportError};
pub use repository::{RepositoryError, TripQuery, TripRepository};
pub use router::{trip_match_router, MatchListView, MatchSearchRequest, MatchView, RankRequest};
pub use scoring::{
    Leg, MatchingConfig, MatchingConfigError, ReasonThresholds, RouteCompatibility, ScoreWeights,
    TextContainmentRoute,
};
pub use service::{TripSearchError, TripSearchService};
pub use validation::SearchValidationError;
