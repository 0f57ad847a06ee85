use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{FactorBreakdown, MatchResult, SearchIntent, TripCandidate, TripId};
use super::repository::{RepositoryError, TripRepository};
use super::service::{TripSearchError, TripSearchService};

/// Body for a search against the trip store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSearchRequest {
    pub intent: SearchIntent,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Body for ranking an explicit pool of trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub intent: SearchIntent,
    #[serde(default)]
    pub candidates: Vec<TripCandidate>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Presentation view of a single match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub trip_id: TripId,
    pub score: u8,
    pub tier: &'static str,
    pub factors: FactorBreakdown,
    pub reasons: Vec<String>,
}

impl From<MatchResult> for MatchView {
    fn from(result: MatchResult) -> Self {
        let tier = result.tier().label();
        Self {
            trip_id: result.trip_id,
            score: result.score,
            tier,
            factors: result.factors,
            reasons: result.reasons,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchListView {
    pub evaluated_at: DateTime<Utc>,
    pub matches: Vec<MatchView>,
}

/// Router builder exposing the search and ranking endpoints.
pub fn trip_match_router<R>(service: Arc<TripSearchService<R>>) -> Router
where
    R: TripRepository + 'static,
{
    Router::new()
        .route("/api/v1/trips/matches", post(search_handler::<R>))
        .route("/api/v1/trips/rank", post(rank_handler::<R>))
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<TripSearchService<R>>>,
    axum::Json(request): axum::Json<MatchSearchRequest>,
) -> Response
where
    R: TripRepository + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.search(&request.intent, now) {
        Ok(matches) => match_list_response(now, matches),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rank_handler<R>(
    State(service): State<Arc<TripSearchService<R>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    R: TripRepository + 'static,
{
    let RankRequest {
        intent,
        candidates,
        now,
    } = request;
    let now = now.unwrap_or_else(Utc::now);
    match service.rank(&intent, candidates, now) {
        Ok(matches) => match_list_response(now, matches),
        Err(error) => error_response(error),
    }
}

fn match_list_response(evaluated_at: DateTime<Utc>, matches: Vec<MatchResult>) -> Response {
    let view = MatchListView {
        evaluated_at,
        matches: matches.into_iter().map(MatchView::from).collect(),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn error_response(error: TripSearchError) -> Response {
    let status = match &error {
        TripSearchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TripSearchError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
