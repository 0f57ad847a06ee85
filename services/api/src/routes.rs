use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use wasel::error::AppError;
use wasel::matching::{
    trip_match_router, MatchListView, MatchView, MatchingEngine, SearchIntent, TripCsvImporter,
    TripRepository, TripSearchService,
};

/// Rank a pool supplied as a trip-store CSV export.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvRankRequest {
    pub(crate) intent: SearchIntent,
    pub(crate) trips_csv: String,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn with_match_routes<R>(service: Arc<TripSearchService<R>>) -> axum::Router
where
    R: TripRepository + 'static,
{
    let engine = Arc::new(service.engine().clone());

    trip_match_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/trips/rank/csv",
            axum::routing::post(csv_rank_endpoint),
        )
        .layer(Extension(engine))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn csv_rank_endpoint(
    Extension(engine): Extension<Arc<MatchingEngine>>,
    Json(payload): Json<CsvRankRequest>,
) -> Result<Json<MatchListView>, AppError> {
    let CsvRankRequest {
        intent,
        trips_csv,
        now,
    } = payload;

    engine.validate(&intent)?;
    let candidates = TripCsvImporter::from_reader(Cursor::new(trips_csv.into_bytes()))?;
    let now = now.unwrap_or_else(Utc::now);
    let matches = engine.rank(&intent, candidates, now)?;

    Ok(Json(MatchListView {
        evaluated_at: now,
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}
