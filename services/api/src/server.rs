use crate::cli::ServeArgs;
use crate::demo::demo_trips;
use crate::infra::{AppState, InMemoryTripRepository};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wasel::config::AppConfig;
use wasel::error::AppError;
use wasel::matching::{TripCsvImporter, TripSearchService};
use wasel::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let trips = match args.trips.take() {
        Some(path) => {
            let trips = TripCsvImporter::from_path(&path)?;
            info!(path = %path.display(), trips = trips.len(), "seeded trip store from export");
            trips
        }
        None => demo_trips(Utc::now()),
    };
    let repository = Arc::new(InMemoryTripRepository::with_trips(trips));
    let seeded = repository.len();
    let search_service = Arc::new(TripSearchService::new(
        repository,
        config.matching.clone(),
    ));

    let app = with_match_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, trips = seeded, "trip matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
