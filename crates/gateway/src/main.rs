//! Ronshin API Gateway
//!
//! The entry point for all external API requests.
//! Handles:
//! - Request validation and routing
//! - Pipeline orchestration (paper analysis, newspaper composition)
//! - Observability (logging, metrics, tracing)

mod handlers;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use ronshin_common::{
    config::AppConfig,
    metrics::{self, RequestMetrics},
    secrets::{resolve_project_id, EnvSecretProvider},
    genai::VertexGenerator,
    TextGenerator,
};
use ronshin_pipeline::{BlobStore, HttpBlobStore, NewspaperComposer, PaperAnalyzer};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<PaperAnalyzer>,
    pub composer: Arc<NewspaperComposer>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Ronshin API Gateway v{}", ronshin_common::VERSION);

    let config = Arc::new(config);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        info!("Metrics exporter listening on {}", addr);
    }

    // Resolve the generation project id and build the shared client
    let project_id = resolve_project_id(&config.genai, &EnvSecretProvider).await?;
    let auth_token = std::env::var("GENAI_ACCESS_TOKEN").ok();
    let generator: Arc<dyn TextGenerator> =
        Arc::new(VertexGenerator::new(&config.genai, &project_id, auth_token)?);

    let store: Arc<dyn BlobStore> = Arc::new(HttpBlobStore::new(Duration::from_secs(
        config.storage.fetch_timeout_secs,
    ))?);

    // Create app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(PaperAnalyzer::new(
            store,
            generator.clone(),
            config.storage.default_bucket.clone(),
        )),
        composer: Arc::new(NewspaperComposer::new(generator)),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Pipeline endpoints
        .route("/papers/analyze", post(handlers::papers::analyze_paper))
        .route(
            "/newspapers/generate",
            post(handlers::newspapers::generate_newspaper),
        );

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Per-request metrics middleware
async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let tracker = RequestMetrics::start(&method, &path);

    let response = next.run(req).await;

    tracker.finish(response.status().as_u16());
    response
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
