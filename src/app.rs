use crate::analyze::{self, KeywordAnalyzer, SceneAnalyzer};
use crate::models::{SearchRequest, SearchResponse};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::{
    env,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, info};

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB safety cap
const DEFAULT_PORT: u16 = 8000;
const PROCESSING_DELAY: Duration = Duration::from_secs(1); // simulated inference
const MOVIE_TITLE_PLACEHOLDER: &str = "YouTube Video";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn SceneAnalyzer>,
}

pub async fn run_server() -> Result<()> {
    let analyzer: Arc<dyn SceneAnalyzer> = Arc::new(KeywordAnalyzer::new(PROCESSING_DELAY));
    let app = build_router(AppState { analyzer });

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/search", post(handle_search))
        .route("/api/v1/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        // Any origin/method/header; lock down per deployment.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "AI Scene Finder API", "status": "running" }))
}

async fn health() -> Json<serde_json::Value> {
    let timestamp = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
    Json(json!({ "status": "healthy", "timestamp": timestamp }))
}

async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    let started = Instant::now();
    debug!("Search request for {}", request.url);

    match run_search(&state, &request, started).await {
        Ok(response) => {
            info!(
                "Search returned {} scene(s) in {:.2}s",
                response.total_scenes, response.processing_time
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Search failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn run_search(
    state: &AppState,
    request: &SearchRequest,
    started: Instant,
) -> Result<SearchResponse> {
    let mut scenes = state
        .analyzer
        .analyze(&request.description, &request.url)
        .await?;
    analyze::apply_filters(&mut scenes, request.filters.as_ref());

    let processing_time = round_secs(started.elapsed().as_secs_f64());
    Ok(SearchResponse {
        movie_title: MOVIE_TITLE_PLACEHOLDER.to_string(),
        total_scenes: scenes.len(),
        processing_time,
        scenes,
    })
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
