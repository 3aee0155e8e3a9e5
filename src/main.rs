//! Podtriage Analysis Service
//!
//! Stateless pod-failure triage: a supervisor that has already detected a
//! failed workload posts the captured logs here, and gets back a scored,
//! structured diagnosis of which known failure patterns matched and where.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        PODTRIAGE                           │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │  API      │   │  Analysis    │   │  Pattern Registry │  │
//! │  │  (Axum)   │──▶│  Engine      │◀──│  + Keyword Store  │  │
//! │  └───────────┘   └──────┬───────┘   │  (loaded once)    │  │
//! │                         ▼           └───────────────────┘  │
//! │                  ┌─────────────┐                           │
//! │                  │  Frequency  │  (only shared mutable     │
//! │                  │  Tracker    │   state, process-wide)    │
//! │                  └─────────────┘                           │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod config;
mod error;
mod logic;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::analysis::AnalysisEngine;
use logic::pattern::PatternRegistry;
use logic::scoring::KeywordWeights;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podtriage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Podtriage Analysis Service starting...");

    // Load patterns - fatal when nothing loads, the service would be useless
    let registry = match PatternRegistry::load(&config.pattern_directory) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("Pattern loading failed: {}", e);
            std::process::exit(1);
        }
    };

    // Keyword weights degrade gracefully to an empty store
    let keywords = KeywordWeights::load(&config.keywords_directory);

    let engine = AnalysisEngine::new(registry, config.scoring.clone(), keywords);
    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health::check))
        .route("/api/v1/analyze", post(api::analyze::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
