use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        catalog::DrinkCatalog,
        engine::{FallbackEngine, JitterSource},
        providers::PairingProvider,
    },
};

pub mod drinks;
pub mod pairing;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn DrinkCatalog>,
    /// Generative recommender; `None` sends every request to the fallback engine
    pub recommender: Option<Arc<dyn PairingProvider>>,
    pub engine: Arc<FallbackEngine>,
    pub jitter: JitterSource,
}

impl AppState {
    /// State with the default engine and no generative recommender
    pub fn new(catalog: Arc<dyn DrinkCatalog>) -> Self {
        Self {
            catalog,
            recommender: None,
            engine: Arc::new(FallbackEngine::default()),
            jitter: JitterSource::default(),
        }
    }

    pub fn with_recommender(mut self, recommender: Arc<dyn PairingProvider>) -> Self {
        self.recommender = Some(recommender);
        self
    }

    pub fn with_engine(mut self, engine: FallbackEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    pub fn with_jitter(mut self, jitter: JitterSource) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drinks", get(drinks::list))
        .route("/drinks/:id", get(drinks::get))
        .route("/pairing", get(pairing::pair))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
