//! Axum routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{get_history, health, post_message, ChatAppState};

/// Creates routes for chat endpoints.
///
/// REST Endpoints:
/// - POST /chat/message - Send a message and get the assistant reply
/// - GET /chat/history/:session_id - Full transcript, oldest first
/// - GET /health - Liveness check
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat/message", post(post_message))
        .route("/chat/history/:session_id", get(get_history))
        .route("/health", get(health))
}

/// Fully layered application router.
///
/// With no `cors_origins` any origin is allowed.
pub fn chat_router(state: ChatAppState, cors_origins: &[String]) -> Router {
    chat_routes()
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
