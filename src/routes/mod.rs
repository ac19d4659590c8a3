// src/routes/mod.rs
pub mod catalog;
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post, put},
};
use catalog::{dishes_handler, events_handler, landmarks_handler, restaurants_handler};
use chat::{chat_handler, get_session_handler, navigate_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let catalog_routes = Router::new()
        .route("/landmarks", get(landmarks_handler))
        .route("/events", get(events_handler))
        .route("/restaurants", get(restaurants_handler))
        .route("/dishes", get(dishes_handler));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/sessions/{id}", get(get_session_handler))
        .route("/sessions/{id}/mode", put(navigate_handler))
        .nest("/catalog", catalog_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}
