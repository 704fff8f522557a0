use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use store::PostStore;

use crate::errors::ApiError;
use crate::extract::JsonOrForm;

/// Origins allowed to call the API with credentials.
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn PostStore>,
}

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Draft post as submitted by clients; the store assigns the id. Presence is
/// not validated here — a missing field passes through and surfaces as a
/// store error.
#[derive(Debug, Deserialize)]
pub struct DraftPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Create acknowledgment. Intentionally not the same shape as the list
/// entries; existing clients depend on the `message` field.
#[derive(Debug, Serialize)]
pub struct PostCreated {
    pub message: &'static str,
    pub id: i32,
    pub title: String,
    pub content: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_posts(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::post::Model>>, ApiError> {
    let posts = state.store.find_all().await?;
    Ok(Json(posts))
}

async fn create_post(
    State(state): State<ServerState>,
    JsonOrForm(draft): JsonOrForm<DraftPost>,
) -> Result<Json<PostCreated>, ApiError> {
    let post = state
        .store
        .create(draft.title.as_deref(), draft.content.as_deref())
        .await?;
    Ok(Json(PostCreated {
        message: "Post created",
        id: post.id,
        title: post.title,
        content: post.content,
    }))
}

/// Allow-list CORS: credentialed calls from localhost origins only.
pub fn build_cors() -> CorsLayer {
    let origins = ALLOWED_ORIGINS.map(HeaderValue::from_static);
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the full application router.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/posts", get(list_posts).post(create_post))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
