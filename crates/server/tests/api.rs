use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::Service;

use models::post;
use server::routes::{self, ServerState};
use store::{PostStore, StoreError};

/// In-memory store standing in for the database. `fail` flips every call
/// into a connectivity-style error.
struct FakeStore {
    posts: Mutex<Vec<post::Model>>,
    next_id: AtomicI32,
    fail: AtomicBool,
}

impl FakeStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            fail: AtomicBool::new(false),
        })
    }

    fn fail_next_calls(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostStore for FakeStore {
    async fn find_all(&self) -> Result<Vec<post::Model>, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Db("connection refused".into()));
        }
        Ok(self.posts.lock().expect("lock").clone())
    }

    async fn create(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<post::Model, StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Db("connection refused".into()));
        }
        // The real store hits NOT NULL constraints for absent fields.
        let (Some(title), Some(content)) = (title, content) else {
            return Err(StoreError::Db(
                "null value violates not-null constraint".into(),
            ));
        };
        let model = post::Model {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: title.to_string(),
            content: content.to_string(),
        };
        self.posts.lock().expect("lock").push(model.clone());
        Ok(model)
    }
}

fn app(store: Arc<FakeStore>) -> Router {
    routes::build_router(routes::build_cors(), ServerState { store })
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn get_posts_req() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/posts")
        .body(Body::empty())
        .expect("request")
}

fn create_post_req(title: &str, content: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({"title": title, "content": content})).expect("json"),
        ))
        .expect("request")
}

#[tokio::test]
async fn list_with_no_posts_returns_empty_array() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let resp = app.call(get_posts_req()).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_then_list_round_trip() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let resp = app.call(create_post_req("Hello", "World")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await?,
        json!({"message": "Post created", "id": 1, "title": "Hello", "content": "World"})
    );

    let resp = app.call(get_posts_req()).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await?,
        json!([{"id": 1, "title": "Hello", "content": "World"}])
    );
    Ok(())
}

#[tokio::test]
async fn create_assigns_fresh_ids() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let mut seen = Vec::new();
    for i in 0..3 {
        let resp = app.call(create_post_req(&format!("post {i}"), "body")).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await?;
        let id = body["id"].as_i64().expect("integer id");
        assert!(!seen.contains(&id), "id {id} reused");
        seen.push(id);
    }
    Ok(())
}

#[tokio::test]
async fn create_accepts_form_encoded_body() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let req = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("title=Hello&content=World"))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["message"], "Post created");
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["content"], "World");
    Ok(())
}

#[tokio::test]
async fn create_with_missing_field_surfaces_as_store_error() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    // No presence validation: the draft reaches the store, whose constraint
    // failure maps to the 500 contract.
    let req = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"title": "Hello"}))?))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await?;
    let message = body["message"].as_str().expect("message string");
    assert!(message.starts_with("Server error:"), "got: {message}");

    let req = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("content=World"))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn store_failure_surfaces_as_500_with_message() -> anyhow::Result<()> {
    let store = FakeStore::new();
    let mut app = app(store.clone());
    store.fail_next_calls();

    let resp = app.call(create_post_req("Hello", "World")).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await?;
    let message = body["message"].as_str().expect("message string");
    assert!(message.starts_with("Server error:"), "got: {message}");

    let resp = app.call(get_posts_req()).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn cors_allows_allowlisted_origin_with_credentials() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let req = Request::builder()
        .method("GET")
        .uri("/api/posts")
        .header(header::ORIGIN, "http://localhost")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost")
    );
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
    Ok(())
}

#[tokio::test]
async fn cors_withholds_allow_origin_for_unknown_origin() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let req = Request::builder()
        .method("GET")
        .uri("/api/posts")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert!(resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
    Ok(())
}

#[tokio::test]
async fn cors_preflight_advertises_allowed_methods() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/posts")
        .header(header::ORIGIN, "http://127.0.0.1")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    let methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(methods.contains("POST"), "got: {methods}");
    assert!(methods.contains("PATCH"), "got: {methods}");
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let mut app = app(FakeStore::new());

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"status": "ok"}));
    Ok(())
}
