#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the REAL kernel router and state over an in-memory storage
//! backend and a fixed token table, so tests verify actual behavior
//! without touching the filesystem.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use carta_kernel::auth::StaticTokenProvider;
use carta_kernel::store::MemoryBackend;
use carta_kernel::{AppState, Config, routes};

/// Token table used by every test app.
///
/// `ALICE` and `BOB` are two separate tenants; requests without a token (or
/// with an unknown one) exercise the anonymous path.
pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";
const TOKEN_SPEC: &str = "alice-token:owner-alice,bob-token:owner-bob";

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a fresh test application with its own empty tenant store.
    pub async fn new() -> Self {
        let config = Config {
            port: 0,
            data_file: PathBuf::from("unused-in-tests.json"),
            default_language: "en".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            owner_tokens: TOKEN_SPEC.to_string(),
            site_url: "https://carta.example".to_string(),
        };

        let backend = Arc::new(MemoryBackend::new());
        let auth = Arc::new(StaticTokenProvider::from_spec(TOKEN_SPEC).unwrap());
        let state = AppState::with_backend(&config, backend, auth).await.unwrap();

        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::public_menu::router(state.clone()))
            .merge(routes::dashboard::router(state.clone()))
            .with_state(state.clone());

        Self { router, state }
    }

    /// Send a request through the router.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str) -> Response {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Response {
        self.request(Method::GET, path, Some(token), None).await
    }

    pub async fn put_json(
        &self,
        path: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response {
        self.request(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response {
        self.request(Method::POST, path, Some(token), Some(body)).await
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a plain string.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A two-section menu payload used across tests.
pub fn sample_menu() -> serde_json::Value {
    serde_json::json!({
        "sections": [
            {
                "id": "s-starters",
                "title": {"en": "Starters", "tr": "Başlangıçlar"},
                "description": "",
                "items": [
                    {
                        "id": "i-soup",
                        "title": {"en": "Lentil Soup", "tr": "Mercimek Çorbası"},
                        "description": "",
                        "price": 4.5,
                        "isAvailable": true
                    }
                ]
            },
            {
                "id": "s-mains",
                "title": {"en": "Mains"},
                "description": "",
                "items": [
                    {
                        "id": "i-kebap",
                        "title": "Adana Kebap",
                        "description": "",
                        "price": 12.0,
                        "isAvailable": true
                    }
                ]
            }
        ]
    })
}

/// Save settings for a token, returning the resulting slug.
pub async fn save_name(app: &TestApp, token: &str, name: &str) -> String {
    let response = app
        .put_json(
            "/api/dashboard/settings",
            token,
            serde_json::json!({"name": name}),
        )
        .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["restaurant"]["slug"].as_str().unwrap().to_string()
}

/// Activate or deactivate a tenant's menu.
pub async fn set_status(app: &TestApp, token: &str, status: &str) {
    let response = app
        .post_json(
            "/api/dashboard/status",
            token,
            serde_json::json!({"status": status}),
        )
        .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
