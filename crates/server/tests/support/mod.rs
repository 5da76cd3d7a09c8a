#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use server::routes;
use server::ServerState;

pub const BOUNDARY: &str = "storefront-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub uploads_dir: PathBuf,
    _dir: TempDir,
}

/// Router over a migrated SQLite database and an upload dir, both in a temp dir.
pub async fn build_app() -> anyhow::Result<TestApp> {
    let dir = tempfile::tempdir()?;
    let database = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("server.db").display()),
        max_connections: 1,
        ..configs::DatabaseConfig::default()
    };
    let db = models::db::connect_with_config(&database).await?;
    models::db::migrate(&db).await?;

    let uploads_dir = dir.path().join("uploads");
    let uploads = configs::UploadConfig {
        dir: uploads_dir.display().to_string(),
        ..configs::UploadConfig::default()
    };
    let auth = configs::AuthConfig { jwt_secret: "test-secret".into(), token_ttl_secs: None };
    let state = ServerState::new(db, &auth, &uploads);
    let app = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive(), uploads.max_body_bytes);
    Ok(TestApp { app, uploads_dir, _dir: dir })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<TestResponse> {
        let resp = self.app.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec();
        Ok(TestResponse { status, bytes })
    }

    pub async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&b)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(req).await
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<TestResponse> {
        self.json(Method::GET, uri, None, None).await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> anyhow::Result<TestResponse> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(fields, image)))?;
        self.send(req).await
    }

    /// Register a fresh user and return the issued token.
    pub async fn register(&self, email: &str) -> anyhow::Result<String> {
        let resp = self
            .json(
                Method::POST,
                "/register",
                None,
                Some(serde_json::json!({"email": email, "password": "pa55word", "name": "Tester"})),
            )
            .await?;
        anyhow::ensure!(resp.status == StatusCode::CREATED, "register failed: {}", resp.status);
        resp.json()["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no token in register response"))
    }

    /// Path on disk of a file served under `/uploads/`.
    pub fn upload_path(&self, public_url: &str) -> PathBuf {
        self.uploads_dir.join(public_url.trim_start_matches("/uploads/"))
    }
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n").as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
