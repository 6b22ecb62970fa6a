#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dealer_api::auth::AuthService;
use dealer_api::database::{Column, DatabaseError, Filter, MemoryStore, Row, Store};
use dealer_api::models::{AdminRecord, Fields};
use dealer_api::services::AdminService;
use dealer_api::uploads::UploadSink;
use dealer_api::{router, AppState};

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "rahasia123";

const BOUNDARY: &str = "dealer-api-test-boundary";

/// Router over an isolated store and upload directory
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn Store>,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(store: Arc<dyn Store>) -> Result<Self> {
        let upload_dir = std::env::temp_dir().join(format!("dealer-api-test-{}", uuid::Uuid::new_v4()));
        let uploads = UploadSink::new(&upload_dir, 5 * 1024 * 1024);
        uploads.ensure_dir().await?;

        let state = AppState::new(store.clone(), uploads, AuthService::new(JWT_SECRET)?);
        Ok(Self {
            router: router(state),
            store,
            upload_dir,
        })
    }

    pub fn auth(&self) -> Result<AuthService> {
        Ok(AuthService::new(JWT_SECRET)?)
    }

    /// Create an admin straight through the service layer
    pub async fn seed_admin(&self, username: &str, password: &str, website_id: i64) -> Result<AdminRecord> {
        let mut fields = Fields::new();
        fields.insert("username", json!(username));
        fields.insert("password", json!(password));
        fields.insert("website_id", json!(website_id));
        Ok(AdminService::new(self.store.clone()).create(&fields).await?)
    }

    /// Seed the default admin and log in through the HTTP surface
    pub async fn admin_token(&self) -> Result<String> {
        self.seed_admin(ADMIN_USERNAME, ADMIN_PASSWORD, 1).await?;
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let (status, body) = self
            .json(Method::POST, "/api/admin/login", None, json!({ "username": username, "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carries no token")
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        self.send(Request::get(path).body(Body::empty())?).await
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.send(
            Request::get(path)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::delete(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty())?).await
    }

    pub async fn json(&self, method: Method, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string()))?).await
    }

    pub async fn multipart(&self, method: Method, path: &str, token: Option<&str>, form: MultipartForm) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(form.finish()))?).await
    }

    /// Number of files written to the upload directory
    pub fn stored_files(&self) -> Result<usize> {
        Ok(std::fs::read_dir(&self.upload_dir)?.count())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY,
                name,
                value.to_string()
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn image(self, file_name: &str, bytes: &[u8]) -> Self {
        self.file("image_url", file_name, "image/jpeg", bytes)
    }

    fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// Store whose every call fails, for the lenient list policy
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn select(&self, _table: &'static str, _filter: &Filter) -> Result<Vec<Row>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _table: &'static str, _columns: &[Column]) -> Result<Row, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _table: &'static str, _id: i64, _columns: &[Column]) -> Result<Option<Row>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _table: &'static str, _id: i64) -> Result<Option<Row>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }
}

/// Required fields of the Civic RS listing
pub fn civic_rs() -> Value {
    json!({
        "website_id": 1,
        "slug": "civic-rs",
        "name": "Civic RS",
        "variant": "Turbo",
        "price": 500000000,
        "type": "hatchback",
    })
}

pub fn civic_rs_form() -> MultipartForm {
    MultipartForm::new()
        .text("website_id", 1)
        .text("slug", "civic-rs")
        .text("name", "Civic RS")
        .text("variant", "Turbo")
        .text("price", 500000000)
        .text("type", "hatchback")
}
