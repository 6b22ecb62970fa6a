use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::AuthService;
use crate::database::Store;
use crate::handlers::{self, admins, resources};
use crate::models::{Car, Faq, Resource, SalesContact, Testimonial, Website};
use crate::uploads::UploadSink;

/// Default request body ceiling. Larger bodies are refused before any
/// handler runs; the per-image ceiling is enforced by the upload sink.
pub const MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub uploads: Arc<UploadSink>,
    pub auth: Arc<AuthService>,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, uploads: UploadSink, auth: AuthService) -> Self {
        Self {
            store,
            uploads: Arc::new(uploads),
            auth: Arc::new(auth),
            body_limit: MAX_REQUEST_BYTES,
        }
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// The full HTTP surface, without CORS
pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());
    let body_limit = state.body_limit;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/admin/login", post(handlers::login))
        .merge(resource_routes::<Website>("websites"))
        .merge(resource_routes::<SalesContact>("sales_info"))
        .merge(resource_routes::<Car>("cars"))
        .merge(resource_routes::<Testimonial>("testimonials"))
        .merge(resource_routes::<Faq>("faqs"))
        .route("/api/admins", get(admins::list).post(admins::create))
        .route("/api/admins/:id", axum::routing::put(admins::update).delete(admins::delete))
        .nest_service("/api/uploads", uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn resource_routes<R: Resource>(name: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/{}", name),
            get(resources::list::<R>).post(resources::create::<R>),
        )
        .route(
            &format!("/api/{}/:id", name),
            get(resources::show::<R>)
                .put(resources::update::<R>)
                .delete(resources::delete::<R>),
        )
}

/// CORS for the dealership frontend; an unparseable origin falls back to any
pub fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION]);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Invalid FRONTEND_URL {:?}: {}; allowing any origin", frontend_url, e);
            layer.allow_origin(Any)
        }
    }
}
