use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::{AuthService, Claims};
use crate::error::ApiError;

/// Admin identity taken from a verified bearer token.
///
/// Handlers that take this extractor never run for a rejected request, so
/// no store access happens on an auth failure.
#[derive(Clone, Debug)]
pub struct AuthAdmin(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<AuthService>::from_ref(state);
        let claims = auth.verify_header(&parts.headers)?;

        tracing::debug!(
            "Admin {} (id {}, website {:?}) authorized for {} {}",
            claims.username,
            claims.id,
            claims.website_id,
            parts.method,
            parts.uri.path()
        );

        Ok(AuthAdmin(claims))
    }
}
