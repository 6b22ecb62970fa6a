// handlers/login.rs - POST /api/admin/login handler

use axum::{body::Bytes, extract::State};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::AuthError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AdminService;

use super::form::json_fields;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange `{username, password}` for a 24-hour bearer token
pub async fn login(State(state): State<AppState>, body: Bytes) -> ApiResult<LoginResponse> {
    let fields = json_fields(&body)?;
    if fields.is_empty() {
        return Err(ApiError::bad_request("Body permintaan kosong"));
    }

    let (Some(username), Some(password)) = (fields.text("username"), fields.text("password")) else {
        return Err(ApiError::bad_request("Username dan password diperlukan"));
    };

    let admins = AdminService::new(state.store.clone());
    match state.auth.authenticate(&admins, &username, &password).await {
        Ok(token) => {
            tracing::info!("Admin {} logged in", username);
            Ok(ApiResponse::success(LoginResponse { token }))
        }
        Err(err @ (AuthError::NotFound | AuthError::InvalidCredential)) => {
            tracing::warn!("Failed login for {}: {}", username, err);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
