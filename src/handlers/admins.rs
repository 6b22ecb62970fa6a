// handlers/admins.rs - /api/admins handlers (all admin-only)

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthAdmin, Message};
use crate::models::AdminRecord;
use crate::services::AdminService;

use super::form::ResourceForm;
use super::resources::parse_id;

fn service(state: &AppState) -> AdminService {
    AdminService::new(state.store.clone())
}

pub async fn list(State(state): State<AppState>, AuthAdmin(_claims): AuthAdmin) -> ApiResult<Vec<AdminRecord>> {
    Ok(ApiResponse::success(service(&state).list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(claims): AuthAdmin,
    form: ResourceForm,
) -> ApiResult<AdminRecord> {
    let admin = service(&state).create(&form.fields).await?;
    tracing::info!("Admin {} created admin {}", claims.username, admin.username);
    Ok(ApiResponse::created(admin))
}

/// Password is optional; without it the stored hash is kept
pub async fn update(
    State(state): State<AppState>,
    AuthAdmin(claims): AuthAdmin,
    Path(id): Path<String>,
    form: ResourceForm,
) -> ApiResult<AdminRecord> {
    let id = parse_id(&id)?;
    let admin = service(&state).update(id, &form.fields).await?;
    tracing::info!("Admin {} updated admin {}", claims.username, id);
    Ok(ApiResponse::success(admin))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthAdmin(claims): AuthAdmin,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let id = parse_id(&id)?;
    let message = service(&state).delete(id).await?;
    tracing::info!("Admin {} deleted admin {}", claims.username, id);
    Ok(ApiResponse::success(Message { message }))
}
