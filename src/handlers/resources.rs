// handlers/resources.rs - CRUD handlers shared by the five content resources
//
// GET    /api/<resource>      public list with whitelisted equality filters
// GET    /api/<resource>/:id  public single record
// POST   /api/<resource>      admin create (JSON or multipart)
// PUT    /api/<resource>/:id  admin update (JSON or multipart)
// DELETE /api/<resource>/:id  admin delete

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::database::Row;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthAdmin, Message};
use crate::models::Resource;
use crate::services::{ResourceService, ServiceError};

use super::form::ResourceForm;

fn service<R: Resource>(state: &AppState) -> ResourceService<R> {
    ResourceService::new(state.store.clone(), state.uploads.clone())
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid_id()),
    }
}

/// Never an error body: any failure, a malformed filter value included,
/// answers 500 with an empty list.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    match service::<R>(&state).list(&query).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => {
            match &e {
                ServiceError::Validation(_) => tracing::warn!("Rejected {} filter: {}", R::TABLE, e),
                _ => tracing::error!("Error fetching {}: {}", R::TABLE, e),
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!([]))).into_response()
        }
    }
}

pub async fn show<R: Resource>(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Row> {
    let id = parse_id(&id)?;
    Ok(ApiResponse::success(service::<R>(&state).find(id).await?))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    AuthAdmin(_claims): AuthAdmin,
    form: ResourceForm,
) -> ApiResult<Row> {
    let record = service::<R>(&state).create(&form.fields, form.image.as_ref()).await?;
    tracing::info!("Created {} record", R::TABLE);
    Ok(ApiResponse::created(record))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    AuthAdmin(_claims): AuthAdmin,
    Path(id): Path<String>,
    form: ResourceForm,
) -> ApiResult<Row> {
    let id = parse_id(&id)?;
    let record = service::<R>(&state).update(id, &form.fields, form.image.as_ref()).await?;
    tracing::info!("Updated {} record {}", R::TABLE, id);
    Ok(ApiResponse::success(record))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    AuthAdmin(_claims): AuthAdmin,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let id = parse_id(&id)?;
    let message = service::<R>(&state).delete(id).await?;
    tracing::info!("Deleted {} record {}", R::TABLE, id);
    Ok(ApiResponse::success(Message { message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
    }
}
