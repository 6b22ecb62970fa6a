// handlers/form.rs - create/update request bodies (JSON or multipart)

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Fields, IMAGE_COLUMN};
use crate::uploads::{ImageUpload, UploadError};

/// Text fields of a create/update request plus the optional `image_url` file
#[derive(Debug, Default)]
pub struct ResourceForm {
    pub fields: Fields,
    pub image: Option<ImageUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for ResourceForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return read_multipart(multipart).await;
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::from(UploadError::PayloadTooLarge { size: 0 })
            } else {
                ApiError::bad_request(e.body_text())
            }
        })?;
        Ok(Self {
            fields: json_fields(&body)?,
            image: None,
        })
    }
}

/// An empty body is an empty field set; anything else must be a JSON object
pub fn json_fields(body: &[u8]) -> Result<Fields, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(Fields::from(map)),
        Ok(_) => Err(ApiError::bad_request("Body permintaan harus berupa objek JSON")),
        Err(e) => Err(ApiError::bad_request(format!("JSON tidak valid: {}", e))),
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ResourceForm, ApiError> {
    let mut form = ResourceForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_COLUMN && field.file_name().is_some() {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;

            // A file input left empty by the browser still sends a part
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            form.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        form.fields.insert(name, Value::String(text));
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Multipart body over limit: {}", err);
        ApiError::from(UploadError::PayloadTooLarge { size: 0 })
    } else {
        ApiError::bad_request(err.body_text())
    }
}
