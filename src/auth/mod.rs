use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AdminCredential;
use crate::services::{AdminService, ServiceError};

/// Fixed validity window of an issued token
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Same cost as the hashes already present in `admins`
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub website_id: Option<i64>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(admin: &AdminCredential) -> Self {
        let now = Utc::now();
        Self {
            id: admin.id,
            username: admin.username.clone(),
            website_id: admin.website_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token diperlukan")]
    MissingToken,

    #[error("Token tidak valid")]
    InvalidToken,

    #[error("Username tidak ditemukan")]
    NotFound,

    #[error("Password salah")]
    InvalidCredential,

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Issues and verifies admin session tokens (HS256)
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        // Expiry is exact: a token is dead the second its window closes
        let mut validation = Validation::default();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, admin: &AdminCredential) -> Result<String, AuthError> {
        self.encode(&Claims::new(admin))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Bad signature, malformed token and expiry all fold into `InvalidToken`
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!("Rejected token: {}", e);
                AuthError::InvalidToken
            })
    }

    pub fn verify_header(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_jwt_from_headers(headers)?;
        self.verify(token)
    }

    /// Username lookup, then a bcrypt comparison against the stored hash
    pub async fn authenticate(&self, admins: &AdminService, username: &str, password: &str) -> Result<String, AuthError> {
        let admin = admins.find_credential(username).await?.ok_or(AuthError::NotFound)?;
        if !verify_password(password, &admin.password_hash).await? {
            return Err(AuthError::InvalidCredential);
        }
        self.issue(&admin)
    }
}

/// Bearer token from the Authorization header
pub fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken),
    }
}

pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// A malformed stored hash counts as a mismatch
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    match matched {
        Ok(matched) => Ok(matched),
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            Ok(false)
        }
    }
}
