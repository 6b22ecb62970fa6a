use serde::{Deserialize, Serialize};

use super::{FieldError, Fields};

pub const ADMIN_TABLE: &str = "admins";

/// Admin as exposed to clients. Has no hash field, so rows that
/// carry `password_hash` lose it on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: i64,
    pub username: String,
    pub website_id: Option<i64>,
}

/// Admin row including the stored bcrypt hash. Never serialized.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub website_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct AdminInput {
    pub username: String,
    pub password: Option<String>,
    pub website_id: i64,
}

impl AdminInput {
    /// Create requires a password
    pub fn parse_new(fields: &Fields) -> Result<Self, FieldError> {
        fields.require_all(&["username", "password", "website_id"])?;
        Self::parse(fields)
    }

    /// Update leaves the stored hash alone when no password is given
    pub fn parse_update(fields: &Fields) -> Result<Self, FieldError> {
        fields.require_all(&["username", "website_id"])?;
        Self::parse(fields)
    }

    fn parse(fields: &Fields) -> Result<Self, FieldError> {
        Ok(Self {
            username: fields.require_text("username")?,
            password: fields.text("password"),
            website_id: fields.require_integer("website_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_drops_password_hash() {
        let record: AdminRecord = serde_json::from_value(json!({
            "id": 3,
            "username": "budi",
            "password_hash": "$2b$10$abcdefghijklmnopqrstuv",
            "website_id": 1,
        }))
        .unwrap();
        let rendered = serde_json::to_value(&record).unwrap();
        assert!(rendered.get("password_hash").is_none());
        assert_eq!(rendered["username"], json!("budi"));
    }

    #[test]
    fn password_is_optional_only_on_update() {
        let mut fields = Fields::new();
        fields.insert("username", json!("budi"));
        fields.insert("website_id", json!(1));

        assert_eq!(AdminInput::parse_new(&fields).unwrap_err(), FieldError::Missing("password"));
        let input = AdminInput::parse_update(&fields).unwrap();
        assert_eq!(input.password, None);
    }
}
