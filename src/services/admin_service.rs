use std::sync::Arc;

use crate::auth;
use crate::database::store::{decode_row, decode_rows};
use crate::database::{Column, Filter, SqlValue, Store};
use crate::models::admin::{AdminInput, ADMIN_TABLE};
use crate::models::{AdminCredential, AdminRecord, Fields};

use super::ServiceError;

const CREATE_REQUIRED: &str = "Username, password, dan website ID diperlukan";
const UPDATE_REQUIRED: &str = "Username dan website ID diperlukan";
const NOT_FOUND: &str = "Admin tidak ditemukan";
const DELETED: &str = "Admin berhasil dihapus";

/// Admin accounts. Every value leaving this service is an [`AdminRecord`],
/// which has no hash field; only [`AdminService::find_credential`] sees it.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn Store>,
}

impl AdminService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<AdminRecord>, ServiceError> {
        let rows = self.store.select(ADMIN_TABLE, &Filter::new()).await?;
        Ok(decode_rows(ADMIN_TABLE, rows)?)
    }

    pub async fn create(&self, fields: &Fields) -> Result<AdminRecord, ServiceError> {
        let input = AdminInput::parse_new(fields).map_err(|e| ServiceError::from_field(e, CREATE_REQUIRED))?;
        let columns = self.columns(input).await?;

        let row = self.store.insert(ADMIN_TABLE, &columns).await?;
        Ok(decode_row(ADMIN_TABLE, row)?)
    }

    /// Re-hashes only when a new password is supplied
    pub async fn update(&self, id: i64, fields: &Fields) -> Result<AdminRecord, ServiceError> {
        let input = AdminInput::parse_update(fields).map_err(|e| ServiceError::from_field(e, UPDATE_REQUIRED))?;
        let columns = self.columns(input).await?;

        match self.store.update(ADMIN_TABLE, id, &columns).await? {
            Some(row) => Ok(decode_row(ADMIN_TABLE, row)?),
            None => Err(ServiceError::NotFound(NOT_FOUND)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<&'static str, ServiceError> {
        match self.store.delete(ADMIN_TABLE, id).await? {
            Some(_) => Ok(DELETED),
            None => Err(ServiceError::NotFound(NOT_FOUND)),
        }
    }

    /// Case-sensitive username lookup, hash included
    pub async fn find_credential(&self, username: &str) -> Result<Option<AdminCredential>, ServiceError> {
        let filter = Filter::new().eq("username", SqlValue::text(username));
        match self.store.select(ADMIN_TABLE, &filter).await?.into_iter().next() {
            Some(row) => Ok(Some(decode_row(ADMIN_TABLE, row)?)),
            None => Ok(None),
        }
    }

    async fn columns(&self, input: AdminInput) -> Result<Vec<Column>, ServiceError> {
        let mut columns = vec![
            Column::new("username", SqlValue::text(input.username)),
            Column::new("website_id", SqlValue::BigInt(Some(input.website_id))),
        ];
        if let Some(password) = input.password {
            let hash = auth::hash_password(&password)
                .await
                .map_err(|e| ServiceError::PasswordHash(e.to_string()))?;
            columns.push(Column::new("password_hash", SqlValue::text(hash)));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use serde_json::json;

    fn admin_fields(password: Option<&str>) -> Fields {
        let mut fields = Fields::new();
        fields.insert("username", json!("budi"));
        fields.insert("website_id", json!(1));
        if let Some(password) = password {
            fields.insert("password", json!(password));
        }
        fields
    }

    #[tokio::test]
    async fn create_requires_password() {
        let admins = AdminService::new(Arc::new(MemoryStore::new()));
        let err = admins.create(&admin_fields(None)).await.unwrap_err();
        assert_eq!(err.to_string(), CREATE_REQUIRED);
    }

    #[tokio::test]
    async fn update_without_password_keeps_hash() {
        let admins = AdminService::new(Arc::new(MemoryStore::new()));
        let created = admins.create(&admin_fields(Some("rahasia"))).await.unwrap();
        let before = admins.find_credential("budi").await.unwrap().unwrap();

        admins.update(created.id, &admin_fields(None)).await.unwrap();
        let after = admins.find_credential("budi").await.unwrap().unwrap();
        assert_eq!(before.password_hash, after.password_hash);
        assert!(auth::verify_password("rahasia", &after.password_hash).await.unwrap());

        admins.update(created.id, &admin_fields(Some("baru"))).await.unwrap();
        let changed = admins.find_credential("budi").await.unwrap().unwrap();
        assert!(!auth::verify_password("rahasia", &changed.password_hash).await.unwrap());
        assert!(auth::verify_password("baru", &changed.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn listed_admins_carry_no_hash() {
        let admins = AdminService::new(Arc::new(MemoryStore::new()));
        admins.create(&admin_fields(Some("rahasia"))).await.unwrap();

        let rendered = serde_json::to_value(admins.list().await.unwrap()).unwrap();
        assert_eq!(rendered.as_array().map(Vec::len), Some(1));
        assert!(rendered[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let admins = AdminService::new(Arc::new(MemoryStore::new()));
        admins.create(&admin_fields(Some("rahasia"))).await.unwrap();
        assert!(admins.find_credential("Budi").await.unwrap().is_none());
    }
}
