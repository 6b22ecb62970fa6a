use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::database::{Column, Filter, Row, SqlValue, Store};
use crate::models::{Fields, Resource, IMAGE_COLUMN};
use crate::uploads::{ImageUpload, UploadSink};

use super::ServiceError;

/// CRUD contract shared by the five content resources. Records come back
/// as the full stored row.
pub struct ResourceService<R> {
    store: Arc<dyn Store>,
    uploads: Arc<UploadSink>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn Store>, uploads: Arc<UploadSink>) -> Self {
        Self {
            store,
            uploads,
            _resource: PhantomData,
        }
    }

    /// Records matching every whitelisted query parameter present
    pub async fn list(&self, query: &HashMap<String, String>) -> Result<Vec<Row>, ServiceError> {
        let filter = Filter::from_query(R::FILTERS, query)?;
        Ok(self.store.select(R::TABLE, &filter).await?)
    }

    pub async fn find(&self, id: i64) -> Result<Row, ServiceError> {
        let filter = Filter::new().eq("id", SqlValue::BigInt(Some(id)));
        self.store
            .select(R::TABLE, &filter)
            .await?
            .into_iter()
            .next()
            .ok_or(ServiceError::NotFound(R::NOT_FOUND_MESSAGE))
    }

    pub async fn create(&self, fields: &Fields, image: Option<&ImageUpload>) -> Result<Row, ServiceError> {
        let columns = self.prepare(fields, image)?;
        let image_path = self.store_image(image).await?;

        let mut columns = columns;
        if R::ACCEPTS_IMAGE {
            columns.push(Column::new(IMAGE_COLUMN, SqlValue::Text(image_path)));
        }

        Ok(self.store.insert(R::TABLE, &columns).await?)
    }

    /// Without a new image the image column is left out of the statement, so
    /// the stored path survives in the same atomic update.
    pub async fn update(&self, id: i64, fields: &Fields, image: Option<&ImageUpload>) -> Result<Row, ServiceError> {
        let mut columns = self.prepare(fields, image)?;
        if let Some(path) = self.store_image(image).await? {
            columns.push(Column::new(IMAGE_COLUMN, SqlValue::text(path)));
        }

        match self.store.update(R::TABLE, id, &columns).await? {
            Some(row) => Ok(row),
            None => Err(ServiceError::NotFound(R::NOT_FOUND_MESSAGE)),
        }
    }

    /// Stored image files are not removed
    pub async fn delete(&self, id: i64) -> Result<&'static str, ServiceError> {
        match self.store.delete(R::TABLE, id).await? {
            Some(_) => Ok(R::DELETED_MESSAGE),
            None => Err(ServiceError::NotFound(R::NOT_FOUND_MESSAGE)),
        }
    }

    /// Image rules first, then field rules; nothing is written yet
    fn prepare(&self, fields: &Fields, image: Option<&ImageUpload>) -> Result<Vec<Column>, ServiceError> {
        if let (true, Some(upload)) = (R::ACCEPTS_IMAGE, image) {
            self.uploads.check(upload)?;
        }
        let input = R::parse(fields).map_err(|e| ServiceError::from_field(e, R::REQUIRED_MESSAGE))?;
        Ok(R::columns(input))
    }

    async fn store_image(&self, image: Option<&ImageUpload>) -> Result<Option<String>, ServiceError> {
        match image {
            Some(upload) if R::ACCEPTS_IMAGE => Ok(Some(self.uploads.store(upload).await?)),
            _ => Ok(None),
        }
    }
}
