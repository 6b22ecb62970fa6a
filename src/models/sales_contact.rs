use super::{FieldError, Fields, Resource};
use crate::database::{Column, FilterField, SqlValue};

/// A salesperson shown on a microsite, stored in `sales_info`
#[derive(Debug, Clone, Copy)]
pub struct SalesContact;

#[derive(Debug, Clone)]
pub struct SalesContactInput {
    pub website_id: i64,
    pub name: String,
    pub phone: String,
    pub location: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
}

impl Resource for SalesContact {
    type Input = SalesContactInput;

    const TABLE: &'static str = "sales_info";
    const FILTERS: &'static [FilterField] = &[FilterField::integer("website_id")];
    const ACCEPTS_IMAGE: bool = true;

    const REQUIRED_MESSAGE: &'static str = "Website ID, nama, dan telepon diperlukan";
    const NOT_FOUND_MESSAGE: &'static str = "Sales Info tidak ditemukan";
    const DELETED_MESSAGE: &'static str = "Sales Info berhasil dihapus";

    fn parse(fields: &Fields) -> Result<SalesContactInput, FieldError> {
        fields.require_all(&["website_id", "name", "phone"])?;
        Ok(SalesContactInput {
            website_id: fields.require_integer("website_id")?,
            name: fields.require_text("name")?,
            phone: fields.require_text("phone")?,
            location: fields.text("location"),
            instagram_url: fields.text("instagram_url"),
            tiktok_url: fields.text("tiktok_url"),
        })
    }

    fn columns(input: SalesContactInput) -> Vec<Column> {
        vec![
            Column::new("website_id", SqlValue::BigInt(Some(input.website_id))),
            Column::new("name", SqlValue::text(input.name)),
            Column::new("phone", SqlValue::text(input.phone)),
            Column::new("location", SqlValue::Text(input.location)),
            Column::new("instagram_url", SqlValue::Text(input.instagram_url)),
            Column::new("tiktok_url", SqlValue::Text(input.tiktok_url)),
        ]
    }
}
