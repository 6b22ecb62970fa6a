use super::{FieldError, Fields, Resource};
use crate::database::{Column, FilterField, SqlValue};

/// Root tenant: one dealership microsite (`id`, `domain`, `name`)
#[derive(Debug, Clone, Copy)]
pub struct Website;

#[derive(Debug, Clone)]
pub struct WebsiteInput {
    pub domain: String,
    pub name: String,
}

impl Resource for Website {
    type Input = WebsiteInput;

    const TABLE: &'static str = "websites";
    const FILTERS: &'static [FilterField] = &[FilterField::text("domain")];
    const ACCEPTS_IMAGE: bool = false;

    const REQUIRED_MESSAGE: &'static str = "Domain dan nama diperlukan";
    const NOT_FOUND_MESSAGE: &'static str = "Website tidak ditemukan";
    const DELETED_MESSAGE: &'static str = "Website berhasil dihapus";

    fn parse(fields: &Fields) -> Result<WebsiteInput, FieldError> {
        fields.require_all(&["domain", "name"])?;
        Ok(WebsiteInput {
            domain: fields.require_text("domain")?,
            name: fields.require_text("name")?,
        })
    }

    fn columns(input: WebsiteInput) -> Vec<Column> {
        vec![
            Column::new("domain", SqlValue::text(input.domain)),
            Column::new("name", SqlValue::text(input.name)),
        ]
    }
}
