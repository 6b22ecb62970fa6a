use serde_json::Value;

use super::{FieldError, Fields, Resource};
use crate::database::{Column, FilterField, SqlValue};

/// A car listing, looked up publicly by `slug` within a website.
/// `specs` is a free-form table such as `{"engine": "1.5L Turbo"}`.
#[derive(Debug, Clone, Copy)]
pub struct Car;

#[derive(Debug, Clone)]
pub struct CarInput {
    pub website_id: i64,
    pub slug: String,
    pub name: String,
    pub variant: String,
    pub price: i64,
    pub promo: Option<i64>,
    pub car_type: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub specs: Value,
}

impl Resource for Car {
    type Input = CarInput;

    const TABLE: &'static str = "cars";
    const FILTERS: &'static [FilterField] = &[FilterField::integer("website_id"), FilterField::text("slug")];
    const ACCEPTS_IMAGE: bool = true;

    const REQUIRED_MESSAGE: &'static str = "Website ID, slug, nama, varian, harga, dan tipe diperlukan";
    const NOT_FOUND_MESSAGE: &'static str = "Mobil tidak ditemukan";
    const DELETED_MESSAGE: &'static str = "Mobil berhasil dihapus";

    fn parse(fields: &Fields) -> Result<CarInput, FieldError> {
        fields.require_all(&["website_id", "slug", "name", "variant", "price", "type"])?;
        Ok(CarInput {
            website_id: fields.require_integer("website_id")?,
            slug: fields.require_text("slug")?,
            name: fields.require_text("name")?,
            variant: fields.require_text("variant")?,
            price: fields.require_integer("price")?,
            promo: fields.integer("promo")?,
            car_type: fields.require_text("type")?,
            description: fields.text("description"),
            features: fields.string_list("features")?,
            specs: fields.object("specs")?,
        })
    }

    fn columns(input: CarInput) -> Vec<Column> {
        vec![
            Column::new("website_id", SqlValue::BigInt(Some(input.website_id))),
            Column::new("slug", SqlValue::text(input.slug)),
            Column::new("name", SqlValue::text(input.name)),
            Column::new("variant", SqlValue::text(input.variant)),
            Column::new("price", SqlValue::BigInt(Some(input.price))),
            Column::new("promo", SqlValue::BigInt(input.promo)),
            Column::new("type", SqlValue::text(input.car_type)),
            Column::new("description", SqlValue::Text(input.description)),
            Column::new("features", SqlValue::TextArray(input.features)),
            Column::new("specs", SqlValue::Json(input.specs)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => Fields::from(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn optional_fields_default_to_empty_values() {
        let input = Car::parse(&fields(json!({
            "website_id": 1,
            "slug": "civic-rs",
            "name": "Civic RS",
            "variant": "Turbo",
            "price": 500000000,
            "type": "hatchback",
        })))
        .unwrap();

        assert_eq!(input.promo, None);
        assert_eq!(input.description, None);
        assert!(input.features.is_empty());
        assert_eq!(input.specs, json!({}));

        let columns = Car::columns(input);
        let specs = columns.iter().find(|c| c.name == "specs").unwrap();
        assert_eq!(specs.value, SqlValue::Json(json!({})));
        assert!(columns.iter().all(|c| c.name != "image_url"));
    }

    #[test]
    fn missing_required_field_is_reported_before_invalid_ones() {
        let err = Car::parse(&fields(json!({
            "website_id": "abc",
            "slug": "civic-rs",
            "name": "Civic RS",
            "variant": "Turbo",
            "type": "hatchback",
        })))
        .unwrap_err();
        assert_eq!(err, FieldError::Missing("price"));
    }

    #[test]
    fn multipart_strings_are_parsed() {
        let input = Car::parse(&fields(json!({
            "website_id": "2",
            "slug": "brio",
            "name": "Brio",
            "variant": "E CVT",
            "price": "180000000",
            "promo": "175000000",
            "type": "city car",
            "features": "[\"ABS\",\"Dual airbag\"]",
            "specs": "{\"engine\":\"1.2L\"}",
        })))
        .unwrap();
        assert_eq!(input.website_id, 2);
        assert_eq!(input.promo, Some(175000000));
        assert_eq!(input.features, vec!["ABS", "Dual airbag"]);
        assert_eq!(input.specs, json!({ "engine": "1.2L" }));
    }
}
