use super::{FieldError, Fields, Resource};
use crate::database::{Column, FilterField, SqlValue};

/// A customer review; `car` names the car it is about
#[derive(Debug, Clone, Copy)]
pub struct Testimonial;

#[derive(Debug, Clone)]
pub struct TestimonialInput {
    pub website_id: i64,
    pub name: String,
    pub car: String,
    pub stars: i32,
    pub text: String,
}

impl Resource for Testimonial {
    type Input = TestimonialInput;

    const TABLE: &'static str = "testimonials";
    const FILTERS: &'static [FilterField] = &[FilterField::integer("website_id")];
    const ACCEPTS_IMAGE: bool = true;

    const REQUIRED_MESSAGE: &'static str = "Website ID, nama, mobil, bintang, dan teks diperlukan";
    const NOT_FOUND_MESSAGE: &'static str = "Testimoni tidak ditemukan";
    const DELETED_MESSAGE: &'static str = "Testimoni berhasil dihapus";

    fn parse(fields: &Fields) -> Result<TestimonialInput, FieldError> {
        fields.require_all(&["website_id", "name", "car", "stars", "text"])?;
        let stars = fields.require_integer("stars")?;
        Ok(TestimonialInput {
            website_id: fields.require_integer("website_id")?,
            name: fields.require_text("name")?,
            car: fields.require_text("car")?,
            stars: i32::try_from(stars).map_err(|_| FieldError::Invalid("stars"))?,
            text: fields.require_text("text")?,
        })
    }

    fn columns(input: TestimonialInput) -> Vec<Column> {
        vec![
            Column::new("website_id", SqlValue::BigInt(Some(input.website_id))),
            Column::new("name", SqlValue::text(input.name)),
            Column::new("car", SqlValue::text(input.car)),
            Column::new("stars", SqlValue::Int(Some(input.stars))),
            Column::new("text", SqlValue::text(input.text)),
        ]
    }
}
