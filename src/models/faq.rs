use super::{FieldError, Fields, Resource};
use crate::database::{Column, FilterField, SqlValue};

#[derive(Debug, Clone, Copy)]
pub struct Faq;

#[derive(Debug, Clone)]
pub struct FaqInput {
    pub website_id: i64,
    pub question: String,
    pub answer: String,
}

impl Resource for Faq {
    type Input = FaqInput;

    const TABLE: &'static str = "faqs";
    const FILTERS: &'static [FilterField] = &[FilterField::integer("website_id")];
    const ACCEPTS_IMAGE: bool = false;

    const REQUIRED_MESSAGE: &'static str = "Website ID, pertanyaan, dan jawaban diperlukan";
    const NOT_FOUND_MESSAGE: &'static str = "FAQ tidak ditemukan";
    const DELETED_MESSAGE: &'static str = "FAQ berhasil dihapus";

    fn parse(fields: &Fields) -> Result<FaqInput, FieldError> {
        fields.require_all(&["website_id", "question", "answer"])?;
        Ok(FaqInput {
            website_id: fields.require_integer("website_id")?,
            question: fields.require_text("question")?,
            answer: fields.require_text("answer")?,
        })
    }

    fn columns(input: FaqInput) -> Vec<Column> {
        vec![
            Column::new("website_id", SqlValue::BigInt(Some(input.website_id))),
            Column::new("question", SqlValue::text(input.question)),
            Column::new("answer", SqlValue::text(input.answer)),
        ]
    }
}
