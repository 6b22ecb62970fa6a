use crate::database::{Column, FilterField};

pub mod admin;
pub mod car;
pub mod faq;
pub mod fields;
pub mod sales_contact;
pub mod testimonial;
pub mod website;

pub use admin::{AdminCredential, AdminRecord};
pub use car::Car;
pub use faq::Faq;
pub use fields::{FieldError, Fields};
pub use sales_contact::SalesContact;
pub use testimonial::Testimonial;
pub use website::Website;

/// Column holding the public path of a resource's uploaded image
pub const IMAGE_COLUMN: &str = "image_url";

/// A content resource served publicly and edited by admins.
///
/// Implementors are marker types. Stored records travel as whole rows so
/// columns added to a table reach clients without a code change; only the
/// input side is typed. The constants carry the table, the query
/// parameters allowed as list filters and the messages returned to clients.
pub trait Resource: Send + Sync + 'static {
    type Input: Send;

    const TABLE: &'static str;
    const FILTERS: &'static [FilterField];
    /// Whether create/update accept an `image_url` file part
    const ACCEPTS_IMAGE: bool;

    const REQUIRED_MESSAGE: &'static str;
    const NOT_FOUND_MESSAGE: &'static str;
    const DELETED_MESSAGE: &'static str;

    fn parse(fields: &Fields) -> Result<Self::Input, FieldError>;

    /// Columns written on create and update, excluding the image column
    fn columns(input: Self::Input) -> Vec<Column>;
}
