pub mod auth;
pub mod response;

pub use auth::AuthAdmin;
pub use response::{ApiResponse, ApiResult, Message};
