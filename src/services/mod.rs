pub mod admin_service;
pub mod error;
pub mod resource_service;

pub use admin_service::AdminService;
pub use error::ServiceError;
pub use resource_service::ResourceService;
