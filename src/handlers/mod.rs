// handlers/mod.rs - HTTP handlers
//
// Public (no auth): login, health, resource list/show
// Admin (bearer token via AuthAdmin): resource create/update/delete, /admins

pub mod admins;
pub mod form;
pub mod health;
pub mod login;
pub mod resources;

pub use form::ResourceForm;
pub use health::health;
pub use login::login;
