pub mod filter;
pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;

pub use filter::{Filter, FilterError, FilterField};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Column, Row, SqlValue, Store};
