//! Infrastructure Layer
//!
//! Database and disk implementations of the domain ports.

pub mod local_storage;
pub mod postgres;

pub use local_storage::DiskFileStorage;
pub use postgres::PgTaskRepository;
