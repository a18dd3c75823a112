//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the auth service port.

pub mod entity;
pub mod principal;
pub mod repository;
pub mod service;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use principal::Principal;
pub use repository::UserRepository;
pub use service::AuthService;
