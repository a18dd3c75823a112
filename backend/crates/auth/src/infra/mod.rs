//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod jwt;
pub mod postgres;

pub use jwt::JwtAuthService;
pub use postgres::PgUserRepository;
