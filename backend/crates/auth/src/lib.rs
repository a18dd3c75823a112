//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and service traits
//! - `application/` - Use cases (register, login, authenticate)
//! - `infra/` - PostgreSQL repository and JWT auth service
//! - `presentation/` - GraphQL resolvers and bearer middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Stateless HS256 bearer tokens carrying `{userId, email}`
//! - Unknown email and wrong password are indistinguishable to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{Principal, User, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::{JwtAuthService, PgUserRepository};
pub use presentation::{AuthMutation, AuthQuery, AuthState, PgAuthState, UserObject};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
