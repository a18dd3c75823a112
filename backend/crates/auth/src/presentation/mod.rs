//! Presentation Layer
//!
//! GraphQL resolvers, shared state and bearer middleware.

pub mod graphql;
pub mod middleware;
pub mod state;

pub use graphql::{AuthMutation, AuthQuery, UserObject, require_principal};
pub use middleware::require_bearer;
pub use state::{AuthState, PgAuthState, bearer_token};
