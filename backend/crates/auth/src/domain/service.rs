//! Auth Service Trait
//!
//! Token issuance and password hashing, kept behind a trait so use cases
//! do not depend on a concrete signing or hashing scheme.

use platform::token::TokenClaims;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::AuthResult;

/// Credential service
///
/// Methods are synchronous; hashing is CPU bound and callers run it on the
/// blocking pool.
pub trait AuthService: Send + Sync + 'static {
    /// Issue a signed token for the user
    fn generate_token(&self, user: &User) -> AuthResult<String>;

    /// Verify a token, returning its claims
    fn verify_token(&self, token: &str) -> AuthResult<TokenClaims>;

    /// Hash a password for storage
    fn hash_password(&self, password: &RawPassword) -> AuthResult<UserPassword>;

    /// Check a password against a stored hash
    fn verify_password(&self, password: &RawPassword, hash: &UserPassword) -> bool;
}
