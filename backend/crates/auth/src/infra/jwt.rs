//! JWT-backed AuthService
//!
//! Signs HS256 tokens through `platform::token` and hashes passwords with
//! Argon2id through `platform::password`.

use platform::token::{TokenClaims, TokenError, TokenSigner};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::service::AuthService;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// AuthService implementation using JWT tokens and Argon2id hashes
#[derive(Debug, Clone)]
pub struct JwtAuthService {
    signer: TokenSigner,
    pepper: Option<Vec<u8>>,
}

impl JwtAuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            signer: TokenSigner::new(&config.token_secret, config.token_ttl_secs()),
            pepper: config.password_pepper.clone(),
        }
    }
}

impl AuthService for JwtAuthService {
    fn generate_token(&self, user: &User) -> AuthResult<String> {
        self.signer
            .sign(&user.user_id.to_string(), user.email.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> AuthResult<TokenClaims> {
        self.signer.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::debug!("Rejected expired token"),
                _ => tracing::debug!(error = %e, "Rejected token"),
            }
            AuthError::Unauthenticated
        })
    }

    fn hash_password(&self, password: &RawPassword) -> AuthResult<UserPassword> {
        Ok(UserPassword::from_raw(password, self.pepper.as_deref())?)
    }

    fn verify_password(&self, password: &RawPassword, hash: &UserPassword) -> bool {
        hash.verify(password, self.pepper.as_deref())
    }
}
