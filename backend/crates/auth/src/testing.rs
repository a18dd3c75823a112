//! In-memory test doubles

use std::collections::HashMap;
use std::sync::Mutex;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::infra::jwt::JwtAuthService;

pub const TEST_SECRET: &[u8] = b"test-signing-secret";

pub fn test_auth_service() -> JwtAuthService {
    JwtAuthService::new(&AuthConfig::with_secret(TEST_SECRET))
}

pub fn sample_user(email: &str) -> User {
    let raw = RawPassword::new("Password123".to_string()).unwrap();
    User::new(
        Email::new(email).unwrap(),
        UserName::new("Sample User").unwrap(),
        UserPassword::from_raw(&raw, None).unwrap(),
    )
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().values().any(|u| &u.email == email))
    }
}
