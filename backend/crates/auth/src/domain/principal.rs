//! Authenticated caller identity

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;

/// The authenticated user making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: Email,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
        }
    }
}
