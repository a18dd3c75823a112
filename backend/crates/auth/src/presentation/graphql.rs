//! GraphQL resolvers for authentication
//!
//! Query and Mutation resolvers for registration, login and the current user.
//! Resolvers read [`PgAuthState`] and the optional [`Principal`] from the
//! request context.

use async_graphql::{Context, ID, InputObject, Object, Result as GqlResult, SimpleObject};
use chrono::{DateTime, Utc};
use kernel::error::conversions::GraphqlResultExt;

use crate::application::{AuthOutput, LoginInput, RegisterInput};
use crate::domain::entity::user::User;
use crate::domain::principal::Principal;
use crate::error::AuthError;
use crate::presentation::state::PgAuthState;

/// Public view of a user
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.user_id.to_string()),
            email: user.email.into_db(),
            name: user.name.into_inner(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token plus the authenticated user
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "AuthResponse")]
pub struct AuthPayload {
    pub token: String,
    pub user: UserObject,
}

impl From<AuthOutput> for AuthPayload {
    fn from(output: AuthOutput) -> Self {
        Self {
            token: output.token,
            user: output.user.into(),
        }
    }
}

#[derive(InputObject)]
#[graphql(name = "RegisterInput")]
pub struct RegisterArgs {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(InputObject)]
#[graphql(name = "LoginInput")]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

/// Principal of the current request, or an authentication error
pub fn require_principal<'a>(ctx: &Context<'a>) -> GqlResult<&'a Principal> {
    ctx.data_opt::<Principal>()
        .ok_or(AuthError::Unauthenticated)
        .into_graphql()
}

/// Authentication Query resolvers
#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// Currently authenticated user
    async fn me(&self, ctx: &Context<'_>) -> GqlResult<UserObject> {
        let principal = require_principal(ctx)?;
        let state = ctx.data::<PgAuthState>()?;

        let user = state
            .authenticate()
            .current_user(principal)
            .await
            .into_graphql()?;
        Ok(user.into())
    }
}

/// Authentication Mutation resolvers
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Create an account and return a token
    async fn register(&self, ctx: &Context<'_>, input: RegisterArgs) -> GqlResult<AuthPayload> {
        let state = ctx.data::<PgAuthState>()?;

        let output = state
            .register()
            .execute(RegisterInput {
                email: input.email,
                password: input.password,
                name: input.name,
            })
            .await
            .into_graphql()?;
        Ok(output.into())
    }

    /// Exchange email and password for a token
    async fn login(&self, ctx: &Context<'_>, input: LoginArgs) -> GqlResult<AuthPayload> {
        let state = ctx.data::<PgAuthState>()?;

        let output = state
            .login()
            .execute(LoginInput {
                email: input.email,
                password: input.password,
            })
            .await
            .into_graphql()?;
        Ok(output.into())
    }
}
