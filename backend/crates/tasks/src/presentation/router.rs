//! Upload Router

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware, routing::post};

use auth::domain::service::AuthService;
use auth::middleware::require_bearer;
use auth::{AuthState, JwtAuthService, PgUserRepository, UserRepository};

use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::storage::FileStorage;
use crate::infra::{DiskFileStorage, PgTaskRepository};
use crate::presentation::handlers;
use crate::presentation::state::{PgTaskState, TaskState};

/// Create the upload router with PostgreSQL and local disk storage
pub fn upload_router(
    state: PgTaskState,
    auth_state: AuthState<PgUserRepository, JwtAuthService>,
) -> Router {
    upload_router_generic(state, auth_state)
}

/// Create a generic upload router for any repository and storage implementation
pub fn upload_router_generic<R, S, U, A>(state: TaskState<R, S>, auth_state: AuthState<U, A>) -> Router
where
    R: TaskRepository + FileRepository + Send + Sync + 'static,
    S: FileStorage + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    A: AuthService,
{
    let body_limit = state.config.body_limit;

    Router::new()
        .route("/upload", post(handlers::upload_file::<R, S>))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            require_bearer::<U, A>,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
