//! GraphQL schema and HTTP endpoint
//!
//! Merges the auth and tasks resolvers into one schema served at `/graphql`.
//! The bearer token, if any, is resolved once per HTTP request and attached
//! to every operation in the batch as the caller's [`Principal`].

use async_graphql::http::GraphiQLSource;
use async_graphql::{BatchRequest, BatchResponse, EmptySubscription, MergedObject, Schema};
use auth::{AuthError, AuthMutation, AuthQuery, PgAuthState};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::{Json, Router, routing::get};
use tasks::{PgTaskState, TaskMutation, TaskQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthQuery, TaskQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutation, TaskMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(auth: PgAuthState, tasks: PgTaskState) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(auth)
    .data(tasks)
    .finish()
}

#[derive(Clone)]
pub struct GraphqlState {
    pub schema: AppSchema,
    pub auth: PgAuthState,
}

/// GET /graphql
async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// POST /graphql
async fn graphql_handler(
    State(state): State<GraphqlState>,
    headers: HeaderMap,
    Json(batch): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AuthError> {
    let batch = match state.auth.principal_from_headers(&headers).await? {
        Some(principal) => batch.data(principal),
        None => batch,
    };

    Ok(Json(state.schema.execute_batch(batch).await))
}

pub fn graphql_router(state: GraphqlState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{JwtAuthService, PgUserRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tasks::{DiskFileStorage, PgTaskRepository, UploadConfig};
    use tower::ServiceExt;

    // The pool never connects; these requests fail before touching the database.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let auth = PgAuthState::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(JwtAuthService::new(&auth::AuthConfig::development())),
        );
        let tasks = PgTaskState::new(
            Arc::new(PgTaskRepository::new(pool)),
            Arc::new(DiskFileStorage::new(std::env::temp_dir())),
            UploadConfig::development(),
        );
        let schema = build_schema(auth.clone(), tasks);
        graphql_router(GraphqlState { schema, auth })
    }

    async fn post(query: serde_json::Value) -> serde_json::Value {
        let response = app()
            .oneshot(
                Request::post("/graphql")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(query.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_graphiql_page() {
        let response = app()
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_query_without_token() {
        let body = post(serde_json::json!({ "query": "{ me { id } }" })).await;

        let error = &body["errors"][0];
        assert_eq!(error["message"], "Unauthorized");
        assert_eq!(error["extensions"]["code"], "AUTHENTICATION_ERROR");
        assert_eq!(error["extensions"]["statusCode"], 401);
    }

    #[tokio::test]
    async fn test_tasks_require_authentication() {
        let body = post(serde_json::json!({
            "query": "{ tasks(filter: { filterByStatus: in_progress, sortBy: DUE_DATE }) { id } }"
        }))
        .await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "AUTHENTICATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_validation_error() {
        let body = post(serde_json::json!({
            "query": r#"mutation { register(input: { email: "not-an-email", password: "Password123", name: "N" }) { token } }"#
        }))
        .await;

        let error = &body["errors"][0];
        assert_eq!(error["message"], "Invalid email format");
        assert_eq!(error["extensions"]["code"], "VALIDATION_ERROR");
        assert_eq!(error["extensions"]["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_batched_requests() {
        let body = post(serde_json::json!([
            { "query": "{ me { id } }" },
            { "query": "{ task(id: \"x\") { id } }" }
        ]))
        .await;

        let responses = body.as_array().unwrap();
        assert_eq!(responses.len(), 2);
    }

    #[test]
    fn test_schema_exposes_wire_enums() {
        let sdl = AppSchema::build(
            QueryRoot::default(),
            MutationRoot::default(),
            EmptySubscription,
        )
        .finish()
        .sdl();

        assert!(sdl.contains("in_progress"));
        assert!(sdl.contains("DUE_DATE"));
        assert!(sdl.contains("filterByDueDate"));
        assert!(sdl.contains("type AuthResponse"));

        let task_type = sdl
            .split("type Task {")
            .nth(1)
            .and_then(|rest| rest.split('}').next())
            .unwrap();
        assert!(task_type.contains("user: User!"));
    }
}
