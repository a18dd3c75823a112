//! Presentation Layer
//!
//! GraphQL resolvers, the multipart upload endpoint and shared state.

pub mod dto;
pub mod graphql;
pub mod handlers;
pub mod router;
pub mod state;

pub use graphql::{FileObject, TaskMutation, TaskObject, TaskQuery};
pub use router::{upload_router, upload_router_generic};
pub use state::{PgTaskState, TaskState};
