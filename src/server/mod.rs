//! HTTP server: shared state, handlers and the router builder
//!
//! [`ServerBuilder::mock_api`] registers:
//! - `GET /` and `GET /health`
//! - the user and task routes under `/api/users` and `/api/tasks`
//! - the authentication routes under `/api/auth`

pub mod builder;
pub mod entity_registry;
pub mod handlers;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry, TaskDescriptor, UserDescriptor};
pub use state::{AppState, CurrentUser};
