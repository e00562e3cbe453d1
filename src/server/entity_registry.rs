//! Entity registry for collecting the routes of each entity

use crate::core::entity::Record;
use crate::entities::{Task, User};
use crate::server::handlers::{tasks, users};
use crate::server::state::AppState;
use axum::Router;
use axum::routing::post;
use std::collections::HashMap;

/// Trait that describes how to build routes for an entity
///
/// Routes live under `/api/{plural}` and take their parameters from the
/// request body.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "task")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "tasks")
    fn plural(&self) -> &str;

    /// Build the routes for this entity
    fn build_routes(&self) -> Router<AppState>;

    /// Path prefix of every route of this entity
    fn base_path(&self) -> String {
        format!("/api/{}", self.plural())
    }
}

/// Routes for [`User`]
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        User::schema().entity_type
    }

    fn plural(&self) -> &str {
        User::schema().plural
    }

    fn build_routes(&self) -> Router<AppState> {
        let base = self.base_path();
        Router::new()
            .route(&base, post(users::list_users))
            .route(&format!("{base}/detail"), post(users::get_user))
            .route(&format!("{base}/create"), post(users::create_user))
            .route(&format!("{base}/update"), post(users::update_user))
            .route(&format!("{base}/delete"), post(users::delete_user))
            .route(&format!("{base}/bulk-delete"), post(users::bulk_delete_users))
            .route(&format!("{base}/invite"), post(users::invite_user))
            .route(&format!("{base}/activate"), post(users::activate_user))
            .route(&format!("{base}/suspend"), post(users::suspend_user))
            .route(&format!("{base}/stats"), post(users::user_stats))
    }
}

/// Routes for [`Task`]
pub struct TaskDescriptor;

impl EntityDescriptor for TaskDescriptor {
    fn entity_type(&self) -> &str {
        Task::schema().entity_type
    }

    fn plural(&self) -> &str {
        Task::schema().plural
    }

    fn build_routes(&self) -> Router<AppState> {
        let base = self.base_path();
        Router::new()
            .route(&base, post(tasks::list_tasks))
            .route(&format!("{base}/"), post(tasks::list_tasks))
            .route(&format!("{base}/detail"), post(tasks::get_task))
            .route(&format!("{base}/create"), post(tasks::create_task))
            .route(&format!("{base}/update"), post(tasks::update_task))
            .route(&format!("{base}/delete"), post(tasks::delete_task))
            .route(&format!("{base}/bulk-delete"), post(tasks::bulk_delete_tasks))
            .route(&format!("{base}/status"), post(tasks::update_task_status))
            .route(&format!("{base}/assign"), post(tasks::assign_task))
            .route(&format!("{base}/import"), post(tasks::import_tasks))
            .route(&format!("{base}/export"), post(tasks::export_tasks))
            .route(&format!("{base}/stats"), post(tasks::task_stats))
            .route(&format!("{base}/dashboard"), post(tasks::dashboard))
    }
}

/// Registry for all entities in the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name will be used as the key.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router<AppState> {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
