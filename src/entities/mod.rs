//! Entity types: users and tasks
//!
//! Each entity carries its [`Record`](crate::core::Record) implementation
//! (generated by [`impl_record!`](crate::impl_record)), its categorical
//! field types and the typed request bodies of its endpoints.

pub mod macros;

pub mod task;
pub mod user;

pub use task::{
    AssignTaskRequest, CreateTaskRequest, Dashboard, Distribution, ExportTasksRequest,
    ImportTasksRequest, Task, TaskCreate, TaskIdRequest, TaskLabel, TaskListRequest,
    TaskPriority, TaskStats, TaskStatus, TaskStatusRequest, TaskUpdate, UpdateTaskRequest,
    generate_task_id,
};
pub use user::{
    CreateUserRequest, InviteUserRequest, UpdateUserRequest, User, UserCreate, UserIdRequest,
    UserListRequest, UserProfile, UserRole, UserStats, UserStatus, UserUpdate,
};

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Delete several records by id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "at least one id is required"))]
    pub ids: Vec<String>,
}

/// Outcome of a bulk delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationResult {
    pub deleted_count: usize,
    pub failed_count: usize,
    pub failed_ids: Vec<String>,
}

/// Outcome of a task import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported_count: usize,
    pub failed_count: usize,
    pub failed_tasks: Vec<String>,
}

/// Emails that were invited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteResult {
    pub invited_users: Vec<String>,
}

pub(crate) fn default_sort_by() -> String {
    "createdAt".to_string()
}

pub(crate) fn default_sort_order() -> String {
    "desc".to_string()
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_double_option() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.note, None);

        let null: Patch = serde_json::from_value(json!({ "note": null })).unwrap();
        assert_eq!(null.note, Some(None));

        let set: Patch = serde_json::from_value(json!({ "note": "x" })).unwrap();
        assert_eq!(set.note, Some(Some("x".to_string())));
    }

    #[test]
    fn test_bulk_delete_requires_ids() {
        let empty: BulkDeleteRequest = serde_json::from_value(json!({ "ids": [] })).unwrap();
        assert!(empty.validate().is_err());

        let some: BulkDeleteRequest = serde_json::from_value(json!({ "ids": ["a"] })).unwrap();
        assert!(some.validate().is_ok());
    }
}
