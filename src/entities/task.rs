//! Task entity, its enums, statistics and request bodies

use crate::core::filter::Criteria;
use crate::core::order::{FieldOrder, apply_order};
use crate::core::pagination::PageSpec;
use crate::core::query::ListQuery;
use crate::entities::{default_sort_by, default_sort_order, double_option};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

crate::string_enum! {
    /// Workflow state
    pub enum TaskStatus {
        Backlog => "backlog",
        Todo => "todo",
        InProgress => "in progress",
        Done => "done",
        Canceled => "canceled",
    }
    default = Todo
}

crate::string_enum! {
    pub enum TaskLabel {
        Bug => "bug",
        Feature => "feature",
        Documentation => "documentation",
    }
    default = Feature
}

crate::string_enum! {
    pub enum TaskPriority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
    default = Medium
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// `TASK-` followed by eight uppercase hex digits
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub label: TaskLabel,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,

    /// Id of the assigned user
    pub assignee: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_record!(Task, "task", "tasks", {
    fields: {
        "id" => id,
        "title" => title,
        "description" => description,
        "status" => status,
        "label" => label,
        "priority" => priority,
        "dueDate" => due_date,
        "assignee" => assignee,
        "createdAt" => created_at,
        "updatedAt" => updated_at,
    },
    searchable: ["title", "description", "id"],
    enums: ["status", "label", "priority"],
});

/// Generate a fresh task id
pub fn generate_task_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TASK-{}", hex[..8].to_uppercase())
}

impl Task {
    pub fn new(data: TaskCreate) -> Self {
        let now = Utc::now();
        Self {
            id: generate_task_id(),
            title: data.title,
            description: data.description,
            status: data.status,
            label: data.label,
            priority: data.priority,
            due_date: data.due_date,
            assignee: data.assignee,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `update`
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = assignee;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields for a new task
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub label: TaskLabel,

    #[serde(default)]
    pub priority: TaskPriority,

    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
}

/// Partial update of a task
///
/// Absent fields are left untouched; `null` clears `description`,
/// `dueDate` and `assignee`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_task_update"))]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    pub status: Option<TaskStatus>,
    pub label: Option<TaskLabel>,
    pub priority: Option<TaskPriority>,

    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
}

fn validate_task_update(update: &TaskUpdate) -> Result<(), ValidationError> {
    match &update.description {
        Some(Some(text)) if text.chars().count() > 2000 => Err(ValidationError::new("length")
            .with_message("description must be at most 2000 characters".into())),
        _ => Ok(()),
    }
}

impl TaskUpdate {
    /// The assignee id being set, if any
    pub fn new_assignee(&self) -> Option<&str> {
        self.assignee.as_ref().and_then(|a| a.as_deref())
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Counts per enumerated value, in declaration order, omitting zeros
pub type Distribution = IndexMap<String, usize>;

fn distribution<E: Copy + PartialEq + std::fmt::Display>(
    tasks: &[Task],
    values: &[E],
    key: impl Fn(&Task) -> E,
) -> Distribution {
    values
        .iter()
        .filter_map(|value| {
            let count = tasks.iter().filter(|t| key(*t) == *value).count();
            (count > 0).then(|| (value.to_string(), count))
        })
        .collect()
}

/// Counts of tasks by status, priority and label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total_tasks: usize,
    pub backlog_tasks: usize,
    pub todo_tasks: usize,
    pub in_progress_tasks: usize,
    pub done_tasks: usize,
    pub canceled_tasks: usize,
    pub tasks_by_priority: Distribution,
    pub tasks_by_label: Distribution,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        Self {
            total_tasks: tasks.len(),
            backlog_tasks: count(TaskStatus::Backlog),
            todo_tasks: count(TaskStatus::Todo),
            in_progress_tasks: count(TaskStatus::InProgress),
            done_tasks: count(TaskStatus::Done),
            canceled_tasks: count(TaskStatus::Canceled),
            tasks_by_priority: distribution(tasks, TaskPriority::ALL, |t| t.priority),
            tasks_by_label: distribution(tasks, TaskLabel::ALL, |t| t.label),
        }
    }
}

/// Number of tasks shown in the dashboard's recent list
pub const RECENT_TASKS: usize = 5;

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub recent_tasks: Vec<Task>,
    pub status_distribution: Distribution,
    pub priority_distribution: Distribution,
}

impl Dashboard {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let status_distribution = distribution(&tasks, TaskStatus::ALL, |t| t.status);
        let priority_distribution = distribution(&tasks, TaskPriority::ALL, |t| t.priority);

        let newest_first = apply_order(tasks, FieldOrder::resolve::<Task>("createdAt", "desc"));

        Self {
            recent_tasks: newest_first.into_iter().take(RECENT_TASKS).collect(),
            status_distribution,
            priority_distribution,
        }
    }
}

// =============================================================================
// Request bodies
// =============================================================================

/// List tasks
///
/// Filter values are plain strings: one that names no status, label or
/// priority matches nothing instead of being rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskListRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub label: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_page() -> i64 {
    1
}

impl ListQuery for TaskListRequest {
    fn criteria(&self) -> Criteria {
        Criteria::new()
            .search(self.search.as_deref())
            .exact("status", self.status.as_deref())
            .exact("label", self.label.as_deref())
            .exact("priority", self.priority.as_deref())
            .exact("assignee", self.assignee.as_deref())
    }

    fn sort(&self) -> (&str, &str) {
        (&self.sort_by, &self.sort_order)
    }

    fn page(&self, default_page_size: i64) -> PageSpec {
        PageSpec::new(self.page, self.page_size.unwrap_or(default_page_size))
    }
}

/// Body naming a single task
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskIdRequest {
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(nested)]
    pub task_data: TaskCreate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    pub task_id: String,
    #[validate(nested)]
    #[serde(default)]
    pub task_data: TaskUpdate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskStatusRequest {
    pub task_id: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignTaskRequest {
    pub task_id: String,
    pub assignee_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportTasksRequest {
    #[validate(nested)]
    pub tasks: Vec<TaskCreate>,
}

/// Export filter; every criterion is optional
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExportTasksRequest {
    pub status: Option<String>,
    pub label: Option<String>,
    pub priority: Option<String>,
}

impl ExportTasksRequest {
    pub fn criteria(&self) -> Criteria {
        Criteria::new()
            .exact("status", self.status.as_deref())
            .exact("label", self.label.as_deref())
            .exact("priority", self.priority.as_deref())
    }
}
