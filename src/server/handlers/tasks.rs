//! Task management endpoints

use crate::core::entity::Record;
use crate::core::error::{EntityError, MockerError, MockerResult};
use crate::core::extractors::ValidatedJson;
use crate::core::query::run_query;
use crate::core::response::{ApiResponse, PaginatedResponse, Report};
use crate::entities::{
    AssignTaskRequest, BulkDeleteRequest, BulkOperationResult, CreateTaskRequest, Dashboard,
    ExportTasksRequest, ImportResult, ImportTasksRequest, Task, TaskIdRequest, TaskListRequest,
    TaskStats, TaskStatusRequest, UpdateTaskRequest,
};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::Value;

pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TaskListRequest>,
) -> MockerResult<PaginatedResponse<Task>> {
    let tasks = state.tasks.all_records().await?;
    Ok(run_query(tasks, &request, &state.config.pagination).into_response(|task| task))
}

pub async fn get_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TaskIdRequest>,
) -> MockerResult<Json<Task>> {
    Ok(Json(find_task(&state, &request.task_id).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> MockerResult<Json<Task>> {
    ensure_assignee(&state, request.task_data.assignee.as_deref()).await?;

    let task = state.tasks.create(Task::new(request.task_data)).await?;
    tracing::info!(id = %task.id, "task created");
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> MockerResult<Json<Task>> {
    ensure_task_exists(&state, &request.task_id).await?;
    ensure_assignee(&state, request.task_data.new_assignee()).await?;

    let update = request.task_data;
    let task = modify_task(&state, &request.task_id, move |task| task.apply(update)).await?;

    tracing::info!(id = %task.id, "task updated");
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TaskIdRequest>,
) -> MockerResult<ApiResponse<Value>> {
    state
        .tasks
        .delete(&request.task_id)
        .await?
        .ok_or_else(|| MockerError::not_found("Task", &request.task_id))?;

    tracing::info!(id = %request.task_id, "task deleted");
    Ok(ApiResponse::message("Task deleted successfully"))
}

pub async fn bulk_delete_tasks(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkDeleteRequest>,
) -> MockerResult<Report<BulkOperationResult>> {
    let mut result = BulkOperationResult::default();
    for id in request.ids {
        match state.tasks.delete(&id).await? {
            Some(_) => result.deleted_count += 1,
            None => {
                result.failed_count += 1;
                result.failed_ids.push(id);
            }
        }
    }

    tracing::info!(
        deleted = result.deleted_count,
        failed = result.failed_count,
        "bulk task delete"
    );
    Ok(Report::new(
        format!("Bulk delete completed, {} tasks deleted", result.deleted_count),
        result,
    ))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TaskStatusRequest>,
) -> MockerResult<ApiResponse<Value>> {
    let status = request.status;
    modify_task(&state, &request.task_id, move |task| {
        task.status = status;
        task.touch();
    })
    .await?;

    tracing::info!(id = %request.task_id, status = %request.status, "task status changed");
    Ok(ApiResponse::message("Task status updated successfully"))
}

pub async fn assign_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AssignTaskRequest>,
) -> MockerResult<ApiResponse<Value>> {
    ensure_task_exists(&state, &request.task_id).await?;
    ensure_assignee(&state, Some(request.assignee_id.as_str())).await?;

    let assignee = request.assignee_id;
    modify_task(&state, &request.task_id, move |task| {
        task.assignee = Some(assignee);
        task.touch();
    })
    .await?;

    tracing::info!(id = %request.task_id, "task assigned");
    Ok(ApiResponse::message("Task assigned successfully"))
}

/// Create each task on its own; one bad assignee does not abort the batch
pub async fn import_tasks(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ImportTasksRequest>,
) -> MockerResult<Report<ImportResult>> {
    let mut result = ImportResult::default();
    for data in request.tasks {
        if ensure_assignee(&state, data.assignee.as_deref()).await.is_err() {
            tracing::debug!(title = %data.title, "import skipped unknown assignee");
            result.failed_count += 1;
            result.failed_tasks.push(data.title);
            continue;
        }

        let title = data.title.clone();
        match state.tasks.create(Task::new(data)).await {
            Ok(_) => result.imported_count += 1,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "import failed");
                result.failed_count += 1;
                result.failed_tasks.push(title);
            }
        }
    }

    tracing::info!(
        imported = result.imported_count,
        failed = result.failed_count,
        "task import"
    );
    Ok(Report::new(
        format!("Bulk import completed, {} tasks imported", result.imported_count),
        result,
    ))
}

/// Every matching task, unpaginated
pub async fn export_tasks(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ExportTasksRequest>,
) -> MockerResult<ApiResponse<Vec<Task>>> {
    let tasks = request.criteria().apply(state.tasks.all_records().await?);
    let message = format!("Exported {} tasks", tasks.len());
    Ok(ApiResponse::ok(tasks).with_message(message))
}

pub async fn task_stats(State(state): State<AppState>) -> MockerResult<Json<TaskStats>> {
    let tasks = state.tasks.all_records().await?;
    Ok(Json(TaskStats::from_tasks(&tasks)))
}

pub async fn dashboard(State(state): State<AppState>) -> MockerResult<ApiResponse<Dashboard>> {
    let tasks = state.tasks.all_records().await?;
    Ok(ApiResponse::ok(Dashboard::from_tasks(tasks))
        .with_message("Dashboard data retrieved successfully"))
}

async fn find_task(state: &AppState, id: &str) -> MockerResult<Task> {
    state
        .tasks
        .get(id)
        .await?
        .ok_or_else(|| MockerError::not_found("Task", id))
}

/// Apply `change` to a stored task in one atomic step
async fn modify_task(
    state: &AppState,
    id: &str,
    change: impl FnOnce(&mut Task) + Send + 'static,
) -> MockerResult<Task> {
    state
        .tasks
        .modify(id, Box::new(change))
        .await?
        .ok_or_else(|| MockerError::not_found("Task", id))
}

/// 404 early, so a missing task wins over a bad assignee
async fn ensure_task_exists(state: &AppState, id: &str) -> MockerResult<()> {
    if state.tasks.exists(id).await? {
        return Ok(());
    }
    Err(MockerError::not_found("Task", id))
}

/// Fail if `assignee` is set but names no stored user
async fn ensure_assignee(state: &AppState, assignee: Option<&str>) -> MockerResult<()> {
    let Some(id) = assignee else {
        return Ok(());
    };
    if state.users.exists(id).await? {
        return Ok(());
    }
    Err(EntityError::InvalidReference {
        field: "assignee".to_string(),
        entity_type: "user".to_string(),
    }
    .into())
}
