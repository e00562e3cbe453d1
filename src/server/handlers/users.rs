//! User management endpoints
//!
//! All parameters travel in POST bodies. The store enforces unique
//! `username` and `email` values as part of each write, so a collision
//! surfaces as a duplicate error from `create` or `modify`.

use crate::core::entity::Record;
use crate::core::error::{MockerError, MockerResult};
use crate::core::extractors::ValidatedJson;
use crate::core::query::run_query;
use crate::core::response::{ApiResponse, PaginatedResponse, Report};
use crate::entities::{
    BulkDeleteRequest, BulkOperationResult, CreateUserRequest, InviteResult, InviteUserRequest,
    UpdateUserRequest, User, UserIdRequest, UserListRequest, UserStats, UserStatus,
};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::Value;

/// Password given to invited accounts until they set their own
const INVITE_PASSWORD: &str = "temp_password_123";

pub async fn list_users(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserListRequest>,
) -> MockerResult<PaginatedResponse<User>> {
    let users = state.users.all_records().await?;
    Ok(run_query(users, &request, &state.config.pagination).into_response(|user| user))
}

pub async fn get_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserIdRequest>,
) -> MockerResult<Json<User>> {
    Ok(Json(find_user(&state, &request.user_id).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> MockerResult<Json<User>> {
    let mut data = request.user_data;
    let hashed = state.hash_password(std::mem::take(&mut data.password)).await?;
    let user = state.users.create(User::new(data, hashed)).await?;

    tracing::info!(id = %user.id, username = %user.username, "user created");
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> MockerResult<Json<User>> {
    let update = request.user_data;
    let user = state
        .users
        .modify(&request.user_id, Box::new(move |user: &mut User| user.apply(update)))
        .await?
        .ok_or_else(|| MockerError::not_found("User", &request.user_id))?;

    tracing::info!(id = %user.id, "user updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserIdRequest>,
) -> MockerResult<ApiResponse<Value>> {
    state
        .users
        .delete(&request.user_id)
        .await?
        .ok_or_else(|| MockerError::not_found("User", &request.user_id))?;

    tracing::info!(id = %request.user_id, "user deleted");
    Ok(ApiResponse::message("User deleted successfully"))
}

pub async fn bulk_delete_users(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkDeleteRequest>,
) -> MockerResult<Report<BulkOperationResult>> {
    let mut result = BulkOperationResult::default();
    for id in request.ids {
        match state.users.delete(&id).await? {
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
        "bulk user delete"
    );
    Ok(Report::new(
        format!("Bulk delete completed, {} users deleted", result.deleted_count),
        result,
    ))
}

pub async fn invite_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<InviteUserRequest>,
) -> MockerResult<Report<InviteResult>> {
    let hashed = state.hash_password(INVITE_PASSWORD.to_string()).await?;
    let user = state
        .users
        .create(User::invited(&request.email, request.role, hashed))
        .await?;
    tracing::info!(id = %user.id, email = %user.email, "user invited");

    Ok(Report::new(
        "Invitation sent successfully",
        InviteResult {
            invited_users: vec![user.email],
        },
    ))
}

pub async fn activate_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserIdRequest>,
) -> MockerResult<ApiResponse<Value>> {
    set_status(&state, &request.user_id, UserStatus::Active).await?;
    Ok(ApiResponse::message("User activated successfully"))
}

pub async fn suspend_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserIdRequest>,
) -> MockerResult<ApiResponse<Value>> {
    set_status(&state, &request.user_id, UserStatus::Suspended).await?;
    Ok(ApiResponse::message("User suspended successfully"))
}

pub async fn user_stats(State(state): State<AppState>) -> MockerResult<Json<UserStats>> {
    let users = state.users.all_records().await?;
    Ok(Json(UserStats::from_users(&users)))
}

async fn find_user(state: &AppState, id: &str) -> MockerResult<User> {
    state
        .users
        .get(id)
        .await?
        .ok_or_else(|| MockerError::not_found("User", id))
}

async fn set_status(state: &AppState, id: &str, status: UserStatus) -> MockerResult<()> {
    let change = move |user: &mut User| {
        user.status = status;
        user.touch();
    };
    state
        .users
        .modify(id, Box::new(change))
        .await?
        .ok_or_else(|| MockerError::not_found("User", id))?;

    tracing::info!(id, status = %status, "user status changed");
    Ok(())
}
