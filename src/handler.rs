//! HTTP request handlers for the inventory API
//!
//! Each handler maps one endpoint onto one repository operation:
//! - list, get, create, update and delete for users, computers and
//!   maintenance logs
//! - the aggregate stats endpoint
//!
//! Failures travel back as [`ApiError`], which renders the status code and the
//! `{"error": ...}` body.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::database::AppState;
use crate::error::ApiError;
use crate::model::{
    Computer, ComputerPayload, DeleteResponse, MaintenanceLog, MaintenanceLogEntry,
    MaintenancePayload, Stats, User, UserPayload,
};
use crate::repository::{COMPUTER_NOT_FOUND, MAINTENANCE_NOT_FOUND, USER_NOT_FOUND};

type ApiResult<T> = Result<T, ApiError>;

/// The `{id}` path segment, kept even when axum cannot decode it
type IdPath = Result<Path<String>, PathRejection>;

/// Interprets a path segment as a row id
///
/// A segment that is not an integer, or not even valid UTF-8, cannot match any
/// row, so it is reported with the entity's not-found message.
fn parse_id(path: IdPath, not_found: &str) -> ApiResult<i64> {
    path.ok()
        .and_then(|Path(raw)| raw.trim().parse::<i64>().ok())
        .ok_or_else(|| ApiError::NotFound(not_found.to_string()))
}

// Users

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

/// `GET /api/users/{id}`
///
/// # Response
///
/// - **200 OK** - the user
/// - **404 Not Found** - no user has this id
/// - **500 Internal Server Error** - database failure
pub async fn get_user(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<User>> {
    let id = parse_id(id, USER_NOT_FOUND)?;
    Ok(Json(state.users.get(id).await?))
}

/// `POST /api/users`
///
/// # Response
///
/// - **201 Created** - the stored user
/// - **500 Internal Server Error** - missing field or duplicate email
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let user = state.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /api/users/{id}`
///
/// Replaces name, email, department and position together; omitted fields are
/// written as `null` and rejected by the table.
///
/// # Response
///
/// - **200 OK** - the updated user
/// - **404 Not Found** - no user has this id
/// - **500 Internal Server Error** - missing field or duplicate email
pub async fn update_user(
    State(state): State<AppState>,
    id: IdPath,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let id = parse_id(id, USER_NOT_FOUND)?;
    let Json(payload) = payload?;
    Ok(Json(state.users.update(id, &payload).await?))
}

/// `DELETE /api/users/{id}`
///
/// Computers assigned to the user stay in the inventory, unassigned.
///
/// # Response
///
/// - **200 OK** - `{"message": "User deleted successfully"}`
/// - **404 Not Found** - no user has this id
/// - **500 Internal Server Error** - database failure
pub async fn delete_user(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(id, USER_NOT_FOUND)?;
    state.users.delete(id).await?;
    Ok(Json(DeleteResponse::new("User deleted successfully")))
}

// Computers

/// `GET /api/computers`
pub async fn list_computers(State(state): State<AppState>) -> ApiResult<Json<Vec<Computer>>> {
    Ok(Json(state.computers.list().await?))
}

/// `GET /api/computers/{id}`
///
/// # Response
///
/// - **200 OK** - the computer
/// - **404 Not Found** - no computer has this id
/// - **500 Internal Server Error** - database failure
pub async fn get_computer(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<Computer>> {
    let id = parse_id(id, COMPUTER_NOT_FOUND)?;
    Ok(Json(state.computers.get(id).await?))
}

/// `POST /api/computers`
///
/// # Request Body
///
/// ```json
/// {
///   "hostname": "ws-042",
///   "brand": "Lenovo",
///   "model": "ThinkPad T14",
///   "cpu": "Ryzen 7",
///   "ram": 32,
///   "storage": 1024,
///   "os": "Ubuntu 24.04",
///   "user_id": 3
/// }
/// ```
///
/// `status` defaults to "Active" and `user_id` to unassigned.
pub async fn create_computer(
    State(state): State<AppState>,
    payload: Result<Json<ComputerPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Computer>)> {
    let Json(payload) = payload?;
    let computer = state.computers.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(computer)))
}

/// `PUT /api/computers/{id}`
///
/// Full replacement: an omitted `status` or `user_id` is stored as `null`.
///
/// # Response
///
/// - **200 OK** - the updated computer
/// - **404 Not Found** - no computer has this id
/// - **500 Internal Server Error** - missing field, duplicate hostname or unknown `user_id`
pub async fn update_computer(
    State(state): State<AppState>,
    id: IdPath,
    payload: Result<Json<ComputerPayload>, JsonRejection>,
) -> ApiResult<Json<Computer>> {
    let id = parse_id(id, COMPUTER_NOT_FOUND)?;
    let Json(payload) = payload?;
    Ok(Json(state.computers.update(id, &payload).await?))
}

/// `DELETE /api/computers/{id}`
///
/// The computer's maintenance logs are deleted with it.
///
/// # Response
///
/// - **200 OK** - `{"message": "Computer deleted successfully"}`
/// - **404 Not Found** - no computer has this id
/// - **500 Internal Server Error** - database failure
pub async fn delete_computer(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(id, COMPUTER_NOT_FOUND)?;
    state.computers.delete(id).await?;
    Ok(Json(DeleteResponse::new("Computer deleted successfully")))
}

// Maintenance logs

/// `GET /api/maintenance`
///
/// Newest date first; every row carries the computer's `hostname`.
pub async fn list_maintenance(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MaintenanceLogEntry>>> {
    Ok(Json(state.maintenance.list().await?))
}

/// `GET /api/maintenance/{id}`
///
/// # Response
///
/// - **200 OK** - the log, without `hostname`
/// - **404 Not Found** - no log has this id
/// - **500 Internal Server Error** - database failure
pub async fn get_maintenance(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<MaintenanceLog>> {
    let id = parse_id(id, MAINTENANCE_NOT_FOUND)?;
    Ok(Json(state.maintenance.get(id).await?))
}

/// `POST /api/maintenance`
///
/// # Request Body
///
/// ```json
/// {
///   "computer_id": 1,
///   "date": "2024-03-01",
///   "type": "Repair",
///   "description": "Replaced keyboard",
///   "technician": "Sam"
/// }
/// ```
///
/// `status` defaults to "Scheduled".
///
/// # Response
///
/// - **201 Created** - the stored log
/// - **500 Internal Server Error** - missing field or unknown `computer_id`
pub async fn create_maintenance(
    State(state): State<AppState>,
    payload: Result<Json<MaintenancePayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MaintenanceLog>)> {
    let Json(payload) = payload?;
    let log = state.maintenance.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// `PUT /api/maintenance/{id}`
///
/// # Response
///
/// - **200 OK** - the updated log
/// - **404 Not Found** - no log has this id
/// - **500 Internal Server Error** - missing field or unknown `computer_id`
pub async fn update_maintenance(
    State(state): State<AppState>,
    id: IdPath,
    payload: Result<Json<MaintenancePayload>, JsonRejection>,
) -> ApiResult<Json<MaintenanceLog>> {
    let id = parse_id(id, MAINTENANCE_NOT_FOUND)?;
    let Json(payload) = payload?;
    Ok(Json(state.maintenance.update(id, &payload).await?))
}

/// `DELETE /api/maintenance/{id}`
///
/// # Response
///
/// - **200 OK** - `{"message": "Maintenance log deleted successfully"}`
/// - **404 Not Found** - no log has this id
/// - **500 Internal Server Error** - database failure
pub async fn delete_maintenance(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(id, MAINTENANCE_NOT_FOUND)?;
    state.maintenance.delete(id).await?;
    Ok(Json(DeleteResponse::new("Maintenance log deleted successfully")))
}

// Stats

/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// { "computers": 5, "users": 3, "maintenance": 2 }
/// ```
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    Ok(Json(state.stats.summary().await?))
}
