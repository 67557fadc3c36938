//! Data models for the inventory service
//!
//! This module defines the rows returned by the API, the payloads accepted by
//! create/update requests, and the small response bodies (stats, confirmation).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status stored for a computer created without one
pub const DEFAULT_COMPUTER_STATUS: &str = "Active";

/// Status stored for a maintenance log created without one
pub const DEFAULT_MAINTENANCE_STATUS: &str = "Scheduled";

/// An employee who may be assigned computers
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across all users
    pub email: String,
    pub department: String,
    pub position: String,
    pub created_at: DateTime<Utc>,
}

/// A computer in the inventory
///
/// `user_id` is a weak reference: deleting the user clears it to `null`
/// instead of deleting the computer.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct Computer {
    pub id: i64,
    /// Unique across all computers
    pub hostname: String,
    pub brand: String,
    pub model: String,
    pub cpu: String,
    pub ram: i64,
    pub storage: i64,
    pub os: String,
    pub status: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A maintenance event recorded against a computer
///
/// Logs are owned by their computer and disappear with it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct MaintenanceLog {
    pub id: i64,
    pub computer_id: Option<i64>,
    pub date: NaiveDate,
    /// Free-form category such as "Repair" or "Upgrade"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub log_type: String,
    pub description: String,
    pub technician: String,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A maintenance log as returned by the list endpoint
///
/// `hostname` is `null` when the referenced computer no longer exists.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct MaintenanceLogEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub log: MaintenanceLog,
    pub hostname: Option<String>,
}

/// Request body for creating or replacing a user
///
/// Every field is optional at the type level: a missing value is written as
/// `NULL` and rejected by the database, matching how the table constrains it.
///
/// # Example
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "department": "Engineering",
///   "position": "Analyst"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Request body for creating or replacing a computer
///
/// On create, a missing `status` becomes "Active". On update the payload is a
/// full replacement, so a missing `status` is stored as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ComputerPayload {
    pub hostname: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<i64>,
    pub storage: Option<i64>,
    pub os: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<i64>,
}

/// Request body for creating or replacing a maintenance log
///
/// On create, a missing `status` becomes "Scheduled".
///
/// # Example
/// ```json
/// {
///   "computer_id": 1,
///   "date": "2024-03-01",
///   "type": "Repair",
///   "description": "Replaced keyboard",
///   "technician": "Sam"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MaintenancePayload {
    pub computer_id: Option<i64>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub description: Option<String>,
    pub technician: Option<String>,
    pub status: Option<String>,
}

/// Whole-table counts returned by `GET /api/stats`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub computers: i64,
    pub users: i64,
    pub maintenance: i64,
}

/// Confirmation body returned after a successful delete
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
