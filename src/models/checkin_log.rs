use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A check event joined against the user that produced it.
///
/// `check_type` is whatever tag the ingestion side wrote (`in`, `out`, ...).
/// `user_id` becomes null once the owning user is deleted, and `user_name` is
/// null whenever no user matches.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CheckinLog {
    pub id: i32,
    pub user_id: Option<i32>,
    pub user_name: Option<String>,
    pub check_type: String,
    pub timestamp: DateTime<Utc>,
}
