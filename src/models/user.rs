use serde::{Deserialize, Serialize};
use validator::Validate;

/// A row of the `users` table as stored.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    pub department_id: Option<i32>,
}

/// A user joined against its role and department. The names are computed at
/// read time and are `None` when the reference is null.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserWithNames {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    pub role: Option<String>,
    pub department_id: Option<i32>,
    pub department: Option<String>,
}

/// The mutable fields of a user. Create inserts them, update overwrites all
/// four of them.
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UserFields {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i32>,
    #[serde(default)]
    pub department_id: Option<i32>,
}
