use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::fmt;
use std::time::Duration;
use log::info;
use crate::config::DatabaseSettings;
use crate::models::checkin_log::CheckinLog;
use crate::models::department::Department;
use crate::models::role::Role;
use crate::models::user::{User, UserFields, UserWithNames};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgDirectoryStore;

#[derive(Debug, PartialEq)]
pub enum StoreError {
    /// A `role_id`, `department_id` or `user_id` that points at no row.
    Reference(String),
    /// A unique constraint, e.g. a second user with the same email.
    Duplicate(String),
    /// A value the schema refuses (not-null, check, malformed literal).
    Invalid(String),
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Reference(msg) => write!(f, "Reference violation: {}", msg),
            StoreError::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            StoreError::Invalid(msg) => write!(f, "Invalid value: {}", msg),
            StoreError::Database(msg) => write!(f, "Database failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Reads and writes over the directory tables.
///
/// Every method is one statement against the store and holds no state between
/// calls. Concurrent writes to the same id are last-write-wins in whatever
/// order the store serializes them.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Users in ascending id order, left-joined with role and department names.
    async fn list_users(&self) -> Result<Vec<UserWithNames>, StoreError>;

    async fn create_user(&self, fields: &UserFields) -> Result<User, StoreError>;

    /// Overwrites all mutable fields. `Ok(None)` means no user has this id.
    async fn update_user(&self, id: i32, fields: &UserFields) -> Result<Option<User>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_user(&self, id: i32) -> Result<bool, StoreError>;

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError>;

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError>;

    /// Most recent first, left-joined with the owning user's name.
    async fn list_checkin_logs(&self) -> Result<Vec<CheckinLog>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name);

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
