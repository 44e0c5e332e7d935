use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use super::{DirectoryStore, StoreError};
use crate::models::checkin_log::CheckinLog;
use crate::models::department::Department;
use crate::models::role::Role;
use crate::models::user::{User, UserFields, UserWithNames};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let msg = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation => return StoreError::Reference(msg),
                ErrorKind::UniqueViolation => return StoreError::Duplicate(msg),
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return StoreError::Invalid(msg)
                }
                _ => {}
            }
        }
        StoreError::Database(err.to_string())
    }
}

#[derive(Clone)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn list_users(&self) -> Result<Vec<UserWithNames>, StoreError> {
        let users = sqlx::query_as::<_, UserWithNames>(
            r#"
            SELECT u.id, u.name, u.email, u.role_id, r.name AS role, u.department_id, d.name AS department
            FROM users u
            LEFT JOIN roles r ON u.role_id = r.id
            LEFT JOIN departments d ON u.department_id = d.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create_user(&self, fields: &UserFields) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, role_id, department_id) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, role_id, department_id",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(fields.role_id)
        .bind(fields.department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user(&self, id: i32, fields: &UserFields) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, role_id = $3, department_id = $4 WHERE id = $5 \
             RETURNING id, name, email, role_id, department_id",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(fields.role_id)
        .bind(fields.department_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let roles = sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(roles)
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        let departments = sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(departments)
    }

    async fn list_checkin_logs(&self) -> Result<Vec<CheckinLog>, StoreError> {
        // id breaks ties between events logged in the same instant
        let logs = sqlx::query_as::<_, CheckinLog>(
            r#"
            SELECT l.id, l.user_id, u.name AS user_name, l.check_type, l.timestamp
            FROM checkin_logs l
            LEFT JOIN users u ON l.user_id = u.id
            ORDER BY l.timestamp DESC, l.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
