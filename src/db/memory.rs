use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;
use super::{DirectoryStore, StoreError};
use crate::models::checkin_log::CheckinLog;
use crate::models::department::Department;
use crate::models::role::Role;
use crate::models::user::{User, UserFields, UserWithNames};

struct LogRow {
    id: i32,
    user_id: Option<i32>,
    check_type: String,
    timestamp: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    roles: BTreeMap<i32, String>,
    departments: BTreeMap<i32, String>,
    users: BTreeMap<i32, User>,
    logs: Vec<LogRow>,
    next_user_id: i32,
    next_log_id: i32,
}

impl Tables {
    fn check_references(&self, fields: &UserFields) -> Result<(), StoreError> {
        if let Some(role_id) = fields.role_id {
            if !self.roles.contains_key(&role_id) {
                return Err(StoreError::Reference(format!("role {} does not exist", role_id)));
            }
        }
        if let Some(department_id) = fields.department_id {
            if !self.departments.contains_key(&department_id) {
                return Err(StoreError::Reference(format!("department {} does not exist", department_id)));
            }
        }
        Ok(())
    }

    fn check_email(&self, email: &str, except: Option<i32>) -> Result<(), StoreError> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != except);
        if taken {
            return Err(StoreError::Duplicate(format!("email {} already exists", email)));
        }
        Ok(())
    }
}

/// Directory tables held in memory, enforcing the same constraints as the
/// Postgres schema.
#[derive(Default)]
pub struct MemoryDirectoryStore {
    tables: Mutex<Tables>,
    offline: bool,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_role(self, id: i32, name: &str) -> Self {
        self.tables.lock().unwrap().roles.insert(id, name.to_string());
        self
    }

    pub fn with_department(self, id: i32, name: &str) -> Self {
        self.tables.lock().unwrap().departments.insert(id, name.to_string());
        self
    }

    /// Stands in for the ingestion path that writes check events.
    pub fn record_checkin(&self, user_id: i32, check_type: &str, timestamp: DateTime<Utc>) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_log_id += 1;
        let id = tables.next_log_id;
        tables.logs.push(LogRow {
            id,
            user_id: Some(user_id),
            check_type: check_type.to_string(),
            timestamp,
        });
        id
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        if self.offline {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn list_users(&self) -> Result<Vec<UserWithNames>, StoreError> {
        let tables = self.tables()?;
        let users = tables
            .users
            .values()
            .map(|u| UserWithNames {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role_id: u.role_id,
                role: u.role_id.and_then(|id| tables.roles.get(&id).cloned()),
                department_id: u.department_id,
                department: u.department_id.and_then(|id| tables.departments.get(&id).cloned()),
            })
            .collect();
        Ok(users)
    }

    async fn create_user(&self, fields: &UserFields) -> Result<User, StoreError> {
        let mut tables = self.tables()?;
        tables.check_references(fields)?;
        tables.check_email(&fields.email, None)?;

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            role_id: fields.role_id,
            department_id: fields.department_id,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, fields: &UserFields) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        tables.check_references(fields)?;
        tables.check_email(&fields.email, Some(id))?;

        let user = User {
            id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            role_id: fields.role_id,
            department_id: fields.department_id,
        };
        tables.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete_user(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        let removed = tables.users.remove(&id).is_some();
        if removed {
            for log in tables.logs.iter_mut().filter(|l| l.user_id == Some(id)) {
                log.user_id = None;
            }
        }
        Ok(removed)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .roles
            .iter()
            .map(|(id, name)| Role { id: *id, name: name.clone() })
            .collect())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .departments
            .iter()
            .map(|(id, name)| Department { id: *id, name: name.clone() })
            .collect())
    }

    async fn list_checkin_logs(&self) -> Result<Vec<CheckinLog>, StoreError> {
        let tables = self.tables()?;
        let mut logs: Vec<CheckinLog> = tables
            .logs
            .iter()
            .map(|l| CheckinLog {
                id: l.id,
                user_id: l.user_id,
                user_name: l.user_id.and_then(|id| tables.users.get(&id)).map(|u| u.name.clone()),
                check_type: l.check_type.clone(),
                timestamp: l.timestamp,
            })
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(logs)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }
}
