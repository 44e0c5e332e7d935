use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use log::{info, warn};
use crate::config::WriteMode;
use crate::db::DirectoryStore;
use crate::errors::AppError;
use crate::models::user::UserFields;
use crate::utils::validation::validate_payload;

#[derive(Deserialize)]
pub struct UserUpdate {
    id: i32,
    #[serde(flatten)]
    fields: UserFields,
}

#[derive(Deserialize)]
pub struct DeleteUserParams {
    id: i32,
}

pub async fn list_users(
    store: web::Data<dyn DirectoryStore>,
) -> Result<HttpResponse, AppError> {
    let users = store.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    store: web::Data<dyn DirectoryStore>,
    new_user: web::Json<UserFields>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*new_user)?;

    let user = store.create_user(&new_user).await?;
    info!("Created user {} <{}>", user.id, user.email);

    Ok(HttpResponse::Ok().json(user))
}

/// Replaces name, email, role and department of an existing user. Absent
/// `role_id` / `department_id` are written as null.
pub async fn update_user(
    store: web::Data<dyn DirectoryStore>,
    mode: web::Data<WriteMode>,
    updates: web::Json<UserUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&updates.fields)?;

    match store.update_user(updates.id, &updates.fields).await? {
        Some(user) => {
            info!("Updated user {}", user.id);
            Ok(HttpResponse::Ok().json(user))
        }
        None => {
            warn!("Update matched no user with id {}", updates.id);
            match **mode {
                WriteMode::Strict => Err(AppError::NotFound(format!("User {} not found", updates.id))),
                WriteMode::Legacy => Ok(HttpResponse::Ok().json(serde_json::Value::Null)),
            }
        }
    }
}

/// Idempotent: deleting an unknown id still succeeds, with `deleted: false`.
pub async fn delete_user(
    store: web::Data<dyn DirectoryStore>,
    params: web::Query<DeleteUserParams>,
) -> Result<HttpResponse, AppError> {
    let deleted = store.delete_user(params.id).await?;
    if deleted {
        info!("Deleted user {}", params.id);
    } else {
        info!("Delete matched no user with id {}", params.id);
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "deleted": deleted,
    })))
}
