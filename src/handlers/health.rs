use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::db::DirectoryStore;
use crate::errors::AppError;

pub async fn health_check(
    store: web::Data<dyn DirectoryStore>,
) -> Result<HttpResponse, AppError> {
    store.ping().await?;
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}
