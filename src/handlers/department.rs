use actix_web::{web, HttpResponse};
use crate::db::DirectoryStore;
use crate::errors::AppError;

pub async fn list_departments(
    store: web::Data<dyn DirectoryStore>,
) -> Result<HttpResponse, AppError> {
    let departments = store.list_departments().await?;
    Ok(HttpResponse::Ok().json(departments))
}
