use actix_web::{web, HttpResponse};
use crate::db::DirectoryStore;
use crate::errors::AppError;

pub async fn list_roles(
    store: web::Data<dyn DirectoryStore>,
) -> Result<HttpResponse, AppError> {
    let roles = store.list_roles().await?;
    Ok(HttpResponse::Ok().json(roles))
}
