use actix_web::{web, HttpResponse};
use crate::db::DirectoryStore;
use crate::errors::AppError;

pub async fn list_checkin_logs(
    store: web::Data<dyn DirectoryStore>,
) -> Result<HttpResponse, AppError> {
    let logs = store.list_checkin_logs().await?;
    Ok(HttpResponse::Ok().json(logs))
}
