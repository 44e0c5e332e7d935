pub mod checkin_log;
pub mod department;
pub mod health;
pub mod role;
pub mod user;

use actix_web::web;
use crate::errors::AppError;

/// Registers the directory API under `/api`, with extractor failures rendered
/// as `{"error": ...}` like every other error.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .service(
                web::resource("/users")
                    .route(web::get().to(user::list_users))
                    .route(web::post().to(user::create_user))
                    .route(web::put().to(user::update_user))
                    .route(web::delete().to(user::delete_user)),
            )
            .service(
                web::resource("/users/roles")
                    .route(web::get().to(role::list_roles)),
            )
            .service(
                web::resource("/roles")
                    .route(web::get().to(role::list_roles)),
            )
            .service(
                web::resource("/departments")
                    .route(web::get().to(department::list_departments)),
            )
            .service(
                web::resource("/checkin_logs")
                    .route(web::get().to(checkin_log::list_checkin_logs)),
            )
            .service(
                web::resource("/health")
                    .route(web::get().to(health::health_check)),
            ),
    );
}
