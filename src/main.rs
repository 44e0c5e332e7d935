mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;
#[cfg(test)]
mod test;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use log::{error, info};
use crate::config::{Settings, WriteMode};
use crate::db::{DirectoryStore, PgDirectoryStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // The pool is the only state shared between requests; it is closed after the server stops.
    let pool = db::create_pool(&settings.database).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::new(io::ErrorKind::ConnectionRefused, err)
    })?;

    if settings.run_migrations {
        db::run_migrations(&pool).await.map_err(|err| {
            error!("Failed to apply migrations: {}", err);
            io::Error::new(io::ErrorKind::Other, err)
        })?;
    }

    if settings.write_mode == WriteMode::Legacy {
        info!("Legacy write mode: updates of unknown ids answer 200 with a null body");
    }

    let store: Arc<dyn DirectoryStore> = Arc::new(PgDirectoryStore::new(pool.clone()));
    let store = web::Data::from(store);
    let write_mode = web::Data::new(settings.write_mode);

    info!("Starting server at {}", settings.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(write_mode.clone())
            .configure(handlers::configure)
    })
    .bind(&settings.bind_address)?
    .run()
    .await?;

    info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
