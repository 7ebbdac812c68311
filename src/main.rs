//! SlotBook Server
//!
//! Booking backend for service providers: registers providers and clients,
//! books and reschedules slots, and aggregates client reviews.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use slotbook_api::configure_api;
use slotbook_core::config::{AppConfig, LoggingConfig, StorageBackend, StorageConfig};
use slotbook_db::{
    create_pool, run_migrations, PgBookingRepository, PgClientRepository, PgProviderRepository,
};
use slotbook_services::BookingServices;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let level = &logging.level;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "slotbook={level},slotbook_api={level},slotbook_services={level},\
             slotbook_db={level},actix_web=info,sqlx=warn"
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

/// Wire the services to the configured storage backend
async fn build_services(storage: &StorageConfig) -> anyhow::Result<BookingServices> {
    match storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is lost on restart");
            Ok(BookingServices::in_memory())
        }
        StorageBackend::Postgres => {
            let database_url = storage
                .database_url
                .as_deref()
                .context("storage.database_url must be set for the postgres backend")?;

            info!("Connecting to database...");
            let pool = create_pool(database_url, Some(storage.max_connections))
                .await
                .context("Failed to create database pool")?;

            info!(
                "Database connection established with {} max connections",
                storage.max_connections
            );

            if storage.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to apply migrations")?;
            }

            Ok(BookingServices::new(
                Arc::new(PgProviderRepository::new(pool.clone())),
                Arc::new(PgClientRepository::new(pool.clone())),
                Arc::new(PgBookingRepository::new(pool)),
            ))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    info!("Starting SlotBook v{}", env!("CARGO_PKG_VERSION"));
    info!(backend = %config.storage.backend, "Storage backend selected");

    let services = web::Data::new(build_services(&config.storage).await?);

    let bind_addr = config.server_addr();
    let workers = config.server.workers.max(1);
    let cors_origins = config.cors_origins();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| origins.iter().any(|allowed| allowed == o))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(services.clone())
            // Middleware
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_api)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
