//! HTTP request handlers

pub mod booking;
pub mod client;
pub mod provider;

pub use booking::configure as configure_bookings;
pub use client::configure as configure_clients;
pub use provider::configure as configure_providers;

use actix_web::{web, HttpResponse};
use slotbook_core::AppError;

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "slotbook",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Malformed bodies and query strings use the same error body as every
/// other rejected request
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Mount every route under `/api/v1`
///
/// Handlers expect `web::Data<BookingServices>` in the app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .app_data(query_config())
            .route("/health", web::get().to(health_check))
            .configure(configure_providers)
            .configure(configure_clients)
            .configure(configure_bookings),
    );
}
