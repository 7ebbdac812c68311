//! Client handlers

use crate::dto::{ApiResponse, ClientCreateRequest, ClientResponse};
use actix_web::{web, HttpResponse};
use slotbook_core::AppError;
use slotbook_services::BookingServices;
use tracing::{instrument, warn};
use validator::Validate;

/// Register a new client
///
/// POST /api/v1/clients
#[instrument(skip(services, req))]
pub async fn create_client(
    services: web::Data<BookingServices>,
    req: web::Json<ClientCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Client creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let client = services
        .clients
        .create_client(&req.name, &req.contact_info)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        ClientResponse::from(client),
        "Client created successfully",
    )))
}

/// Get a single client by ID
///
/// GET /api/v1/clients/{id}
#[instrument(skip(services))]
pub async fn get_client(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = services.clients.get_client(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ClientResponse::from(client))))
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(create_client))
            .route("/{id}", web::get().to(get_client)),
    );
}
