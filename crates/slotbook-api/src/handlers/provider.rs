//! Provider handlers
//!
//! HTTP handlers for provider registration, lookups, availability and
//! booking history.

use crate::dto::{
    ApiResponse, AvailabilityRequest, BookingResponse, PaginationParams, ProviderCreateRequest,
    ProviderResponse,
};
use actix_web::{web, HttpResponse};
use slotbook_core::AppError;
use slotbook_services::BookingServices;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// List providers with pagination
///
/// GET /api/v1/providers
#[instrument(skip(services))]
pub async fn list_providers(
    services: web::Data<BookingServices>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(
        page = query.page,
        per_page = query.per_page,
        "Listing providers"
    );

    let (providers, total) = services
        .providers
        .list_providers(&query.to_pagination())
        .await?;

    let response_data: Vec<ProviderResponse> = providers.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(query.paginate(response_data, total)))
}

/// Register a new provider
///
/// POST /api/v1/providers
#[instrument(skip(services, req))]
pub async fn create_provider(
    services: web::Data<BookingServices>,
    req: web::Json<ProviderCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Provider creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let provider = services
        .providers
        .create_provider(
            &req.name,
            &req.service_type,
            &req.contact_info,
            &req.availability,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        ProviderResponse::from(provider),
        "Provider created successfully",
    )))
}

/// Get a single provider by ID
///
/// GET /api/v1/providers/{id}
#[instrument(skip(services))]
pub async fn get_provider(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = services.providers.get_provider(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProviderResponse::from(provider))))
}

/// Replace a provider's availability
///
/// PUT /api/v1/providers/{id}/availability
#[instrument(skip(services, req))]
pub async fn replace_availability(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
    req: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, AppError> {
    let provider = services
        .providers
        .replace_availability(&path.into_inner(), &req.availability)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        ProviderResponse::from(provider),
        "Availability updated successfully",
    )))
}

/// All bookings of a provider
///
/// GET /api/v1/providers/{id}/history
#[instrument(skip(services))]
pub async fn get_provider_history(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bookings = services
        .bookings
        .get_provider_history(&path.into_inner())
        .await?;

    let response: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure provider routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/providers")
            .route("", web::get().to(list_providers))
            .route("", web::post().to(create_provider))
            .route("/{id}", web::get().to(get_provider))
            .route("/{id}/availability", web::put().to(replace_availability))
            .route("/{id}/history", web::get().to(get_provider_history)),
    );
}
