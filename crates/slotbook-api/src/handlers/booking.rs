//! Booking handlers
//!
//! HTTP handlers for booking creation, rescheduling, status changes and
//! reviews.

use crate::dto::{
    ApiResponse, BookingCreateRequest, BookingResponse, RescheduleRequest, ReviewRequest,
    StatusUpdateRequest,
};
use actix_web::{web, HttpResponse};
use slotbook_core::AppError;
use slotbook_services::BookingServices;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Create a booking
///
/// POST /api/v1/bookings
#[instrument(skip(services, req))]
pub async fn create_booking(
    services: web::Data<BookingServices>,
    req: web::Json<BookingCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Booking creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let service_date = req.service_date()?;

    let booking = services
        .bookings
        .create_booking(
            &req.service_provider_id,
            &req.client_id,
            service_date,
            &req.service_type,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking created successfully",
    )))
}

/// Get a single booking by ID
///
/// GET /api/v1/bookings/{id}
#[instrument(skip(services))]
pub async fn get_booking(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let booking = services.bookings.get_booking(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Move a booking to another slot
///
/// PUT /api/v1/bookings/{id}/reschedule
#[instrument(skip(services, req))]
pub async fn reschedule_booking(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
    req: web::Json<RescheduleRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    let new_date = req.new_date()?;
    debug!(booking_id = %booking_id, new_date, "Rescheduling booking");

    services
        .bookings
        .reschedule_booking(&booking_id, new_date)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Change a booking's status
///
/// PUT /api/v1/bookings/{id}/status
#[instrument(skip(services, req))]
pub async fn update_status(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
    req: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let status = req.status()?;

    let booking = services
        .bookings
        .update_status(&path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking status updated successfully",
    )))
}

/// Review the provider of a completed booking
///
/// POST /api/v1/bookings/{id}/reviews
#[instrument(skip(services, req))]
pub async fn add_review(
    services: web::Data<BookingServices>,
    path: web::Path<String>,
    req: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    services
        .reviews
        .add_review(&path.into_inner(), req.rating, &req.comment)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}/reschedule", web::put().to(reschedule_booking))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}/reviews", web::post().to(add_review)),
    );
}
