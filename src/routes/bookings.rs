//! Booking route handlers
//!
//! The booking flow: a customer submits the form (fare derived server-side,
//! record stored as PendingPayment), attaches a payment proof (Verifying),
//! an administrator confirms or cancels, and the driver completes the trip.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::booking::time_hm;
use crate::models::{
    driver, Booking, BookingStatus, PickupLocationType, ServiceType, KNOWN_POINTS_JAUJA,
    VEHICLE_CAPACITY,
};
use crate::pricing::calculate_price;
use crate::AppState;

/// Payload for creating a booking. Prices are never accepted from the
/// client; the fare is derived here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_type: ServiceType,
    pub customer_name: String,
    pub customer_dni: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub selected_seat_ids: Vec<u8>,
    pub pickup_type: PickupLocationType,
    pub pickup_address: String,
    #[serde(default)]
    pub is_airport: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDriverRequest {
    pub driver_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProofRequest {
    pub url: String,
}

/// Full booking collection. Dashboards filter client-side.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Booking>>> {
    let bookings = state.store.list()?;
    Ok(Json(bookings))
}

/// Create a booking in PendingPayment.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    let (seats, selected_seat_ids) = validate(&req)?;

    // Airport pickups carry the surcharge whichever way they were entered
    let is_airport = req.is_airport || req.pickup_address.to_lowercase().contains("aeropuerto");
    let fare = calculate_price(req.service_type, seats, is_airport);

    let booking = Booking {
        id: format!("bk-{}", Uuid::new_v4()),
        service_type: req.service_type,
        customer_name: req.customer_name,
        customer_dni: req.customer_dni,
        customer_phone: req.customer_phone,
        date: req.date,
        time: req.time,
        seats,
        selected_seat_ids,
        pickup_type: req.pickup_type,
        pickup_address: req.pickup_address,
        total_price: fare.total,
        prepayment_amount: fare.prepayment,
        status: BookingStatus::PendingPayment,
        payment_proof_url: None,
        driver_id: None,
        created_at: Utc::now(),
    };

    let stored = state.store.append(booking)?;
    state.cache.invalidate_all();
    info!(id = %stored.id, service = %stored.service_type, "booking created");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Admin/driver status transition; illegal jumps come back as 409.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>> {
    let booking = state.store.update_status(&id, req.status)?;
    state.cache.invalidate_all();
    info!(id = %booking.id, status = %booking.status, "booking status updated");
    Ok(Json(booking))
}

/// Assign a single booking to a driver from the roster.
pub async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignDriverRequest>,
) -> Result<Json<Booking>> {
    if driver::find(&req.driver_id).is_none() {
        return Err(AppError::Validation(format!(
            "unknown driver: {}",
            req.driver_id
        )));
    }
    let booking = state.store.assign_driver(&id, &req.driver_id)?;
    state.cache.invalidate_all();
    Ok(Json(booking))
}

/// Attach the payment proof reference; the booking moves to Verifying.
/// The proof is an opaque string, never fetched or decoded here.
pub async fn attach_payment_proof(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PaymentProofRequest>,
) -> Result<Json<Booking>> {
    if req.url.trim().is_empty() {
        return Err(AppError::Validation(
            "payment proof url must not be empty".to_string(),
        ));
    }
    let booking = state.store.attach_payment_proof(&id, &req.url)?;
    state.cache.invalidate_all();
    info!(id = %booking.id, "payment proof attached");
    Ok(Json(booking))
}

/// Validate the request and normalize the seat selection.
///
/// Returns the effective seat count and seat ids: PRIVATE always takes the
/// whole vehicle, SHARED takes the distinct selected ids in 1..=6.
fn validate(req: &CreateBookingRequest) -> Result<(u32, Vec<u8>)> {
    if req.customer_name.trim().is_empty() {
        return Err(AppError::Validation(
            "customer name must not be empty".to_string(),
        ));
    }
    if req.customer_dni.len() != 8 || !req.customer_dni.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "DNI must be exactly 8 digits".to_string(),
        ));
    }
    if req.customer_phone.trim().is_empty() {
        return Err(AppError::Validation(
            "customer phone must not be empty".to_string(),
        ));
    }

    match req.service_type {
        ServiceType::Private => {
            if req.pickup_address.trim().is_empty() {
                return Err(AppError::Validation(
                    "pickup address must not be empty".to_string(),
                ));
            }
            // Whole vehicle; an empty seat set means "all"
            Ok((VEHICLE_CAPACITY, Vec::new()))
        }
        ServiceType::Shared => {
            let mut seat_ids = req.selected_seat_ids.clone();
            seat_ids.sort_unstable();
            seat_ids.dedup();

            if seat_ids.is_empty() {
                return Err(AppError::Validation(
                    "select at least one seat".to_string(),
                ));
            }
            if seat_ids.iter().any(|&id| !(1..=6).contains(&id)) {
                return Err(AppError::Validation(
                    "seat ids must be between 1 and 6".to_string(),
                ));
            }
            if req.pickup_type == PickupLocationType::KnownPoint
                && !KNOWN_POINTS_JAUJA.contains(&req.pickup_address.as_str())
            {
                return Err(AppError::Validation(format!(
                    "unknown pickup point: {}",
                    req.pickup_address
                )));
            }

            let seats = seat_ids.len() as u32;
            Ok((seats, seat_ids))
        }
    }
}
