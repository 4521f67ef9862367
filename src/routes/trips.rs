//! Trip dashboard route handlers
//!
//! Daily manifests, bulk driver assignment per slot, seat availability for
//! the picker, and the income summary. Reads go through the short-TTL cache
//! since both dashboards poll.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::booking::time_hm;
use crate::models::{driver, seat, Booking, ServiceType, VEHICLE_CAPACITY};
use crate::trips::{daily_stats, group_trips_by_date, occupied_seat_ids, DailyStats, TripKey};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
}

/// One departure as the admin dashboard renders it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSlotResponse {
    /// Slot label, e.g. `08:00-SHARED`
    pub key: String,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    pub service_type: ServiceType,
    pub occupancy: u32,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    pub bookings: Vec<ManifestEntry>,
}

/// A booking plus the human-readable seat list the manifest shows
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub seat_labels: String,
    #[serde(flatten)]
    pub booking: Booking,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTripRequest {
    pub date: NaiveDate,
    #[serde(with = "time_hm")]
    pub time: NaiveTime,
    pub service_type: ServiceType,
    pub driver_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTripResponse {
    pub key: String,
    pub driver_id: String,
    pub assigned: usize,
}

/// Seat map for one SHARED slot
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapResponse {
    pub occupied: Vec<u8>,
    pub seats: Vec<SeatStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStatus {
    pub id: u8,
    pub label: &'static str,
    pub kind: seat::SeatKind,
    pub is_available: bool,
}

/// Daily trip manifest, grouped by (time, service type).
pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<TripSlotResponse>>> {
    let slots = match state.cache.trips.get(&query.date).await {
        Some(cached) => cached,
        None => {
            let bookings = state.store.list()?;
            let slots = Arc::new(group_trips_by_date(query.date, &bookings));
            state.cache.trips.insert(query.date, slots.clone()).await;
            slots
        }
    };

    let response = slots
        .iter()
        .map(|slot| TripSlotResponse {
            key: slot.key.to_string(),
            time: slot.key.time,
            service_type: slot.key.service_type,
            occupancy: slot.occupancy(),
            capacity: VEHICLE_CAPACITY,
            driver_id: slot.driver_id().map(str::to_string),
            bookings: slot
                .bookings
                .iter()
                .map(|b| ManifestEntry {
                    seat_labels: seat::seat_labels(&b.selected_seat_ids),
                    booking: b.clone(),
                })
                .collect(),
        })
        .collect();

    Ok(Json(response))
}

/// Assign one driver to every booking in a slot.
///
/// Writes are sequential with last write winning; if one fails midway the
/// earlier ones stand. There is no transactional guarantee.
pub async fn assign(
    State(state): State<AppState>,
    Json(req): Json<AssignTripRequest>,
) -> Result<Json<AssignTripResponse>> {
    if driver::find(&req.driver_id).is_none() {
        return Err(AppError::Validation(format!(
            "unknown driver: {}",
            req.driver_id
        )));
    }

    let key = TripKey {
        time: req.time,
        service_type: req.service_type,
    };
    let bookings = state.store.list()?;
    let slots = group_trips_by_date(req.date, &bookings);
    let slot = slots
        .into_iter()
        .find(|s| s.key == key)
        .ok_or(AppError::NotFound)?;

    let mut assigned = 0;
    for booking in &slot.bookings {
        state.store.assign_driver(&booking.id, &req.driver_id)?;
        assigned += 1;
    }
    state.cache.invalidate_all();
    info!(slot = %key, driver = %req.driver_id, assigned, "driver assigned to trip");

    Ok(Json(AssignTripResponse {
        key: key.to_string(),
        driver_id: req.driver_id,
        assigned,
    }))
}

/// Income summary for one day.
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyStats>> {
    let stats = match state.cache.stats.get(&query.date).await {
        Some(cached) => cached,
        None => {
            let bookings = state.store.list()?;
            let stats = Arc::new(daily_stats(query.date, &bookings));
            state.cache.stats.insert(query.date, stats.clone()).await;
            stats
        }
    };
    Ok(Json((*stats).clone()))
}

/// Seat availability for a SHARED slot, for the seat picker.
pub async fn seats(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SeatMapResponse>> {
    let bookings = state.store.list()?;
    let occupied = occupied_seat_ids(query.date, query.time, &bookings);

    let seats = seat::CAR_LAYOUT
        .iter()
        .map(|s| SeatStatus {
            id: s.id,
            label: s.label,
            kind: s.kind,
            is_available: !occupied.contains(&s.id),
        })
        .collect();

    Ok(Json(SeatMapResponse {
        occupied: occupied.into_iter().collect(),
        seats,
    }))
}
