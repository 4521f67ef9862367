//! Pricing route handlers

use axum::{routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::calculate_price;
use super::requests::QuoteRequest;
use super::responses::QuoteResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

/// Fare quote for the booking form. Prices are re-derived server-side at
/// creation; this endpoint only previews them.
async fn quote(Json(req): Json<QuoteRequest>) -> Result<Json<QuoteResponse>> {
    if req.seats == 0 {
        return Err(AppError::Validation("seats must be at least 1".to_string()));
    }
    let fare = calculate_price(req.service_type, req.seats, req.is_airport);
    Ok(Json(fare.into()))
}
