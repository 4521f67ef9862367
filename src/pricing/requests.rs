//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

use crate::models::ServiceType;

/// Request for a fare quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service_type: ServiceType,
    pub seats: u32,
    #[serde(default)]
    pub is_airport: bool,
}
