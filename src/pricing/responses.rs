//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::Fare;

/// Fare quote for JSON responses. Amounts are serialized as strings to
/// keep two-decimal semantics intact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub prepayment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}

impl From<Fare> for QuoteResponse {
    fn from(fare: Fare) -> Self {
        Self {
            total: fare.total,
            prepayment: fare.prepayment,
            unit_price: fare.unit_price,
        }
    }
}
