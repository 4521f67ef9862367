//! Driver roster route handlers

use axum::Json;

use crate::models::{driver, Driver};

/// Static roster for the assignment dropdown.
pub async fn list() -> Json<Vec<Driver>> {
    Json(driver::roster().to_vec())
}
