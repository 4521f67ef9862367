//! TravelFast booking service.
//!
//! JSON API for the Jauja-Huancayo shuttle: fare quotes, the booking flow
//! with payment-proof verification, daily trip manifests with bulk driver
//! assignment, and the income summary dashboards poll for.

pub mod cache;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod store;
pub mod trips;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use cache::AppCache;
use store::BookingStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub cache: AppCache,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(routes::bookings::list).post(routes::bookings::create),
        )
        .route("/bookings/:id/status", post(routes::bookings::update_status))
        .route("/bookings/:id/driver", post(routes::bookings::assign_driver))
        .route(
            "/bookings/:id/payment-proof",
            post(routes::bookings::attach_payment_proof),
        )
        .route("/drivers", get(routes::drivers::list))
        .route("/trips", get(routes::trips::daily))
        .route("/trips/assign", post(routes::trips::assign))
        .route("/stats", get(routes::trips::stats))
        .route("/seats", get(routes::trips::seats))
        .merge(pricing::routes::router())
}
