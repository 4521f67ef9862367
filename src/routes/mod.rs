//! HTTP route handlers

pub mod bookings;
pub mod drivers;
pub mod trips;
