//! Booking persistence.
//!
//! The collection is one serialized list under one logical key: full read
//! and full overwrite are the only storage operations. The store is injected
//! as a capability so pricing and trip grouping stay pure and testable.

pub mod json;

pub use json::JsonFileStore;

use crate::models::{Booking, BookingStatus};

/// Storage errors. Absence of the backing file is not an error; it reads
/// as an empty collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The booking collection as the rest of the service sees it.
///
/// `update_status` enforces the status state machine; any other mutation is
/// a read-modify-write of the whole collection with last write winning.
pub trait BookingStore: Send + Sync {
    /// Full collection, in insertion order.
    fn list(&self) -> Result<Vec<Booking>>;

    /// Append a new booking and return it as stored.
    fn append(&self, booking: Booking) -> Result<Booking>;

    /// Transition a booking's status, rejecting illegal jumps.
    fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking>;

    /// Point a booking at a driver. Last write wins across repeated calls.
    fn assign_driver(&self, id: &str, driver_id: &str) -> Result<Booking>;

    /// Attach a payment proof reference and move the booking to Verifying.
    fn attach_payment_proof(&self, id: &str, url: &str) -> Result<Booking>;
}
