//! JSON file implementation of the booking store.
//!
//! The whole collection lives in one file as a JSON array, read and
//! rewritten in full on every operation. A mutex serializes the
//! read-modify-write cycles within the process.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::models::{Booking, BookingStatus};

use super::{BookingStore, Result, StoreError};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Booking>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, bookings: &[Booking]) -> Result<()> {
        let raw = serde_json::to_string_pretty(bookings)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Read-modify-write over a single booking, holding the lock for the
    /// whole cycle.
    fn with_booking<F>(&self, id: &str, mutate: F) -> Result<Booking>
    where
        F: FnOnce(&mut Booking) -> Result<()>,
    {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut bookings = self.load()?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        mutate(booking)?;
        let updated = booking.clone();
        self.save(&bookings)?;
        Ok(updated)
    }
}

impl BookingStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Booking>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        self.load()
    }

    fn append(&self, booking: Booking) -> Result<Booking> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut bookings = self.load()?;
        bookings.push(booking.clone());
        self.save(&bookings)?;
        debug!(id = %booking.id, "booking appended");
        Ok(booking)
    }

    fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking> {
        self.with_booking(id, |booking| {
            if !booking.status.can_transition_to(status) {
                return Err(StoreError::InvalidTransition {
                    from: booking.status,
                    to: status,
                });
            }
            booking.status = status;
            Ok(())
        })
    }

    fn assign_driver(&self, id: &str, driver_id: &str) -> Result<Booking> {
        self.with_booking(id, |booking| {
            booking.driver_id = Some(driver_id.to_string());
            Ok(())
        })
    }

    fn attach_payment_proof(&self, id: &str, url: &str) -> Result<Booking> {
        self.with_booking(id, |booking| {
            // Re-uploading while still under verification replaces the proof
            match booking.status {
                BookingStatus::PendingPayment => {
                    booking.status = BookingStatus::Verifying;
                }
                BookingStatus::Verifying => {}
                other => {
                    return Err(StoreError::InvalidTransition {
                        from: other,
                        to: BookingStatus::Verifying,
                    })
                }
            }
            booking.payment_proof_url = Some(url.to_string());
            Ok(())
        })
    }
}
