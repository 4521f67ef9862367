//! Driver roster.
//!
//! Drivers are static reference data: the fleet is three vehicles and the
//! roster is not created or mutated through this service.

use std::sync::OnceLock;

use serde::Serialize;

/// A driver and their vehicle
#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub plate: String,
    pub phone: String,
}

static ROSTER: OnceLock<Vec<Driver>> = OnceLock::new();

/// The full driver roster.
pub fn roster() -> &'static [Driver] {
    ROSTER.get_or_init(|| {
        vec![
            Driver {
                id: "d1".to_string(),
                name: "Carlos Rojas".to_string(),
                plate: "W4T-123".to_string(),
                phone: "987654321".to_string(),
            },
            Driver {
                id: "d2".to_string(),
                name: "Miguel Angel".to_string(),
                plate: "A1B-456".to_string(),
                phone: "912345678".to_string(),
            },
            Driver {
                id: "d3".to_string(),
                name: "Jose Quispe".to_string(),
                plate: "X9Z-789".to_string(),
                phone: "998877665".to_string(),
            },
        ]
    })
}

/// Look up a driver by id.
pub fn find(id: &str) -> Option<&'static Driver> {
    roster().iter().find(|d| d.id == id)
}
