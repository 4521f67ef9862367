//! Six-seat van layout used for seat picking and manifest display.

use serde::Serialize;

/// Seats per vehicle. Occupancy above this is reported, never enforced.
pub const VEHICLE_CAPACITY: u32 = 6;

/// Position class of a seat in the van
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatKind {
    Front,
    Window,
    Middle,
}

/// A seat in the fixed vehicle layout
#[derive(Debug, Clone, Serialize)]
pub struct Seat {
    pub id: u8,
    pub label: &'static str,
    pub kind: SeatKind,
}

/// The fixed layout: copilot seat up front, three in the middle row,
/// two in the third row.
pub const CAR_LAYOUT: [Seat; 6] = [
    Seat { id: 1, label: "Copiloto", kind: SeatKind::Front },
    Seat { id: 2, label: "Atrás Izq", kind: SeatKind::Window },
    Seat { id: 3, label: "Atrás Centro", kind: SeatKind::Middle },
    Seat { id: 4, label: "Atrás Der", kind: SeatKind::Window },
    Seat { id: 5, label: "3ra Fila Izq", kind: SeatKind::Window },
    Seat { id: 6, label: "3ra Fila Der", kind: SeatKind::Window },
];

/// Label for a single seat id, if it exists in the layout.
pub fn seat_label(id: u8) -> Option<&'static str> {
    CAR_LAYOUT.iter().find(|s| s.id == id).map(|s| s.label)
}

/// Human-readable seat list for a manifest line. An empty selection means
/// the whole vehicle (PRIVATE bookings).
pub fn seat_labels(ids: &[u8]) -> String {
    if ids.is_empty() {
        return "Todo el auto".to_string();
    }
    ids.iter()
        .filter_map(|id| seat_label(*id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_ids_are_one_through_six() {
        let ids: Vec<u8> = CAR_LAYOUT.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_seat_labels() {
        assert_eq!(seat_labels(&[1, 2]), "Copiloto, Atrás Izq");
        assert_eq!(seat_labels(&[]), "Todo el auto");
        // Unknown ids are skipped rather than panicking
        assert_eq!(seat_labels(&[1, 9]), "Copiloto");
    }
}
