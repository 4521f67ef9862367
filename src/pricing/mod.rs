//! Fare calculation for the shuttle service.
//!
//! Pure pricing math plus the quote endpoint the booking form calls while
//! the customer picks seats.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{calculate_price, round_money, Fare};
pub use routes::router;
