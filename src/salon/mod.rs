//! Salon services reachable without signing in
//!
//! Customers book from the public page and may cancel through the link they
//! receive. A cancellation closer to the start than the configured threshold
//! is recorded as late.

pub mod booking;
pub mod cancellation;
#[cfg(test)]
mod tests;

pub use booking::{BookingConfirmation, BookingRequest, BookingService, Slot};
pub use cancellation::{
    AppointmentDetails, CancellationPolicy, CancellationReceipt, CancellationService, TokenStatus,
};
