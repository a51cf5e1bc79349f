//! Reservation service for the Junction booking system.
//!
//! This crate wires the PNR issuer and a booking store into the
//! caller-facing reservation path: validate the request, issue a unique
//! PNR, and commit the booking under it in one bounded sequence.

pub mod error;
pub mod service;

pub use error::ReservationError;
pub use service::{ReservationRequest, ReservationService};
