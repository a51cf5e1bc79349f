//! Core types and traits for the Junction reservation system.
//!
//! This crate provides the shared domain types (PNR, booking record),
//! the booking store contract, and the error taxonomy used by the
//! issuer, storage, and reservation crates.

pub mod booking;
pub mod error;
pub mod pnr;
pub mod store;

pub use booking::BookingRecord;
pub use error::{CoreError, StorageError};
pub use pnr::{Pnr, PNR_LENGTH};
pub use store::{BookingStore, ReadStore};
