//! Unique PNR issuance for the Junction reservation system.
//!
//! This crate provides the issuer that attaches a globally unique PNR to a
//! new booking: random candidate generation through an injected
//! [`DigitSource`], an existence check against the booking store, and a
//! bounded retry loop around the store's atomic commit.

pub mod error;
pub mod issuer;
pub mod source;

pub use error::IssueError;
pub use issuer::{IssuerSettings, PnrIssuer};
pub use source::{DigitSource, SeededSource, ThreadRngSource};
