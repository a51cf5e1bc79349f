use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// Standard PNR width: ten decimal digits, leading zeros permitted.
pub const PNR_LENGTH: usize = 10;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 32;

/// A validated passenger name record identifier.
///
/// PNRs are strings of ASCII digits `0-9`. Production issuance uses
/// [`PNR_LENGTH`] digits; shorter widths are accepted so callers can
/// configure a restricted keyspace (primarily for exhaustion testing).
///
/// A PNR is assigned exactly once, when its booking is committed, and is
/// never reused afterwards, even if the booking is later cancelled.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pnr(SmolStr);

impl Pnr {
    /// Creates a new `Pnr` after validating the input.
    ///
    /// Valid PNRs are 1-32 characters and contain only ASCII digits.
    pub fn new(pnr: impl Into<SmolStr>) -> Result<Self, CoreError> {
        let pnr = pnr.into();
        Self::validate(&pnr)?;
        Ok(Self(pnr))
    }

    /// Creates a `Pnr` without validation.
    ///
    /// Use this only for values produced by trusted internal sources
    /// (e.g. digit sources that are guaranteed to emit `0-9`).
    pub fn new_unchecked(pnr: impl Into<SmolStr>) -> Self {
        Self(pnr.into())
    }

    /// Returns the PNR as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(pnr: &str) -> Result<(), CoreError> {
        if pnr.len() < MIN_LENGTH || pnr.len() > MAX_LENGTH {
            return Err(CoreError::InvalidPnr(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                pnr.len()
            )));
        }

        if !pnr.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidPnr(format!(
                "must contain only ASCII digits: '{}'",
                pnr
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Pnr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pnr").field(&self.0).finish()
    }
}

impl Display for Pnr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Pnr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pnr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Pnr::new(s).map_err(serde::de::Error::custom)
    }
}
