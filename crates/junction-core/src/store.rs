use crate::booking::BookingRecord;
use crate::error::Result;
use crate::pnr::Pnr;
use async_trait::async_trait;

/// A read-only view of a booking store.
///
/// This trait provides only the read operations from [`BookingStore`],
/// allowing lookup services to have read-only access.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Retrieves the active booking for a given PNR.
    /// Returns `None` if the PNR does not exist or the booking was cancelled.
    async fn get(&self, pnr: &Pnr) -> Result<Option<BookingRecord>>;

    /// Checks whether a PNR has ever been issued.
    ///
    /// Cancelled bookings count as issued: their PNRs stay reserved for the
    /// lifetime of the store so historical records and receipts never
    /// collide with a later booking.
    async fn exists(&self, pnr: &Pnr) -> Result<bool>;
}

#[async_trait]
pub trait BookingStore: ReadStore {
    /// Commits a new booking under `pnr`. Returns `Err(Conflict)` if the
    /// PNR was ever issued before, enforced atomically by the store.
    async fn insert(&self, pnr: &Pnr, record: BookingRecord) -> Result<()>;

    /// Cancels the booking for a given PNR, keeping the PNR issued.
    /// Returns `true` if an active booking existed and was cancelled.
    async fn cancel(&self, pnr: &Pnr) -> Result<bool>;
}
