use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use junction_core::error::Result;
use junction_core::{BookingRecord, BookingStore, Pnr, ReadStore, StorageError};

/// In-memory storage entry for a booking.
#[derive(Debug, Clone)]
struct Entry {
    record: BookingRecord,
    cancelled_at: Option<Timestamp>,
}

/// In-memory implementation of the booking store using DashMap.
///
/// `insert` goes through the map's entry API, which holds the shard lock
/// across the occupancy check and the write. Two concurrent inserts of the
/// same PNR therefore cannot both succeed, which is the uniqueness
/// guarantee the issuer's commit path relies on.
///
/// Cancellation is a soft operation: the entry stays in the map so the PNR
/// remains issued forever, it just stops being visible to `get`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    bookings: DashMap<String, Entry>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bookings: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn get(&self, pnr: &Pnr) -> Result<Option<BookingRecord>> {
        let Some(entry) = self.bookings.get(pnr.as_str()) else {
            return Ok(None);
        };

        if entry.cancelled_at.is_some() {
            return Ok(None);
        }

        Ok(Some(entry.record.clone()))
    }

    async fn exists(&self, pnr: &Pnr) -> Result<bool> {
        // Cancelled entries still count: their PNRs are retired, not freed.
        Ok(self.bookings.contains_key(pnr.as_str()))
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn insert(&self, pnr: &Pnr, record: BookingRecord) -> Result<()> {
        match self.bookings.entry(pnr.as_str().to_owned()) {
            MapEntry::Occupied(_) => Err(StorageError::Conflict(pnr.to_string())),
            MapEntry::Vacant(slot) => {
                slot.insert(Entry {
                    record,
                    cancelled_at: None,
                });
                Ok(())
            }
        }
    }

    async fn cancel(&self, pnr: &Pnr) -> Result<bool> {
        let Some(mut entry) = self.bookings.get_mut(pnr.as_str()) else {
            return Ok(false);
        };

        if entry.cancelled_at.is_some() {
            return Ok(false);
        }

        entry.cancelled_at = Some(Timestamp::now());
        Ok(true)
    }
}
