use crate::error::ReservationError;
use jiff::civil::Date;
use junction_core::{BookingRecord, BookingStore, Pnr};
use junction_issuer::{DigitSource, IssueError, IssuerSettings, PnrIssuer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

const TRAIN_NUMBER_LENGTH: usize = 5;
const MAX_PASSENGER_NAME_LENGTH: usize = 255;

/// A request to reserve a seat on a train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Name of the passenger the booking is for.
    pub passenger_name: String,
    /// Five-digit train number.
    pub train_number: String,
    /// Calendar date of the journey.
    pub journey_date: Date,
}

/// Caller-facing reservation service.
///
/// Wraps a booking store and a [`PnrIssuer`] over the same store. The
/// issuer handles candidate generation and retry; this service handles
/// request validation, error mapping, and reads.
pub struct ReservationService<S, D> {
    store: Arc<S>,
    issuer: PnrIssuer<S, D>,
}

impl<S, D> Clone for ReservationService<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            issuer: self.issuer.clone(),
        }
    }
}

impl<S: BookingStore, D: DigitSource> ReservationService<S, D> {
    /// Creates a reservation service over `store`, issuing PNRs from
    /// `source` under the given settings.
    pub fn new(store: S, source: D, settings: IssuerSettings) -> Self {
        let store = Arc::new(store);
        let issuer = PnrIssuer::with_store(Arc::clone(&store), source, settings);
        Self { store, issuer }
    }

    fn validate(request: &ReservationRequest) -> Result<(), ReservationError> {
        let name = request.passenger_name.trim();
        if name.is_empty() {
            return Err(ReservationError::InvalidRequest(
                "passenger name cannot be empty".to_string(),
            ));
        }
        if name.len() > MAX_PASSENGER_NAME_LENGTH {
            return Err(ReservationError::InvalidRequest(format!(
                "passenger name exceeds {} characters",
                MAX_PASSENGER_NAME_LENGTH
            )));
        }

        if request.train_number.len() != TRAIN_NUMBER_LENGTH
            || !request.train_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ReservationError::InvalidRequest(format!(
                "train number must be {} digits: '{}'",
                TRAIN_NUMBER_LENGTH, request.train_number
            )));
        }

        Ok(())
    }

    /// Reserves a seat: validates the request, issues a unique PNR, and
    /// commits the booking under it.
    pub async fn reserve(&self, request: ReservationRequest) -> Result<Pnr, ReservationError> {
        Self::validate(&request)?;

        let record = BookingRecord {
            passenger_name: request.passenger_name,
            train_number: request.train_number,
            journey_date: request.journey_date,
        };

        let pnr = self
            .issuer
            .issue_and_commit(record)
            .await
            .map_err(issue_to_reservation_error)?;

        info!(%pnr, "booking committed");
        Ok(pnr)
    }

    /// Retrieves the active booking for a PNR.
    pub async fn lookup(&self, pnr: &Pnr) -> Result<Option<BookingRecord>, ReservationError> {
        self.store
            .get(pnr)
            .await
            .map_err(|e| ReservationError::Storage(e.to_string()))
    }

    /// Cancels the booking for a PNR. The PNR itself stays retired and is
    /// never issued to a later booking.
    pub async fn cancel(&self, pnr: &Pnr) -> Result<bool, ReservationError> {
        let cancelled = self
            .store
            .cancel(pnr)
            .await
            .map_err(|e| ReservationError::Storage(e.to_string()))?;

        if cancelled {
            info!(%pnr, "booking cancelled");
        }
        Ok(cancelled)
    }
}

/// Converts an IssueError to a ReservationError.
fn issue_to_reservation_error(e: IssueError) -> ReservationError {
    match e {
        IssueError::Exhausted { attempts } => ReservationError::PnrExhausted(attempts),
        IssueError::Storage(other) => ReservationError::Storage(other.to_string()),
    }
}
