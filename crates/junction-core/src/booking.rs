use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A booking record owned by an issued PNR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Name of the passenger the booking is for.
    pub passenger_name: String,
    /// Five-digit train number the booking is on.
    pub train_number: String,
    /// Calendar date of the journey.
    pub journey_date: Date,
}
