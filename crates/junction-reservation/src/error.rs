use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ReservationError {
    #[error("invalid reservation request: {0}")]
    InvalidRequest(String),
    #[error("pnr issuance exhausted after {0} attempts")]
    PnrExhausted(u32),
    #[error("storage error: {0}")]
    Storage(String),
}
