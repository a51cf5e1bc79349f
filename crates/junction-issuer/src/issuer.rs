use crate::error::IssueError;
use crate::source::DigitSource;
use junction_core::{BookingRecord, BookingStore, Pnr, StorageError, PNR_LENGTH};
use std::sync::Arc;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Configures a PNR issuer instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct IssuerSettings {
    /// Number of decimal digits in an issued PNR.
    #[builder(default = PNR_LENGTH)]
    pub length: usize,
    /// Upper bound on generate-check-commit attempts before issuance
    /// fails with [`IssueError::Exhausted`].
    ///
    /// With the full 10-digit keyspace the expected attempt count is 1;
    /// the bound exists so a misconfigured (too narrow) keyspace fails
    /// loudly instead of looping forever.
    #[builder(default = 32)]
    pub max_attempts: u32,
}

impl Default for IssuerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Issues globally unique PNRs against a booking store.
///
/// Each attempt draws a random candidate from the digit source and checks
/// it against the store. The existence check keeps the common case free of
/// commit collisions, but it is only an optimization: between the check and
/// the commit another issuer can claim the same candidate. The store's
/// atomic uniqueness enforcement on insert is the actual correctness
/// guarantee, and a lost race is retried here with a fresh candidate.
pub struct PnrIssuer<S, D> {
    store: Arc<S>,
    source: Arc<D>,
    settings: IssuerSettings,
}

impl<S, D> Clone for PnrIssuer<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            source: Arc::clone(&self.source),
            settings: self.settings,
        }
    }
}

impl<S: BookingStore, D: DigitSource> PnrIssuer<S, D> {
    /// Creates an issuer that owns its store handle.
    pub fn new(store: S, source: D, settings: IssuerSettings) -> Self {
        Self::with_store(Arc::new(store), source, settings)
    }

    /// Creates an issuer over an already shared store handle.
    pub fn with_store(store: Arc<S>, source: D, settings: IssuerSettings) -> Self {
        Self {
            store,
            source: Arc::new(source),
            settings,
        }
    }

    pub fn settings(&self) -> IssuerSettings {
        self.settings
    }

    fn candidate(&self) -> Pnr {
        let mut buf = vec![0u8; self.settings.length];
        self.source.fill(&mut buf);
        // The DigitSource contract guarantees ASCII digits.
        let digits = std::str::from_utf8(&buf).expect("digit sources emit ASCII digits");
        Pnr::new_unchecked(digits)
    }

    /// Issues a PNR that was unissued at the time of the existence check.
    ///
    /// Performs exactly one existence check per attempt. The returned PNR
    /// is only reserved once the caller commits a booking under it; use
    /// [`issue_and_commit`](Self::issue_and_commit) unless the commit is
    /// handled elsewhere.
    pub async fn issue(&self) -> Result<Pnr, IssueError> {
        for attempt in 1..=self.settings.max_attempts {
            let pnr = self.candidate();
            if self.store.exists(&pnr).await? {
                debug!(%pnr, attempt, "candidate already issued, regenerating");
                continue;
            }
            return Ok(pnr);
        }

        warn!(
            attempts = self.settings.max_attempts,
            length = self.settings.length,
            "pnr issuance exhausted"
        );
        Err(IssueError::Exhausted {
            attempts: self.settings.max_attempts,
        })
    }

    /// Issues a PNR and commits `record` under it in one bounded loop.
    ///
    /// A uniqueness conflict on commit means another issuer claimed the
    /// candidate between our check and our insert; it consumes an attempt
    /// and the loop continues with a fresh candidate, never the same one.
    /// Store failures unrelated to uniqueness propagate unchanged.
    pub async fn issue_and_commit(&self, record: BookingRecord) -> Result<Pnr, IssueError> {
        for attempt in 1..=self.settings.max_attempts {
            let pnr = self.candidate();

            if self.store.exists(&pnr).await? {
                debug!(%pnr, attempt, "candidate already issued, regenerating");
                continue;
            }

            match self.store.insert(&pnr, record.clone()).await {
                Ok(()) => return Ok(pnr),
                Err(StorageError::Conflict(_)) => {
                    debug!(%pnr, attempt, "lost commit race, regenerating");
                    continue;
                }
                Err(other) => return Err(IssueError::Storage(other)),
            }
        }

        warn!(
            attempts = self.settings.max_attempts,
            length = self.settings.length,
            "pnr issuance exhausted"
        );
        Err(IssueError::Exhausted {
            attempts: self.settings.max_attempts,
        })
    }
}
