use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of random decimal digits for PNR candidates.
///
/// Implementations must fill the buffer with ASCII digits `0-9`, each drawn
/// independently. The source is injected into the issuer so tests can
/// substitute a seeded or scripted implementation.
pub trait DigitSource: Send + Sync {
    /// Fills `buf` with ASCII digits.
    fn fill(&self, buf: &mut [u8]);
}

/// Production digit source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl DigitSource for ThreadRngSource {
    fn fill(&self, buf: &mut [u8]) {
        let mut rng = rand::thread_rng();
        for byte in buf.iter_mut() {
            *byte = b'0' + rng.gen_range(0..10u8);
        }
    }
}

/// Deterministic digit source backed by a seeded PRNG.
///
/// Produces the same candidate sequence for the same seed, which makes
/// issuance reproducible in tests.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DigitSource for SeededSource {
    fn fill(&self, buf: &mut [u8]) {
        // A poisoned lock only means another thread panicked mid-draw;
        // the RNG state is still usable.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for byte in buf.iter_mut() {
            *byte = b'0' + rng.gen_range(0..10u8);
        }
    }
}
