//! Nonce generation for SouthXchange API authentication.
//!
//! SouthXchange rejects a signed request whose nonce does not exceed the last
//! nonce it accepted for the same access key ("Invalid API key or nonce").

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of nonces for signed requests.
///
/// Every value returned must be greater than all values previously returned
/// by the same provider.
pub trait NonceProvider: Send + Sync {
    /// Issue the next nonce.
    fn next_nonce(&self) -> u64;
}

/// Clock based nonces in microseconds since the Unix epoch.
///
/// The last issued value acts as a floor: if the clock has not advanced (or
/// went backwards) the floor plus one is issued instead. Issued values are
/// never handed back, even when the request that consumed them fails.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    floor: AtomicU64,
}

impl IncreasingNonce {
    /// Create a provider with no nonce issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the larger of `candidate` and the floor plus one, raising the floor.
    fn advance(&self, candidate: u64) -> u64 {
        let mut floor = self.floor.load(Ordering::SeqCst);
        loop {
            let issued = candidate.max(floor.saturating_add(1));
            match self
                .floor
                .compare_exchange_weak(floor, issued, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return issued,
                // Lost the race; retry against the value that won.
                Err(current) => floor = current,
            }
        }
    }
}

fn unix_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or_default()
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        self.advance(unix_micros())
    }
}
