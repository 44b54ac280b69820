//! Adapter from `rand_core` generators to `EntropySource`.

use rand_core::{CryptoRng, RngCore};
use super::{EntropyError, EntropySource};

/// Wraps any cryptographically secure `rand_core` generator.
///
/// The `CryptoRng` bound keeps non-cryptographic generators (e.g. a seeded
/// `SmallRng`) from being injected by accident.
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngSource<R> {
    /// Wraps `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngSource<R> {
    fn name(&self) -> &'static str {
        "RngCore"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|_| EntropyError::CollectionFailed)
    }
}
