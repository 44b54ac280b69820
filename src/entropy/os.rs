//! Operating system CSPRNG.
//!
//! Default source for sessions that were not handed one explicitly.

use rand_core::{OsRng, RngCore};
use super::{EntropyError, EntropySource};

/// Entropy from the OS (`getrandom`).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl OsEntropy {
    /// Creates a handle to the OS generator.
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn name(&self) -> &'static str {
        "OsRng"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            log::error!("OS entropy collection failed: {}", e);
            EntropyError::CollectionFailed
        })
    }
}
