//! Entropy sources for share generation.
//!
//! This module defines the interface the sharing scheme draws randomness from,
//! and the sampling helper that turns raw bytes into big integers of a given
//! bit length.
//!
//! # Sources
//! - `OsEntropy`: the operating system CSPRNG (requires `std`).
//! - `RngSource`: adapter over any `rand_core` CSPRNG (`RngCore + CryptoRng`).
//! - `CustomSource`: caller-injected byte buffer, mainly for deterministic tests.
//!
//! # Security
//! - Sampling buffers are wrapped in `Zeroizing` and wiped after conversion.

extern crate alloc;

use alloc::vec;
use core::fmt;
use num_bigint::BigUint;
use zeroize::Zeroizing;

pub mod custom;
pub mod rng;
#[cfg(feature = "std")]
pub mod os;

pub use custom::CustomSource;
pub use rng::RngSource;
#[cfg(feature = "std")]
pub use os::OsEntropy;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// Source initialization failed.
    InitFailed,
    /// Failed to collect sufficient entropy bytes.
    CollectionFailed,
    /// Source is exhausted (e.g., fixed buffer).
    Exhausted,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::InitFailed => write!(f, "Entropy source initialization failed"),
            EntropyError::CollectionFailed => write!(f, "Failed to collect entropy"),
            EntropyError::Exhausted => write!(f, "Entropy source exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// A trait for entropy sources.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    ///
    /// # Arguments
    /// * `dest` - Buffer to fill with entropy.
    ///
    /// # Returns
    /// * `Ok(())` on success.
    /// * `Err(EntropyError)` if the source fails.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Draws a uniformly random integer in `[0, 2^bits)`.
///
/// The bytes are read big-endian and the excess high bits of the leading byte
/// are masked off, so every value of exactly `bits` bits is equally likely.
pub fn random_biguint<R: EntropySource + ?Sized>(
    rng: &mut R,
    bits: u64,
) -> Result<BigUint, EntropyError> {
    if bits == 0 {
        return Ok(BigUint::default());
    }

    let len = ((bits + 7) / 8) as usize;
    let mut buf = Zeroizing::new(vec![0u8; len]);
    rng.fill(&mut buf)?;

    let excess = (len as u64) * 8 - bits;
    buf[0] &= 0xFFu8 >> excess;

    Ok(BigUint::from_bytes_be(&buf))
}
