//! Configuration for secret sharing sessions.
//!
//! Defines the structure for host-supplied settings. A `SharingConfig` is turned
//! into a ready-to-use session by `Session::from_config`.

use num_bigint::BigUint;
use crate::core::{FieldError, PrimeField};

/// Where the field modulus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimeSource {
    /// Mersenne number `2^exponent - 1`.
    Mersenne(u32),
    /// Caller-supplied modulus.
    Explicit(BigUint),
}

impl PrimeSource {
    /// Builds the field context. Primality is not checked here.
    pub fn to_field(&self) -> Result<PrimeField, FieldError> {
        match self {
            PrimeSource::Mersenne(exponent) => PrimeField::mersenne(*exponent),
            PrimeSource::Explicit(prime) => PrimeField::new(prime.clone()),
        }
    }
}

/// Main configuration structure for a sharing session.
#[derive(Debug, Clone)]
pub struct SharingConfig {
    /// Field modulus.
    pub prime: PrimeSource,

    /// Shares required to reconstruct (t).
    pub threshold: usize,

    /// Shares produced (n).
    pub share_count: usize,

    /// Miller-Rabin rounds for primality validation.
    pub primality_rounds: u32,

    /// Reject share creation when `share_count < threshold`.
    /// When false the configuration is accepted and a warning is logged.
    pub strict_share_counts: bool,

    /// Run the primality test while building the session.
    pub validate_prime_on_build: bool,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            // 13th Mersenne prime.
            prime: PrimeSource::Mersenne(521),
            threshold: 3,
            share_count: 5,
            primality_rounds: 40,
            strict_share_counts: false,
            validate_prime_on_build: true,
        }
    }
}
