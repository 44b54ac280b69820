//! Shamir's Secret Sharing over GF(p).
//!
//! A secret `s` in `(0, p)` becomes the free coefficient of a random polynomial of
//! degree `t - 1`; share `i` is the polynomial evaluated at position `i`. Any `t`
//! shares recover `s` by Lagrange interpolation at zero, fewer reveal nothing.
//!
//! # Components
//! - `share`: Share, position and coordinate-set definitions.
//! - `polynomial`: Secret sampling and the coefficient slot array.
//! - `quorum`: Share generation (polynomial evaluation at positions `1..=n`).
//! - `reconstruct`: Lagrange interpolation for secret recovery.
//! - `combinations`: Exhaustive validation of every `t`-subset of a share set.
//! - `session`: Stateful builder tying the above together.
//!
//! # Security
//! - **Uniform Sampling**: Random coefficients are drawn by rejection sampling, never by
//!   reducing an oversized value mod p.
//! - **Zeroization**: Coefficient storage is overwritten before release (best effort,
//!   see `polynomial::wipe`).
//! - **Redaction**: `Debug` output never contains share values or coefficients.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use crate::core::FieldError;
use crate::entropy::EntropyError;

pub mod share;
pub mod polynomial;
pub mod quorum;
pub mod reconstruct;
pub mod combinations;
pub mod session;

pub use combinations::{validate_all_combinations, Combinations};
pub use polynomial::{create_secrets, generate_secret, init_polynomial, Polynomial};
pub use quorum::{create_shares, split};
pub use reconstruct::{reconstruct, reconstruct_points};
pub use session::{Session, SessionState};
pub use share::{Coordinates, Position, Share};

/// Errors for secret sharing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MpcError {
    /// The modulus failed the primality test (or is < 2).
    InvalidPrime,
    /// Secret is outside the open range (0, p).
    InvalidSecret,
    /// A required setting was not configured before a dependent operation.
    /// Carries the name of the missing setting.
    NullConfiguration(&'static str),
    /// Degenerate modular inverse, caused by duplicate or colliding positions.
    InvalidField,
    /// A subset of shares reconstructed a different secret.
    /// Carries the positions of the offending subset.
    ReconstructionMismatch { positions: Vec<Position> },
    /// Coordinate set size differs from the configured threshold.
    ShareCountMismatch { expected: usize, actual: usize },
    /// Position 0 is reserved for the secret.
    InvalidPosition,
    /// Coefficient slot index beyond the polynomial length.
    CoefficientOutOfRange { index: usize, len: usize },
    /// Random number generator failure.
    RngFailure(EntropyError),
}

impl fmt::Display for MpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpcError::InvalidPrime => write!(f, "Modulus is not prime"),
            MpcError::InvalidSecret => write!(f, "Secret must be in the range (0, p)"),
            MpcError::NullConfiguration(field) => write!(f, "Missing configuration: {}", field),
            MpcError::InvalidField => {
                write!(f, "Degenerate modular inverse: duplicate or colliding share positions")
            }
            MpcError::ReconstructionMismatch { positions } => {
                write!(f, "Shares at positions {:?} reconstruct a different secret", positions)
            }
            MpcError::ShareCountMismatch { expected, actual } => {
                write!(f, "Expected {} shares, got {}", expected, actual)
            }
            MpcError::InvalidPosition => write!(f, "Share position must be non-zero"),
            MpcError::CoefficientOutOfRange { index, len } => {
                write!(f, "Coefficient index {} out of range for {} slots", index, len)
            }
            MpcError::RngFailure(e) => write!(f, "Random number generator failure: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MpcError {}

impl From<FieldError> for MpcError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::InvalidModulus => MpcError::InvalidPrime,
            FieldError::NotInvertible => MpcError::InvalidField,
        }
    }
}

impl From<EntropyError> for MpcError {
    fn from(e: EntropyError) -> Self {
        MpcError::RngFailure(e)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_error_conversions() {
        assert_eq!(MpcError::from(FieldError::NotInvertible), MpcError::InvalidField);
        assert_eq!(MpcError::from(FieldError::InvalidModulus), MpcError::InvalidPrime);
        assert_eq!(
            MpcError::from(EntropyError::Exhausted),
            MpcError::RngFailure(EntropyError::Exhausted)
        );
    }

    #[test]
    fn test_error_display() {
        let e = MpcError::ReconstructionMismatch { positions: vec![1, 3, 5] };
        assert_eq!(e.to_string(), "Shares at positions [1, 3, 5] reconstruct a different secret");
        let e = MpcError::NullConfiguration("prime");
        assert_eq!(e.to_string(), "Missing configuration: prime");
    }
}
