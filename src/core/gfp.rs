//! GF(p) arithmetic module.
//!
//! This module implements finite field arithmetic over a large prime modulus `p`,
//! backed by arbitrary-precision integers. Every result handed back to the caller
//! is in canonical form, i.e. in `[0, p)`; no negative or unreduced intermediate
//! escapes this layer.
//!
//! # Design Choices
//! - **Context Object**: Elements are plain `BigUint`s; the modulus lives in a
//!   `PrimeField` value that every operation goes through. This keeps the share
//!   types simple and lets one field be shared by reference across a session.
//! - **No Primality Check**: `PrimeField::new` only rejects degenerate moduli (< 2).
//!   Primality is verified separately by `core::primality`, because the test is
//!   probabilistic and needs an entropy source.
//! - **Signed Reduction**: `reduce` accepts `BigInt` so callers can form
//!   differences such as `x_i - x_j` and have them folded back into the field.
//!
//! # Usage
//! ```
//! use num_bigint::BigUint;
//! use shamir_gfp::core::gfp::PrimeField;
//!
//! let field = PrimeField::new(BigUint::from(7u32)).unwrap();
//! let a = BigUint::from(5u32);
//! let b = BigUint::from(4u32);
//! assert_eq!(field.add(&a, &b), BigUint::from(2u32));
//! assert_eq!(field.mul(&a, &b), BigUint::from(6u32));
//! assert_eq!(field.inv(&a).unwrap(), BigUint::from(3u32));
//! ```

use core::fmt;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Errors raised by the field layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Modulus is 0 or 1.
    InvalidModulus,
    /// Operand is congruent to 0 modulo p and has no inverse.
    NotInvertible,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidModulus => write!(f, "Field modulus must be at least 2"),
            FieldError::NotInvertible => write!(f, "Element is not invertible modulo p"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}

/// The prime field GF(p).
#[derive(Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeField")
            .field("bits", &self.modulus.bits())
            .finish()
    }
}

impl PrimeField {
    /// Creates a field context for the given modulus.
    ///
    /// The modulus is assumed to be prime; only `p < 2` is rejected here.
    pub fn new(modulus: BigUint) -> Result<Self, FieldError> {
        if modulus < BigUint::from(2u32) {
            return Err(FieldError::InvalidModulus);
        }
        Ok(Self { modulus })
    }

    /// Creates the field of the Mersenne number `2^exponent - 1`.
    ///
    /// The result is only a field when the exponent yields a Mersenne prime
    /// (2, 3, 5, 7, 13, 17, 19, 31, 61, 89, 107, 127, 521, ...).
    pub fn mersenne(exponent: u32) -> Result<Self, FieldError> {
        Self::new(mersenne_number(exponent))
    }

    /// Returns the modulus p.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bit length of p.
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Returns true if `value` is already in canonical range `[0, p)`.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Reduces a non-negative integer into `[0, p)`.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Reduces an integer of arbitrary sign into `[0, p)`.
    pub fn reduce_signed(&self, value: &BigInt) -> BigUint {
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        // mod_floor takes the sign of the divisor, so the result is never negative.
        let (_, magnitude) = value.mod_floor(&modulus).into_parts();
        magnitude
    }

    /// Computes `-a mod p`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);
        if a.is_zero() {
            a
        } else {
            &self.modulus - a
        }
    }

    /// Computes `a + b mod p`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Computes `a - b mod p`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.add(a, &self.neg(b))
    }

    /// Computes `a * b mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes the multiplicative inverse of `a` with the extended Euclidean algorithm.
    ///
    /// # Returns
    /// * `Ok(a^-1)` in `[1, p)`.
    /// * `Err(FieldError::NotInvertible)` if `a ≡ 0 (mod p)`, or if `gcd(a, p) != 1`
    ///   because the modulus was not actually prime.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, FieldError> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(FieldError::NotInvertible);
        }

        let a = BigInt::from_biguint(Sign::Plus, a);
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let egcd = a.extended_gcd(&modulus);
        if !egcd.gcd.is_one() {
            return Err(FieldError::NotInvertible);
        }
        Ok(self.reduce_signed(&egcd.x))
    }
}

/// Returns `2^exponent - 1`.
pub fn mersenne_number(exponent: u32) -> BigUint {
    (BigUint::one() << exponent) - BigUint::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> PrimeField {
        PrimeField::new(BigUint::from(97u32)).unwrap()
    }

    fn u(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_degenerate_modulus() {
        assert_eq!(PrimeField::new(u(0)), Err(FieldError::InvalidModulus));
        assert_eq!(PrimeField::new(u(1)), Err(FieldError::InvalidModulus));
        assert!(PrimeField::new(u(2)).is_ok());
    }

    #[test]
    fn test_mersenne_modulus() {
        let field = PrimeField::mersenne(61).unwrap();
        assert_eq!(field.modulus(), &BigUint::from(2_305_843_009_213_693_951u64));
        assert_eq!(field.bits(), 61);
        assert_eq!(PrimeField::mersenne(521).unwrap().bits(), 521);
        assert_eq!(PrimeField::mersenne(1), Err(FieldError::InvalidModulus));
    }

    #[test]
    fn test_reduce_signed() {
        let field = small_field();
        assert_eq!(field.reduce_signed(&BigInt::from(-1)), u(96));
        assert_eq!(field.reduce_signed(&BigInt::from(-97)), u(0));
        assert_eq!(field.reduce_signed(&BigInt::from(-195)), u(96));
        assert_eq!(field.reduce_signed(&BigInt::from(200)), u(6));
    }

    #[test]
    fn test_neg_and_sub() {
        let field = small_field();
        assert_eq!(field.neg(&u(0)), u(0));
        assert_eq!(field.neg(&u(1)), u(96));
        assert_eq!(field.neg(&u(97)), u(0));
        assert_eq!(field.sub(&u(3), &u(5)), u(95));
        assert_eq!(field.add(&field.sub(&u(3), &u(5)), &u(5)), u(3));
    }

    #[test]
    fn test_mul() {
        let field = small_field();
        assert_eq!(field.mul(&u(50), &u(2)), u(3));
        assert_eq!(field.mul(&u(96), &u(96)), u(1));
        assert_eq!(field.mul(&u(0), &u(42)), u(0));
    }

    #[test]
    fn test_inverse() {
        let field = small_field();
        for a in 1..97u32 {
            let inv = field.inv(&u(a)).unwrap();
            assert!(field.contains(&inv));
            assert_eq!(field.mul(&u(a), &inv), u(1));
        }
        assert_eq!(field.inv(&u(0)), Err(FieldError::NotInvertible));
        assert_eq!(field.inv(&u(97)), Err(FieldError::NotInvertible));
    }

    #[test]
    fn test_inverse_composite_modulus() {
        let field = PrimeField::new(u(15)).unwrap();
        assert_eq!(field.inv(&u(5)), Err(FieldError::NotInvertible));
        assert_eq!(field.inv(&u(2)).unwrap(), u(8));
    }

    #[test]
    fn test_debug_hides_modulus() {
        let field = small_field();
        let s = alloc::format!("{:?}", field);
        assert!(s.contains("bits: 7"));
    }
}
