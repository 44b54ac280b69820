//! Secret polynomial for GF(p) sharing.
//!
//! The polynomial is stored as a slot array `[s0, s1, ..., s_{t-1}]` where `s0` is
//! the secret and the rest are random blinding coefficients. Slots can be empty:
//! a session may clear individual coefficients or grow the threshold, and the
//! polynomial must not be evaluated until every slot is populated again.
//!
//! # Security
//! - **Rejection Sampling**: `generate_secret` draws values of p's bit length and
//!   retries until `0 < v < p`, so the distribution over `(0, p)` is uniform.
//! - **Wiping**: Dropped or cleared coefficients are overwritten with zero digits.
//!   `num-bigint` owns its digit buffer and may have copied it during arithmetic,
//!   so this cannot guarantee that no residue of a coefficient stays in memory.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use crate::core::PrimeField;
use crate::entropy::{random_biguint, EntropySource};
use super::MpcError;

/// Overwrites the digits of `value` with zeros in place and leaves it equal to 0.
pub fn wipe(value: &mut BigUint) {
    let digits = value.iter_u32_digits().len();
    if digits == 0 {
        return;
    }
    // Rewrites the existing digit buffer before it is shrunk and released.
    let zeros = vec![0u32; digits];
    value.assign_from_slice(&zeros);
    debug_assert!(value.is_zero());
}

/// Generates a uniformly distributed field element in the open range `(0, p)`.
///
/// # Arguments
/// * `rng` - Entropy source.
/// * `field` - The field GF(p).
///
/// # Returns
/// * `Ok(value)` with `0 < value < p`.
/// * `Err(MpcError::RngFailure)` if the source fails.
pub fn generate_secret<R: EntropySource + ?Sized>(
    rng: &mut R,
    field: &PrimeField,
) -> Result<BigUint, MpcError> {
    let bits = field.bits();
    loop {
        let mut candidate = random_biguint(rng, bits)?;
        if !candidate.is_zero() && field.contains(&candidate) {
            return Ok(candidate);
        }
        wipe(&mut candidate);
    }
}

/// Generates `count` independent field elements in `(0, p)`.
pub fn create_secrets<R: EntropySource + ?Sized>(
    rng: &mut R,
    field: &PrimeField,
    count: usize,
) -> Result<Vec<BigUint>, MpcError> {
    let mut secrets = Vec::with_capacity(count);
    for _ in 0..count {
        secrets.push(generate_secret(rng, field)?);
    }
    Ok(secrets)
}

/// Checks that `secret` lies in `(0, p)`.
pub fn validate_secret(secret: &BigUint, field: &PrimeField) -> Result<(), MpcError> {
    if secret.is_zero() || !field.contains(secret) {
        return Err(MpcError::InvalidSecret);
    }
    Ok(())
}

/// Builds a polynomial of `threshold` coefficients.
///
/// # Arguments
/// * `secret` - Free coefficient; generated at random when `None`.
/// * `rng` - Entropy source for the secret (if needed) and the blinding coefficients.
/// * `field` - The field GF(p).
/// * `threshold` - Number of coefficients `t` (degree `t - 1`).
///
/// # Returns
/// * `Ok(Polynomial)` with every slot populated.
/// * `Err(MpcError::InvalidSecret)` if the supplied secret is outside `(0, p)`.
/// * `Err(MpcError::NullConfiguration("threshold"))` if `threshold == 0`.
pub fn init_polynomial<R: EntropySource + ?Sized>(
    secret: Option<&BigUint>,
    rng: &mut R,
    field: &PrimeField,
    threshold: usize,
) -> Result<Polynomial, MpcError> {
    if threshold == 0 {
        return Err(MpcError::NullConfiguration("threshold"));
    }

    let mut poly = Polynomial::with_threshold(threshold);
    let s0 = match secret {
        Some(s) => {
            validate_secret(s, field)?;
            s.clone()
        }
        None => generate_secret(rng, field)?,
    };
    poly.set(0, s0)?;
    poly.fill_blinding(rng, field)?;
    Ok(poly)
}

/// Coefficient slot array `[s0, s1, ..., s_{t-1}]`.
#[derive(Default)]
pub struct Polynomial {
    slots: Vec<Option<BigUint>>,
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("slots", &self.slots.len())
            .field("populated", &self.populated())
            .field("coefficients", &"***SENSITIVE***")
            .finish()
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Polynomial {
    /// Creates `threshold` empty slots.
    pub fn with_threshold(threshold: usize) -> Self {
        let mut slots = Vec::with_capacity(threshold);
        slots.resize_with(threshold, || None);
        Self { slots }
    }

    /// Creates a fully populated polynomial from `[s0, s1, ...]`.
    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        Self {
            slots: coefficients.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots (the threshold `t`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of populated slots.
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if every slot holds a coefficient.
    pub fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// The free coefficient, if present.
    pub fn secret(&self) -> Option<&BigUint> {
        self.slots.first().and_then(Option::as_ref)
    }

    /// Coefficient at `index`, if present.
    pub fn coefficient(&self, index: usize) -> Option<&BigUint> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Stores `value` at `index`, wiping the previous coefficient.
    pub fn set(&mut self, index: usize, value: BigUint) -> Result<(), MpcError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(MpcError::CoefficientOutOfRange { index, len })?;
        if let Some(old) = slot.as_mut() {
            wipe(old);
        }
        *slot = Some(value);
        Ok(())
    }

    /// Resizes to `threshold` slots.
    ///
    /// Overlapping coefficients are kept, truncated ones are wiped and new slots are empty.
    pub fn resize(&mut self, threshold: usize) {
        if threshold < self.slots.len() {
            for slot in self.slots[threshold..].iter_mut() {
                if let Some(value) = slot.as_mut() {
                    wipe(value);
                }
            }
            self.slots.truncate(threshold);
        } else {
            self.slots.resize_with(threshold, || None);
        }
    }

    /// Populates every empty slot from index 1 upwards with a random coefficient.
    ///
    /// Slot 0 is left untouched. Returns the number of slots filled.
    pub fn fill_blinding<R: EntropySource + ?Sized>(
        &mut self,
        rng: &mut R,
        field: &PrimeField,
    ) -> Result<usize, MpcError> {
        let mut filled = 0;
        for slot in self.slots.iter_mut().skip(1) {
            if slot.is_none() {
                *slot = Some(generate_secret(rng, field)?);
                filled += 1;
            }
        }
        Ok(filled)
    }

    /// Wipes and empties the slot at `index`.
    pub fn clear_slot(&mut self, index: usize) -> Result<(), MpcError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(MpcError::CoefficientOutOfRange { index, len })?;
        if let Some(value) = slot.as_mut() {
            wipe(value);
        }
        *slot = None;
        Ok(())
    }

    /// Wipes and empties every slot, keeping the slot count.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(value) = slot.as_mut() {
                wipe(value);
            }
            *slot = None;
        }
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    ///
    /// f(x) = s0 + s1*x + ... + s_{t-1}*x^(t-1) mod p
    ///
    /// # Returns
    /// * `Ok(f(x))` in `[0, p)`.
    /// * `Err(MpcError::NullConfiguration("coefficient"))` if any slot is empty.
    pub fn evaluate(&self, field: &PrimeField, x: &BigUint) -> Result<BigUint, MpcError> {
        if self.slots.is_empty() {
            return Err(MpcError::NullConfiguration("threshold"));
        }

        let mut result = BigUint::zero();
        for slot in self.slots.iter().rev() {
            let coeff = slot.as_ref().ok_or(MpcError::NullConfiguration("coefficient"))?;
            result = field.add(&field.mul(&result, x), coeff);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::CustomSource;
    use crate::mpc::testing::MockEntropy;

    fn u(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn field(p: u64) -> PrimeField {
        PrimeField::new(u(p)).unwrap()
    }

    #[test]
    fn test_wipe() {
        let mut v = BigUint::from_bytes_be(&[0xAB; 70]);
        wipe(&mut v);
        assert!(v.is_zero());

        let mut zero = BigUint::zero();
        wipe(&mut zero);
        assert!(zero.is_zero());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_generate_secret_range() {
        let mut rng = crate::entropy::OsEntropy::new();
        for p in [2u64, 3, 5, 7, 13, 251, 65_537] {
            let f = field(p);
            for _ in 0..200 {
                let s = generate_secret(&mut rng, &f).unwrap();
                assert!(!s.is_zero());
                assert!(s < u(p));
            }
        }
    }

    #[test]
    fn test_generate_secret_smallest_prime() {
        // For p = 2 the only admissible value is 1.
        let mut rng = MockEntropy { fill_val: 0 };
        let f = field(2);
        for _ in 0..100 {
            assert_eq!(generate_secret(&mut rng, &f).unwrap(), u(1));
        }
    }

    #[test]
    fn test_generate_secret_rejects_out_of_range() {
        // p = 7 has 3 bits; 0 and 7 are rejected, 5 is accepted.
        let mut rng = CustomSource::new();
        rng.add_bytes(&[0x00, 0x07, 0x05]);
        assert_eq!(generate_secret(&mut rng, &field(7)).unwrap(), u(5));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_generate_secret_rng_failure() {
        let mut rng = CustomSource::new();
        assert_eq!(
            generate_secret(&mut rng, &field(7)),
            Err(MpcError::RngFailure(crate::entropy::EntropyError::Exhausted))
        );
    }

    #[test]
    fn test_create_secrets() {
        let mut rng = MockEntropy { fill_val: 0x33 };
        let f = field(73_939_133);
        let secrets = create_secrets(&mut rng, &f, 3).unwrap();
        assert_eq!(secrets.len(), 3);
        for s in &secrets {
            assert!(!s.is_zero());
            assert!(f.contains(s));
        }
    }

    #[test]
    fn test_init_polynomial_secret_bounds() {
        let mut rng = MockEntropy { fill_val: 0x33 };
        let f = field(2_147_483_647);
        let p = f.modulus().clone();

        assert!(init_polynomial(Some(&u(1)), &mut rng, &f, 3).is_ok());
        assert!(init_polynomial(Some(&(&p - 1u32)), &mut rng, &f, 3).is_ok());
        assert_eq!(
            init_polynomial(Some(&u(0)), &mut rng, &f, 3).unwrap_err(),
            MpcError::InvalidSecret
        );
        assert_eq!(
            init_polynomial(Some(&p), &mut rng, &f, 3).unwrap_err(),
            MpcError::InvalidSecret
        );
        assert_eq!(
            init_polynomial(Some(&(&p + 2u32)), &mut rng, &f, 3).unwrap_err(),
            MpcError::InvalidSecret
        );
        assert_eq!(
            init_polynomial(None, &mut rng, &f, 0).unwrap_err(),
            MpcError::NullConfiguration("threshold")
        );
    }

    #[test]
    fn test_init_polynomial_fills_all_slots() {
        let mut rng = MockEntropy { fill_val: 0x10 };
        let f = field(2_147_483_647);
        let poly = init_polynomial(Some(&u(42)), &mut rng, &f, 4).unwrap();
        assert_eq!(poly.len(), 4);
        assert!(poly.is_complete());
        assert_eq!(poly.secret(), Some(&u(42)));
    }

    #[test]
    fn test_evaluate() {
        // f(x) = 1 + 2x + 3x^2 mod 97
        let f = field(97);
        let poly = Polynomial::from_coefficients(alloc::vec![u(1), u(2), u(3)]);
        assert_eq!(poly.evaluate(&f, &u(0)).unwrap(), u(1));
        assert_eq!(poly.evaluate(&f, &u(1)).unwrap(), u(6));
        assert_eq!(poly.evaluate(&f, &u(2)).unwrap(), u(17));
        assert_eq!(poly.evaluate(&f, &u(10)).unwrap(), u(321 % 97));
    }

    #[test]
    fn test_resize_and_clear() {
        let mut poly = Polynomial::from_coefficients(alloc::vec![u(5), u(6), u(7)]);

        poly.resize(5);
        assert_eq!(poly.len(), 5);
        assert_eq!(poly.populated(), 3);
        assert_eq!(poly.secret(), Some(&u(5)));
        assert!(!poly.is_complete());
        assert_eq!(
            poly.evaluate(&field(97), &u(1)).unwrap_err(),
            MpcError::NullConfiguration("coefficient")
        );

        poly.resize(1);
        assert_eq!(poly.len(), 1);
        assert_eq!(poly.secret(), Some(&u(5)));
        assert!(poly.is_complete());

        poly.clear_slot(0).unwrap();
        assert_eq!(poly.secret(), None);
        assert_eq!(
            poly.clear_slot(1),
            Err(MpcError::CoefficientOutOfRange { index: 1, len: 1 })
        );

        poly.resize(0);
        assert!(poly.is_empty());
        assert_eq!(
            poly.evaluate(&field(97), &u(1)).unwrap_err(),
            MpcError::NullConfiguration("threshold")
        );
    }

    #[test]
    fn test_fill_blinding_keeps_secret() {
        let mut rng = MockEntropy { fill_val: 0x33 };
        let f = field(2_147_483_647);
        let mut poly = Polynomial::from_coefficients(alloc::vec![u(99)]);
        poly.resize(4);
        assert_eq!(poly.fill_blinding(&mut rng, &f).unwrap(), 3);
        assert!(poly.is_complete());
        assert_eq!(poly.secret(), Some(&u(99)));
        assert_eq!(poly.fill_blinding(&mut rng, &f).unwrap(), 0);
    }

    #[test]
    fn test_debug_redaction() {
        let poly = Polynomial::from_coefficients(alloc::vec![u(123_456_789)]);
        let s = alloc::format!("{:?}", poly);
        assert!(s.contains("***SENSITIVE***"));
        assert!(!s.contains("123456789"));
    }
}
