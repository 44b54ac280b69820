//! Share generation for Shamir's Secret Sharing over GF(p).
//!
//! Evaluates the secret polynomial at the public positions `1..=n`. Position 0 is
//! never used, since `f(0)` is the secret itself.

extern crate alloc;
use alloc::vec::Vec;
use num_bigint::BigUint;
use crate::core::PrimeField;
use crate::entropy::EntropySource;
use crate::mpc::polynomial::{init_polynomial, Polynomial};
use crate::mpc::{MpcError, share::{Position, Share}};

/// Evaluates `poly` at positions `1..=share_count`.
///
/// Share `i` (0-based) gets position `i + 1`.
///
/// # Arguments
/// * `field` - The field GF(p).
/// * `poly` - A fully populated polynomial.
/// * `share_count` - Number of shares `n`.
///
/// # Returns
/// * `Ok(Vec<Share>)` containing `n` shares on success.
/// * `Err(MpcError::NullConfiguration)` if `n == 0` or a coefficient slot is empty.
pub fn create_shares(
    field: &PrimeField,
    poly: &Polynomial,
    share_count: usize,
) -> Result<Vec<Share>, MpcError> {
    if share_count == 0 {
        return Err(MpcError::NullConfiguration("share count"));
    }
    if !poly.is_complete() {
        return Err(MpcError::NullConfiguration("coefficient"));
    }

    let mut shares = Vec::with_capacity(share_count);
    for i in 0..share_count {
        let position = Position::try_from(i + 1).map_err(|_| MpcError::InvalidPosition)?;
        let value = poly.evaluate(field, &BigUint::from(position))?;
        shares.push(Share::new(position, value)?);
    }

    log::debug!(
        "Created {} shares over a {}-bit field (threshold {})",
        share_count,
        field.bits(),
        poly.len()
    );
    Ok(shares)
}

/// Splits a secret into `share_count` shares, requiring `threshold` to reconstruct.
///
/// The polynomial only lives for the duration of the call and is wiped on return.
///
/// # Arguments
/// * `rng` - Entropy source.
/// * `field` - The field GF(p).
/// * `secret` - Secret in `(0, p)`, or `None` for a random one.
/// * `threshold` - Shares required `t`.
/// * `share_count` - Shares produced `n`.
pub fn split<R: EntropySource + ?Sized>(
    rng: &mut R,
    field: &PrimeField,
    secret: Option<&BigUint>,
    threshold: usize,
    share_count: usize,
) -> Result<Vec<Share>, MpcError> {
    let poly = init_polynomial(secret, rng, field, threshold)?;
    create_shares(field, &poly, share_count)
}
