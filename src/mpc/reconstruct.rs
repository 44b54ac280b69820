//! Secret Reconstruction.
//!
//! Recovers the free coefficient of the sharing polynomial from `k` points by
//! Lagrange interpolation at `x = 0`:
//!
//! ```text
//!     s = sum_i y_i * prod_{j != i} (-x_j) / (x_i - x_j)   (mod p)
//! ```
//!
//! The loop is O(k^2) multiplications plus one inverse per point. The result does
//! not depend on the order of the points.
//!
//! # Validation
//! - Two positions that coincide modulo p make a denominator zero; the inverse
//!   fails and `MpcError::InvalidField` is returned. This is how duplicated or
//!   corrupted share sets surface.

extern crate alloc;
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::core::PrimeField;
use crate::mpc::{MpcError, share::Coordinates};

/// Reconstructs the secret from a coordinate set.
///
/// # Arguments
/// * `coordinates` - Position to value mapping.
/// * `field` - The field GF(p) the shares were created in.
///
/// # Returns
/// * `Ok(secret)` in `[0, p)`. An empty set interpolates to the zero polynomial.
/// * `Err(MpcError::InvalidField)` if two positions collide modulo p.
pub fn reconstruct(coordinates: &Coordinates, field: &PrimeField) -> Result<BigUint, MpcError> {
    let points: Vec<(BigUint, &BigUint)> = coordinates
        .iter()
        .map(|(x, y)| (BigUint::from(x), y))
        .collect();
    interpolate_at_zero(&points, field)
}

/// Reconstructs the secret from an unordered slice of `(x, y)` points.
///
/// Unlike `Coordinates`, the slice may contain repeated positions; these are
/// reported as `MpcError::InvalidField`.
pub fn reconstruct_points(
    points: &[(BigUint, BigUint)],
    field: &PrimeField,
) -> Result<BigUint, MpcError> {
    let points: Vec<(BigUint, &BigUint)> = points.iter().map(|(x, y)| (x.clone(), y)).collect();
    interpolate_at_zero(&points, field)
}

fn interpolate_at_zero(
    points: &[(BigUint, &BigUint)],
    field: &PrimeField,
) -> Result<BigUint, MpcError> {
    let mut secret = BigUint::zero();

    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut numerator = BigUint::one();
        let mut denominator = BigUint::one();

        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = field.mul(&numerator, &field.neg(x_j));
            denominator = field.mul(&denominator, &field.sub(&field.reduce(x_i), x_j));
        }

        let basis = field.mul(&numerator, &field.inv(&denominator)?);
        let term = field.mul(&field.reduce(y_i), &basis);
        secret = field.add(&secret, &term);
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpc::quorum::split;
    use crate::mpc::testing::MockEntropy;

    fn u(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_reconstruct_line() {
        // f(x) = 5 + 2x mod 13: points (1, 7), (2, 9)
        let field = PrimeField::new(u(13)).unwrap();
        let mut coords = Coordinates::new();
        coords.insert(1, u(7)).unwrap();
        coords.insert(2, u(9)).unwrap();
        assert_eq!(reconstruct(&coords, &field).unwrap(), u(5));
    }

    #[test]
    fn test_reconstruct_basic() {
        let mut rng = MockEntropy { fill_val: 0x47 };
        let field = PrimeField::mersenne(521).unwrap();
        let secret = BigUint::from_bytes_be(b"reconstruct me");

        let shares = split(&mut rng, &field, Some(&secret), 3, 5).unwrap();

        // All shares (over-determined) and every exact subset recover the secret.
        let coords = Coordinates::from_shares(&shares).unwrap();
        assert_eq!(reconstruct(&coords, &field).unwrap(), secret);

        let coords = Coordinates::from_shares(&shares[0..3]).unwrap();
        assert_eq!(reconstruct(&coords, &field).unwrap(), secret);

        let coords = Coordinates::from_shares([&shares[1], &shares[3], &shares[4]]).unwrap();
        assert_eq!(reconstruct(&coords, &field).unwrap(), secret);

        // Too few shares give an unrelated value.
        let coords = Coordinates::from_shares(&shares[0..2]).unwrap();
        assert_ne!(reconstruct(&coords, &field).unwrap(), secret);
    }

    #[test]
    fn test_order_independence() {
        let mut rng = MockEntropy { fill_val: 0x47 };
        let field = PrimeField::mersenne(127).unwrap();
        let shares = split(&mut rng, &field, None, 4, 4).unwrap();

        let forward: Vec<(BigUint, BigUint)> = shares
            .iter()
            .map(|s| (u(s.position as u64), s.value.clone()))
            .collect();
        let expected = reconstruct_points(&forward, &field).unwrap();

        let orders = [[3usize, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in orders.iter() {
            let permuted: Vec<(BigUint, BigUint)> =
                order.iter().map(|&i| forward[i].clone()).collect();
            assert_eq!(reconstruct_points(&permuted, &field).unwrap(), expected);
        }
    }

    #[test]
    fn test_duplicate_positions() {
        let field = PrimeField::new(u(13)).unwrap();
        let points = alloc::vec![(u(1), u(7)), (u(1), u(7)), (u(2), u(9))];
        assert_eq!(reconstruct_points(&points, &field), Err(MpcError::InvalidField));

        // 14 = 1 mod 13: distinct integers, same field element.
        let points = alloc::vec![(u(1), u(7)), (u(14), u(7))];
        assert_eq!(reconstruct_points(&points, &field), Err(MpcError::InvalidField));
    }

    #[test]
    fn test_empty_and_single() {
        let field = PrimeField::new(u(13)).unwrap();
        assert_eq!(reconstruct(&Coordinates::new(), &field).unwrap(), u(0));

        // A single point is a constant polynomial.
        let mut coords = Coordinates::new();
        coords.insert(4, u(11)).unwrap();
        assert_eq!(reconstruct(&coords, &field).unwrap(), u(11));
    }
}
