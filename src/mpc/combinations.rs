//! Exhaustive share-set validation.
//!
//! Checks that every `t`-subset of a share set reconstructs the expected secret.
//! The cost is `C(n, t)` reconstructions, so this is an opt-in verification step
//! after share creation, not part of the split/reconstruct path.

extern crate alloc;
use alloc::vec::Vec;
use num_bigint::BigUint;
use crate::core::PrimeField;
use crate::mpc::reconstruct::reconstruct;
use crate::mpc::{MpcError, share::{Coordinates, Position, Share}};

/// Iterator over the strictly increasing `k`-subsequences of `0..n`, in lexicographic order.
///
/// Keeps a single index array instead of recursing, so large `n` does not grow the stack.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Creates the generator for `C(n, k)` index sets.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost index that can still move right.
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }

        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Binomial coefficient `C(n, k)`, or `None` on overflow.
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result = C(n, i), and C(n, i) * (n - i) = C(n, i + 1) * (i + 1).
        result = result.checked_mul((n - i) as u128)? / (i + 1) as u128;
        u64::try_from(result).ok()?;
    }
    u64::try_from(result).ok()
}

/// Reconstructs from every `threshold`-subset of `shares` and compares with `expected`.
///
/// # Arguments
/// * `expected` - The secret the shares were created from.
/// * `field` - The field GF(p).
/// * `threshold` - Subset size `t`.
/// * `shares` - Share set; for shares from `create_shares`, index `i` holds position `i + 1`.
///
/// # Returns
/// * `Ok(count)` with the number of subsets examined, `C(n, t)`.
/// * `Err(MpcError::ReconstructionMismatch)` for the first subset that disagrees,
///   carrying its positions.
/// * `Err(MpcError::InvalidField)` if a subset holds colliding positions.
/// * `Err(MpcError::NullConfiguration)` if `threshold` is 0.
pub fn validate_all_combinations(
    expected: &BigUint,
    field: &PrimeField,
    threshold: usize,
    shares: &[Share],
) -> Result<u64, MpcError> {
    if threshold == 0 {
        return Err(MpcError::NullConfiguration("threshold"));
    }

    if let Some(total) = binomial(shares.len() as u64, threshold as u64) {
        log::debug!(
            "Validating {} combinations of {} out of {} shares",
            total,
            threshold,
            shares.len()
        );
    }

    let mut coordinates = Coordinates::new();
    let mut count = 0u64;

    for subset in Combinations::new(shares.len(), threshold) {
        coordinates.clear();
        for &index in subset.iter() {
            let share = &shares[index];
            if let Err(e) = coordinates.insert(share.position, share.value.clone()) {
                if e == MpcError::InvalidField {
                    log::error!("Share set repeats position {}", share.position);
                }
                return Err(e);
            }
        }

        let reconstructed = reconstruct(&coordinates, field)?;
        if &reconstructed != expected {
            let positions: Vec<Position> = subset.iter().map(|&i| shares[i].position).collect();
            log::error!("Share combination {:?} failed to reconstruct the secret", positions);
            return Err(MpcError::ReconstructionMismatch { positions });
        }
        count += 1;
    }

    Ok(count)
}
