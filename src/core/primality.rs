//! Probabilistic primality testing.
//!
//! Miller-Rabin with random witnesses, preceded by trial division by the primes
//! below 256. A composite survives one round with probability at most 1/4, so
//! `rounds` rounds bound the error by `4^-rounds`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use crate::entropy::{random_biguint, EntropyError, EntropySource};

/// Primes below 256, used for trial division.
const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
    89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179,
    181, 191, 193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Returns true if `n` is probably prime.
///
/// # Arguments
/// * `n` - Candidate.
/// * `rounds` - Number of Miller-Rabin rounds with independent random witnesses.
/// * `rng` - Source for the witnesses.
///
/// # Returns
/// * `Ok(false)` if `n` is certainly composite (or < 2).
/// * `Ok(true)` if `n` passed trial division and every round.
/// * `Err(EntropyError)` if witnesses could not be drawn.
pub fn is_probable_prime<R: EntropySource + ?Sized>(
    n: &BigUint,
    rounds: u32,
    rng: &mut R,
) -> Result<bool, EntropyError> {
    if n < &BigUint::from(2u32) {
        return Ok(false);
    }

    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return Ok(true);
        }
        if (n % &p).is_zero() {
            return Ok(false);
        }
    }

    // n is odd and > 251 from here on.
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let a = random_witness(n, rng)?;
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return Ok(false);
            }
        }
        return Ok(false);
    }

    Ok(true)
}

/// Draws a witness uniformly from `[2, n - 2]` by rejection sampling.
fn random_witness<R: EntropySource + ?Sized>(
    n: &BigUint,
    rng: &mut R,
) -> Result<BigUint, EntropyError> {
    let low = BigUint::from(2u32);
    let high = n - &low;
    let bits = n.bits();
    loop {
        let a = random_biguint(rng, bits)?;
        if a >= low && a <= high {
            return Ok(a);
        }
    }
}
