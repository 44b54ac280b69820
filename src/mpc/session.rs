//! Sharing Session.
//!
//! Owns the prime, the share counts, the secret polynomial and the entropy source,
//! and enforces the order in which they are set up.
//!
//! # States
//! - **Unconfigured**: Nothing set.
//! - **PrimeSet**: Field modulus installed.
//! - **ShareCountsSet**: Threshold and/or share count set.
//! - **SecretsInitialized**: Polynomial populated (secret + blinding coefficients).
//! - **SharesCreated**: Shares handed out for the current polynomial.
//! - **SecretsCleared**: One or all coefficients wiped.
//!
//! Prime, counts and entropy source can be changed at any time. Changing the
//! prime while coefficients exist wipes them, since they belong to the old field.
//! Changing the threshold keeps the overlapping coefficients, so the secret in
//! slot 0 survives as long as the threshold stays at least 1.
//!
//! The session is meant for single-owner, sequential use:
//! configure, generate, distribute, clear.

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use num_bigint::BigUint;
use crate::codec::secret_from_bytes;
use crate::config::SharingConfig;
use crate::core::{is_probable_prime, PrimeField};
use crate::entropy::EntropySource;
use crate::mpc::{combinations, polynomial, quorum, reconstruct};
use crate::mpc::polynomial::Polynomial;
use crate::mpc::share::{Coordinates, Share};
use crate::mpc::MpcError;

/// Default number of Miller-Rabin rounds.
const DEFAULT_PRIMALITY_ROUNDS: u32 = 40;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing configured.
    Unconfigured,
    /// Prime installed.
    PrimeSet,
    /// Threshold or share count set.
    ShareCountsSet,
    /// Polynomial populated.
    SecretsInitialized,
    /// Shares created from the current polynomial.
    SharesCreated,
    /// Coefficients wiped.
    SecretsCleared,
}

/// Stateful builder for splitting one secret.
pub struct Session {
    entropy: Option<Box<dyn EntropySource>>,
    field: Option<PrimeField>,
    share_count: usize,
    threshold: usize,
    polynomial: Polynomial,
    state: SessionState,
    primality_rounds: u32,
    strict_share_counts: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("entropy", &self.entropy.as_ref().map(|e| e.name()))
            .field("field", &self.field)
            .field("share_count", &self.share_count)
            .field("threshold", &self.threshold)
            .field("polynomial", &self.polynomial)
            .field("state", &self.state)
            .finish()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session {{ prime: ")?;
        match &self.field {
            Some(field) => write!(f, "{}-bit", field.bits())?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            ", shares: {}, required: {}, coefficients: {}/{}, state: {:?} }}",
            self.share_count,
            self.threshold,
            self.polynomial.populated(),
            self.polynomial.len(),
            self.state
        )
    }
}

impl Session {
    /// Creates an unconfigured session.
    pub fn new() -> Self {
        Self {
            entropy: None,
            field: None,
            share_count: 0,
            threshold: 0,
            polynomial: Polynomial::default(),
            state: SessionState::Unconfigured,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            strict_share_counts: false,
        }
    }

    /// Builds a session from `config`.
    ///
    /// Without an explicit `entropy` source the OS generator is used (requires `std`).
    pub fn from_config(
        config: &SharingConfig,
        entropy: Option<Box<dyn EntropySource>>,
    ) -> Result<Self, MpcError> {
        let mut session = Self::new();
        session.entropy = entropy;
        session.primality_rounds = config.primality_rounds;
        session.strict_share_counts = config.strict_share_counts;
        session.field = Some(config.prime.to_field()?);
        session.transition(SessionState::PrimeSet);
        if config.validate_prime_on_build {
            session.validate_prime()?;
        }
        session.set_threshold(config.threshold);
        session.set_share_count(config.share_count);
        Ok(session)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The field modulus, if set.
    pub fn prime(&self) -> Option<&BigUint> {
        self.field.as_ref().map(PrimeField::modulus)
    }

    /// The field context, if a prime is set.
    pub fn field(&self) -> Option<&PrimeField> {
        self.field.as_ref()
    }

    /// Number of shares produced (n).
    pub fn share_count(&self) -> usize {
        self.share_count
    }

    /// Number of shares required (t).
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The secret (free coefficient), if initialized and not cleared.
    pub fn secret(&self) -> Option<&BigUint> {
        self.polynomial.secret()
    }

    /// Installs the entropy source used for secrets and primality witnesses.
    pub fn set_entropy<S>(&mut self, source: S) -> &mut Self
    where
        S: EntropySource + 'static,
    {
        self.entropy = Some(Box::new(source));
        self
    }

    /// Sets the field modulus without testing primality.
    ///
    /// Existing coefficients are wiped.
    pub fn set_prime(&mut self, prime: BigUint) -> Result<&mut Self, MpcError> {
        let field = PrimeField::new(prime)?;
        self.install_field(field);
        Ok(self)
    }

    /// Sets the modulus to the Mersenne number `2^exponent - 1`.
    pub fn set_mersenne_exponent(&mut self, exponent: u32) -> Result<&mut Self, MpcError> {
        let field = PrimeField::mersenne(exponent)?;
        self.install_field(field);
        Ok(self)
    }

    /// Removes the modulus. Dependent operations fail until a new one is set.
    pub fn clear_prime(&mut self) -> &mut Self {
        self.wipe_if_populated();
        self.field = None;
        self.transition(SessionState::Unconfigured);
        self
    }

    /// Number of Miller-Rabin rounds used by `validate_prime`.
    pub fn set_primality_rounds(&mut self, rounds: u32) -> &mut Self {
        self.primality_rounds = rounds;
        self
    }

    /// Makes `create_shares` fail when fewer shares than the threshold are requested.
    pub fn set_strict_share_counts(&mut self, strict: bool) -> &mut Self {
        self.strict_share_counts = strict;
        self
    }

    /// Tests the installed modulus for primality.
    ///
    /// # Returns
    /// * `Err(MpcError::NullConfiguration("prime"))` if no modulus is set.
    /// * `Err(MpcError::InvalidPrime)` if it is composite.
    pub fn validate_prime(&mut self) -> Result<&mut Self, MpcError> {
        self.ensure_entropy()?;
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        let rng = self
            .entropy
            .as_deref_mut()
            .ok_or(MpcError::NullConfiguration("entropy"))?;

        if !is_probable_prime(field.modulus(), self.primality_rounds, rng)? {
            log::warn!("Rejected composite {}-bit modulus", field.bits());
            return Err(MpcError::InvalidPrime);
        }
        log::debug!("Validated {}-bit prime ({} rounds)", field.bits(), self.primality_rounds);
        Ok(self)
    }

    /// Tests `prime` and installs it only if it passes.
    pub fn validate_and_set_prime(&mut self, prime: BigUint) -> Result<&mut Self, MpcError> {
        self.ensure_entropy()?;
        let rng = self
            .entropy
            .as_deref_mut()
            .ok_or(MpcError::NullConfiguration("entropy"))?;

        if !is_probable_prime(&prime, self.primality_rounds, rng)? {
            log::warn!("Rejected composite {}-bit modulus", prime.bits());
            return Err(MpcError::InvalidPrime);
        }
        self.set_prime(prime)
    }

    /// Sets the number of shares produced (n).
    pub fn set_share_count(&mut self, share_count: usize) -> &mut Self {
        self.share_count = share_count;
        self.mark_counts_set();
        self
    }

    /// Sets the number of shares required (t).
    ///
    /// Resizes the coefficient slots, keeping the overlap. New slots are empty
    /// until `refill_blinding` or `init_secrets` populates them.
    pub fn set_threshold(&mut self, threshold: usize) -> &mut Self {
        let had_coefficients = self.polynomial.populated() > 0;
        self.threshold = threshold;
        self.polynomial.resize(threshold);

        if had_coefficients {
            if self.polynomial.secret().is_some() {
                self.transition(SessionState::SecretsInitialized);
            } else {
                self.transition(SessionState::ShareCountsSet);
            }
        } else {
            self.mark_counts_set();
        }
        self
    }

    /// Initializes the polynomial with a random secret.
    pub fn init_secrets(&mut self) -> Result<&mut Self, MpcError> {
        self.init_polynomial(None)
    }

    /// Initializes the polynomial with `secret` as the free coefficient.
    ///
    /// # Returns
    /// * `Err(MpcError::InvalidSecret)` unless `0 < secret < p`.
    pub fn init_secrets_with(&mut self, secret: &BigUint) -> Result<&mut Self, MpcError> {
        self.init_polynomial(Some(secret))
    }

    /// Initializes the polynomial with a secret given as big-endian bytes.
    pub fn init_secrets_from_bytes(&mut self, secret: &[u8]) -> Result<&mut Self, MpcError> {
        let mut value = secret_from_bytes(secret);
        let result = self.init_polynomial(Some(&value)).map(|_| ());
        polynomial::wipe(&mut value);
        result?;
        Ok(self)
    }

    /// Fills empty blinding slots (after growing the threshold) with fresh randomness.
    ///
    /// # Returns
    /// * `Ok(count)` of slots filled.
    /// * `Err(MpcError::NullConfiguration("secret"))` if slot 0 is empty.
    pub fn refill_blinding(&mut self) -> Result<usize, MpcError> {
        if self.polynomial.secret().is_none() {
            return Err(MpcError::NullConfiguration("secret"));
        }
        self.ensure_entropy()?;
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        let rng = self
            .entropy
            .as_deref_mut()
            .ok_or(MpcError::NullConfiguration("entropy"))?;

        let filled = self.polynomial.fill_blinding(rng, field)?;
        self.transition(SessionState::SecretsInitialized);
        Ok(filled)
    }

    /// Wipes the coefficient at `index` (0 is the secret).
    pub fn clear_secret(&mut self, index: usize) -> Result<&mut Self, MpcError> {
        self.polynomial.clear_slot(index)?;
        self.transition(SessionState::SecretsCleared);
        Ok(self)
    }

    /// Wipes every coefficient.
    ///
    /// Digit buffers are overwritten in place; copies made by earlier big-integer
    /// arithmetic are out of reach, so this is not a guarantee against memory residue.
    pub fn clear_secrets(&mut self) -> &mut Self {
        self.polynomial.clear();
        self.transition(SessionState::SecretsCleared);
        self
    }

    /// Evaluates the polynomial at positions `1..=n`.
    ///
    /// # Returns
    /// * `Err(MpcError::NullConfiguration)` if the prime, the secret, a coefficient
    ///   or the share count is missing.
    /// * `Err(MpcError::ShareCountMismatch)` if `n < t` in strict mode.
    pub fn create_shares(&mut self) -> Result<Vec<Share>, MpcError> {
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        if self.polynomial.secret().is_none() {
            return Err(MpcError::NullConfiguration("secret"));
        }
        if self.share_count == 0 {
            return Err(MpcError::NullConfiguration("share count"));
        }
        if self.share_count < self.threshold {
            if self.strict_share_counts {
                return Err(MpcError::ShareCountMismatch {
                    expected: self.threshold,
                    actual: self.share_count,
                });
            }
            log::warn!(
                "Creating {} shares for threshold {}: the secret will not be recoverable",
                self.share_count,
                self.threshold
            );
        }

        let shares = quorum::create_shares(field, &self.polynomial, self.share_count)?;
        self.transition(SessionState::SharesCreated);
        Ok(shares)
    }

    /// Checks that every `t`-subset of `shares` reconstructs the session secret.
    ///
    /// # Returns
    /// * `Ok(C(n, t))` on success.
    /// * `Err(MpcError::ReconstructionMismatch)` for the first failing subset.
    /// * `Err(MpcError::InvalidField)` if two shares carry the same position.
    pub fn validate_all_combinations(&self, shares: &[Share]) -> Result<u64, MpcError> {
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        let secret = self.polynomial.secret().ok_or(MpcError::NullConfiguration("secret"))?;
        combinations::validate_all_combinations(secret, field, self.threshold, shares)
    }

    /// Reconstructs a secret in this session's field.
    pub fn reconstruct(&self, coordinates: &Coordinates) -> Result<BigUint, MpcError> {
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        reconstruct::reconstruct(coordinates, field)
    }

    /// Reconstructs, requiring exactly `t` points.
    pub fn reconstruct_exact(&self, coordinates: &Coordinates) -> Result<BigUint, MpcError> {
        if coordinates.len() != self.threshold {
            return Err(MpcError::ShareCountMismatch {
                expected: self.threshold,
                actual: coordinates.len(),
            });
        }
        self.reconstruct(coordinates)
    }

    fn init_polynomial(&mut self, secret: Option<&BigUint>) -> Result<&mut Self, MpcError> {
        if self.field.is_none() {
            return Err(MpcError::NullConfiguration("prime"));
        }
        self.ensure_entropy()?;
        let field = self.field.as_ref().ok_or(MpcError::NullConfiguration("prime"))?;
        let rng = self
            .entropy
            .as_deref_mut()
            .ok_or(MpcError::NullConfiguration("entropy"))?;

        // The previous polynomial is wiped when dropped.
        self.polynomial = polynomial::init_polynomial(secret, rng, field, self.threshold)?;
        self.transition(SessionState::SecretsInitialized);
        Ok(self)
    }

    fn install_field(&mut self, field: PrimeField) {
        log::debug!("Installing {}-bit prime", field.bits());
        if self.wipe_if_populated() {
            log::warn!("Prime changed while secrets were initialized; coefficients wiped");
            self.field = Some(field);
            self.transition(SessionState::PrimeSet);
            return;
        }
        self.field = Some(field);
        if self.state == SessionState::Unconfigured {
            self.transition(SessionState::PrimeSet);
        }
    }

    /// Wipes coefficients if any are present. Returns true if something was wiped.
    fn wipe_if_populated(&mut self) -> bool {
        if self.polynomial.populated() == 0 {
            return false;
        }
        self.polynomial.clear();
        true
    }

    fn mark_counts_set(&mut self) {
        if matches!(self.state, SessionState::Unconfigured | SessionState::PrimeSet) {
            self.transition(SessionState::ShareCountsSet);
        }
    }

    #[cfg(feature = "std")]
    fn ensure_entropy(&mut self) -> Result<(), MpcError> {
        if self.entropy.is_none() {
            log::debug!("No entropy source configured, defaulting to OsRng");
            self.entropy = Some(Box::new(crate::entropy::OsEntropy::new()));
        }
        Ok(())
    }

    #[cfg(not(feature = "std"))]
    fn ensure_entropy(&mut self) -> Result<(), MpcError> {
        if self.entropy.is_none() {
            return Err(MpcError::NullConfiguration("entropy"));
        }
        Ok(())
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            log::info!("Session state transition: {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }
}


#[cfg(all(test, not(feature = "std")))]
mod no_std_tests {
    use super::*;
    use crate::mpc::testing::MockEntropy;

    #[test]
    fn test_entropy_required_without_std() {
        let mut session = Session::new();
        session.set_mersenne_exponent(61).unwrap().set_threshold(2).set_share_count(3);
        assert_eq!(
            session.init_secrets().unwrap_err(),
            MpcError::NullConfiguration("entropy")
        );
        assert_eq!(
            session.validate_prime().unwrap_err(),
            MpcError::NullConfiguration("entropy")
        );
    }

    #[test]
    fn test_injected_entropy() {
        let mut session = Session::new();
        session
            .set_entropy(MockEntropy { fill_val: 3 })
            .set_mersenne_exponent(61)
            .unwrap()
            .set_threshold(3)
            .set_share_count(4)
            .init_secrets()
            .unwrap();
        let shares = session.create_shares().unwrap();
        assert_eq!(session.validate_all_combinations(&shares).unwrap(), 4);

        let coords = Coordinates::from_shares(&shares[1..]).unwrap();
        assert_eq!(&session.reconstruct(&coords).unwrap(), session.secret().unwrap());
    }
}
