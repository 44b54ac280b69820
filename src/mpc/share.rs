//! Secret Share Definition.
//!
//! A share is a point $(x, y)$ on the polynomial used to hide the secret.
//! - $x$ (position): A non-zero integer unique to each share; position 0 is the secret.
//! - $y$ (value): The evaluation of the polynomial at $x$, in `[0, p)`.
//!
//! # Security
//! - Values are wiped on drop (see `polynomial::wipe`).
//! - `Debug` implementations redact the actual values.

extern crate alloc;
use alloc::collections::btree_map::Entry;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use num_bigint::BigUint;
use super::polynomial::wipe;
use super::MpcError;

/// Public x-coordinate of a share.
pub type Position = u32;

/// A share of a secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    /// The x-coordinate (1..=n).
    /// Public information (who owns the share).
    pub position: Position,

    /// The y-coordinate, a field element.
    /// Highly sensitive information.
    pub value: BigUint,
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("position", &self.position)
            .field("bits", &self.value.bits())
            .field("value", &"***SENSITIVE***")
            .finish()
    }
}

impl Drop for Share {
    fn drop(&mut self) {
        wipe(&mut self.value);
    }
}

impl Share {
    /// Creates a new share with validation.
    ///
    /// # Returns
    /// * `Ok(Share)` if `position` is non-zero.
    /// * `Err(MpcError::InvalidPosition)` otherwise.
    pub fn new(position: Position, value: BigUint) -> Result<Self, MpcError> {
        if position == 0 {
            return Err(MpcError::InvalidPosition);
        }
        Ok(Self { position, value })
    }

    /// Returns the share position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns a reference to the share value.
    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

/// A reconstruction input: position to value, unique positions.
///
/// Iteration order is by position, but reconstruction does not depend on it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    points: BTreeMap<Position, BigUint>,
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinates")
            .field("positions", &self.positions())
            .field("values", &"***SENSITIVE***")
            .finish()
    }
}

impl Drop for Coordinates {
    fn drop(&mut self) {
        for value in self.points.values_mut() {
            wipe(value);
        }
    }
}

impl Coordinates {
    /// Creates an empty coordinate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a coordinate set from shares.
    ///
    /// Two shares at the same position mean the set is corrupted and yield
    /// `MpcError::InvalidField`.
    pub fn from_shares<'a, I>(shares: I) -> Result<Self, MpcError>
    where
        I: IntoIterator<Item = &'a Share>,
    {
        let mut coordinates = Self::new();
        for share in shares {
            coordinates.insert(share.position, share.value.clone())?;
        }
        Ok(coordinates)
    }

    /// Inserts a point.
    ///
    /// # Returns
    /// * `Err(MpcError::InvalidPosition)` for position 0.
    /// * `Err(MpcError::InvalidField)` if `position` is already present.
    pub fn insert(&mut self, position: Position, value: BigUint) -> Result<(), MpcError> {
        if position == 0 {
            return Err(MpcError::InvalidPosition);
        }
        match self.points.entry(position) {
            Entry::Occupied(_) => {
                let mut value = value;
                wipe(&mut value);
                Err(MpcError::InvalidField)
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Returns the value stored at `position`.
    pub fn get(&self, position: Position) -> Option<&BigUint> {
        self.points.get(&position)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are present.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions present in the set, ascending.
    pub fn positions(&self) -> Vec<Position> {
        self.points.keys().copied().collect()
    }

    /// Iterates over `(position, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &BigUint)> {
        self.points.iter().map(|(&x, y)| (x, y))
    }

    /// Removes all points, wiping their values.
    pub fn clear(&mut self) {
        for value in self.points.values_mut() {
            wipe(value);
        }
        self.points.clear();
    }
}
