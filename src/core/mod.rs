//! Field primitives shared by every sharing operation.

pub mod gfp;
pub mod primality;

pub use gfp::{FieldError, PrimeField};
pub use primality::is_probable_prime;
