//! # shamir-gfp
//!
//! Shamir (t, n)-threshold secret sharing over a large prime field GF(p).
//!
//! A secret is split into `n` shares such that any `t` of them reconstruct it
//! exactly, while fewer than `t` reveal nothing about it.
//!
//! ```
//! use shamir_gfp::mpc::{Coordinates, Session};
//! use shamir_gfp::codec::secret_to_bytes;
//!
//! let mut session = Session::new();
//! session
//!     .set_threshold(3)
//!     .set_share_count(5)
//!     .set_mersenne_exponent(521)?
//!     .init_secrets_from_bytes(b"Shamir's Secret")?;
//!
//! let shares = session.create_shares()?;
//! assert_eq!(session.validate_all_combinations(&shares)?, 10);
//!
//! let coords = Coordinates::from_shares([&shares[0], &shares[2], &shares[4]])?;
//! let secret = session.reconstruct(&coords)?;
//! assert_eq!(secret_to_bytes(&secret), b"Shamir's Secret");
//! session.clear_secrets();
//! # Ok::<(), shamir_gfp::mpc::MpcError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod core;
pub mod entropy;
pub mod mpc;
pub mod codec;
pub mod config;
