//! Conversions between secret payloads and field integers.
//!
//! Secrets are big-endian unsigned integers. No length or padding metadata is
//! kept, so leading zero bytes of a payload do not survive a round trip; callers
//! that need them must encode the length themselves.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;
use num_bigint::BigUint;
use crate::mpc::MpcError;

/// Interprets `bytes` as a big-endian unsigned integer.
pub fn secret_from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian encoding of `secret` (`[0]` for zero).
pub fn secret_to_bytes(secret: &BigUint) -> Vec<u8> {
    secret.to_bytes_be()
}

/// Parses a hex string (upper or lower case, even length) into a secret.
pub fn secret_from_hex(encoded: &str) -> Result<BigUint, MpcError> {
    let bytes = zeroize::Zeroizing::new(hex::decode(encoded).map_err(|_| MpcError::InvalidSecret)?);
    Ok(secret_from_bytes(&bytes))
}

/// Lowercase hex encoding of the minimal big-endian bytes.
pub fn secret_to_hex(secret: &BigUint) -> String {
    let bytes = zeroize::Zeroizing::new(secret_to_bytes(secret));
    hex::encode(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes() {
        let secret = secret_from_bytes(b"Shamir's Secret");
        assert_eq!(secret_to_bytes(&secret), b"Shamir's Secret".to_vec());
        assert_eq!(secret_from_bytes(&[0x01, 0x00]), BigUint::from(256u32));
        // Leading zeros are not preserved.
        assert_eq!(secret_to_bytes(&secret_from_bytes(&[0x00, 0x07])), alloc::vec![0x07]);
    }

    #[test]
    fn test_hex() {
        assert_eq!(secret_from_hex("0100").unwrap(), BigUint::from(256u32));
        assert_eq!(secret_from_hex("FFff").unwrap(), BigUint::from(0xFFFFu32));
        assert_eq!(secret_to_hex(&BigUint::from(0xBEEFu32)), "beef");
        assert_eq!(secret_from_hex("abc"), Err(MpcError::InvalidSecret));
        assert_eq!(secret_from_hex("zz"), Err(MpcError::InvalidSecret));
    }
}
