//! Custom User-Provided Entropy Source.
//!
//! Allows injecting entropy bytes from outside (hardware tokens, dice rolls,
//! recorded test vectors).

extern crate alloc;
use alloc::vec::Vec;
use zeroize::Zeroize;
use super::{EntropyError, EntropySource};

/// Source that buffers user-injected entropy.
///
/// Bytes are handed out in insertion order and consumed; the buffer is wiped on drop.
pub struct CustomSource {
    buffer: Vec<u8>,
}

impl CustomSource {
    /// Creates a new empty CustomSource.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Add entropy bytes to the pool.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Number of bytes still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for CustomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CustomSource {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

impl EntropySource for CustomSource {
    fn name(&self) -> &'static str {
        "CustomInput"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if self.buffer.len() < dest.len() {
            return Err(EntropyError::Exhausted);
        }

        dest.copy_from_slice(&self.buffer[..dest.len()]);
        self.buffer[..dest.len()].zeroize();
        self.buffer.drain(..dest.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_source() {
        let mut source = CustomSource::new();
        source.add_bytes(&[0x01, 0x02, 0x03, 0x04]);

        let mut buf = [0u8; 2];
        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x01, 0x02]);
        assert_eq!(source.remaining(), 2);

        assert!(source.fill(&mut buf).is_ok());
        assert_eq!(buf, [0x03, 0x04]);

        assert_eq!(source.fill(&mut buf), Err(EntropyError::Exhausted));
    }
}
