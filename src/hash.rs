//! Content hash value type
//!
//! A `ContentHash` is the identity of one sequence item: a 256-bit digest
//! produced outside this crate. The diff engine only ever asks whether two
//! hashes are equal.
//!
//! # Memory Layout
//!
//! - 32 bytes, four `u64` words, `#[repr(C)]`
//! - Matches a C caller passing `count * 32` raw digest bytes
//! - Copy, no heap allocation

use std::fmt;

// =============================================================================
// ContentHash
// =============================================================================

/// Opaque 256-bit content digest with value equality.
///
/// Two hashes are equal iff all four words are equal. There is deliberately
/// no ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
#[must_use]
pub struct ContentHash([u64; 4]);

impl ContentHash {
    /// Size of a digest in bytes.
    pub const LEN: usize = 32;

    /// Create a hash from its four words.
    #[inline]
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self(words)
    }

    /// Create a hash from 32 digest bytes.
    ///
    /// Words are read in native byte order, so the result has the same
    /// in-memory representation as the input bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_ne_bytes(buf);
        }
        Self(words)
    }

    /// Get the four words
    #[inline]
    pub const fn as_words(&self) -> &[u64; 4] {
        &self.0
    }

    /// Get the digest bytes (inverse of [`ContentHash::from_bytes`]).
    pub fn to_bytes(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_ne_bytes());
        }
        bytes
    }
}

impl From<[u8; 32]> for ContentHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<[u64; 4]> for ContentHash {
    fn from(words: [u64; 4]) -> Self {
        Self::from_words(words)
    }
}

#[cfg(feature = "blake3")]
impl From<blake3::Hash> for ContentHash {
    fn from(hash: blake3::Hash) -> Self {
        Self::from_bytes(*hash.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self)
    }
}

// =============================================================================
// Tests
// =============================================================================
