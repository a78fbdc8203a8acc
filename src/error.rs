//! Error types for hashdiff.
//!
//! The C export has no error channel; these errors only surface through the
//! safe Rust API.

use thiserror::Error;

/// Errors that can occur while computing or serializing a diff.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// An output buffer does not match the length of its sequence
    #[error("{buffer} buffer has length {found}, expected {expected}")]
    BufferLength {
        /// Which buffer (`"removed"` or `"added"`)
        buffer: &'static str,
        /// Length of the matching input sequence
        expected: usize,
        /// Length of the buffer that was passed
        found: usize,
    },

    /// The search exhausted every edit distance without reaching the end.
    ///
    /// The maximum edit distance is `old_len + new_len`, so this indicates a
    /// bug in the engine rather than bad input.
    #[error("edit search did not terminate within distance {} (old: {old_len}, new: {new_len})", max_distance(.old_len, .new_len))]
    Unterminated {
        /// Length of the old sequence
        old_len: usize,
        /// Length of the new sequence
        new_len: usize,
    },
}

fn max_distance(old_len: &usize, new_len: &usize) -> usize {
    old_len + new_len
}

/// Result type alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create a buffer length error.
    pub fn buffer_length(buffer: &'static str, expected: usize, found: usize) -> Self {
        Self::BufferLength { buffer, expected, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiffError::buffer_length("removed", 3, 2);
        assert_eq!(err.to_string(), "removed buffer has length 2, expected 3");

        let err = DiffError::Unterminated { old_len: 2, new_len: 5 };
        assert_eq!(
            err.to_string(),
            "edit search did not terminate within distance 7 (old: 2, new: 5)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffError>();
    }
}
