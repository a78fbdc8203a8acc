//! hashdiff - Shortest edit scripts over content-hash sequences
//!
//! ## Core Concepts
//!
//! Items are identified by a 256-bit [`ContentHash`] computed by the caller,
//! so item equality is a bit-exact comparison. Myers' algorithm finds the
//! shortest script of Keep/Remove/Insert operations turning the old sequence
//! into the new one.
//!
//! ## Modules
//! - `hash`: `ContentHash` value type
//! - `algo`: Myers search, edit scripts, flat index buffers
//! - `batch`: many independent diffs at once
//! - `ffi`: the C ABI `diff` export
//! - `error`: error types for the safe API
//!
//! ## Usage
//!
//! ```
//! use hashdiff::{diff_indices, ContentHash};
//!
//! let h = |n: u64| ContentHash::from_words([n, 0, 0, 0]);
//! let old = [h(1), h(2), h(3)];
//! let new = [h(1), h(3), h(4)];
//!
//! let (removed, added) = diff_indices(&old, &new).unwrap();
//! assert_eq!(removed, [1, -1, -1]);
//! assert_eq!(added, [2, -1, -1]);
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Content hash value type
pub mod hash;

/// Algorithms: myers, edit script
pub mod algo;

/// Batch diffing
pub mod batch;

/// C ABI export
#[cfg(feature = "ffi")]
pub mod ffi;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Hash
pub use hash::ContentHash;

// Algorithms
pub use algo::{
    apply_indices, diff_indices, diff_into, shortest_edit_script, DiffStats, EditKind, EditOp,
    EditScript, SENTINEL,
};

// Batch
pub use batch::diff_many;

// Error types
pub use error::{DiffError, DiffResult};
