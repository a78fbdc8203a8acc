//! Prelude module for common imports.
//!
//! ```ignore
//! use hashdiff::prelude::*;
//! ```

// Hash
pub use crate::hash::ContentHash;

// Algorithms
pub use crate::algo::{
    apply_indices, diff_indices, diff_into, shortest_edit_script, DiffStats, EditKind, EditOp,
    EditScript, SENTINEL,
};

// Batch
pub use crate::batch::diff_many;

// Error
pub use crate::error::{DiffError, DiffResult};
