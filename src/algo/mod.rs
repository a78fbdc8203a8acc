//! Diff algorithm over content-hash sequences.
//!
//! - `myers`: frontier search, snake extension and the main entry points
//! - `script`: edit script types and flat-buffer serialization

mod myers;
mod script;

pub use myers::{diff_indices, diff_into, shortest_edit_script};
#[cfg_attr(not(feature = "ffi"), allow(unused_imports))]
pub(crate) use myers::write_or_fallback;
pub use script::{apply_indices, fill_sentinel, DiffStats, EditKind, EditOp, EditScript, SENTINEL};
