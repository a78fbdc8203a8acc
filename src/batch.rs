//! Batch diffing of independent sequence pairs.
//!
//! Each pair is diffed on its own; results come back in input order. With the
//! `parallel` feature the pairs are spread over rayon's global pool.

use crate::algo::{shortest_edit_script, EditScript};
use crate::error::DiffResult;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Diff every `(old, new)` pair.
pub fn diff_many<T: PartialEq + Sync>(pairs: &[(&[T], &[T])]) -> Vec<DiffResult<EditScript>> {
    #[cfg(feature = "parallel")]
    let iter = pairs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = pairs.iter();

    let results: Vec<_> = iter.map(|&(old, new)| shortest_edit_script(old, new)).collect();
    tracing::debug!(pairs = pairs.len(), "batch diff complete");
    results
}
