//! Edit script types and flat-buffer serialization
//!
//! An [`EditScript`] is the ordered list of Keep/Remove/Insert operations that
//! transforms the old sequence into the new one. Callers across the C
//! boundary never see it directly: it is serialized into two index buffers,
//! one per sequence, padded with [`SENTINEL`].

use rustc_hash::FxHashSet;

/// Fill value for unused trailing slots of an output buffer.
pub const SENTINEL: i64 = -1;

// =============================================================================
// Public Types
// =============================================================================

/// Kind of an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Keep,
    Remove,
    Insert,
}

/// Edit operation in a diff sequence (indices are 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Old item at old_idx is the same as new item at new_idx
    Keep { old_idx: usize, new_idx: usize },
    /// Remove old item at old_idx
    Remove { old_idx: usize },
    /// Insert new item at new_idx
    Insert { new_idx: usize },
}

impl EditOp {
    pub fn kind(&self) -> EditKind {
        match self {
            EditOp::Keep { .. } => EditKind::Keep,
            EditOp::Remove { .. } => EditKind::Remove,
            EditOp::Insert { .. } => EditKind::Insert,
        }
    }

    /// Index into the old sequence, if this operation touches one
    pub fn old_idx(&self) -> Option<usize> {
        match *self {
            EditOp::Keep { old_idx, .. } | EditOp::Remove { old_idx } => Some(old_idx),
            EditOp::Insert { .. } => None,
        }
    }

    /// Index into the new sequence, if this operation touches one
    pub fn new_idx(&self) -> Option<usize> {
        match *self {
            EditOp::Keep { new_idx, .. } | EditOp::Insert { new_idx } => Some(new_idx),
            EditOp::Remove { .. } => None,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, EditOp::Keep { .. })
    }
}

/// Statistics from an edit script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub kept: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl DiffStats {
    /// Number of removals plus insertions
    pub fn edit_count(&self) -> usize {
        self.removed + self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// EditScript
// =============================================================================

/// Shortest edit script from the old sequence to the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    pub(crate) fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    /// Operations in script order
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }

    /// Old indices of removed items, in script order
    pub fn removed(&self) -> impl Iterator<Item = usize> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            EditOp::Remove { old_idx } => Some(old_idx),
            _ => None,
        })
    }

    /// New indices of inserted items, in script order
    pub fn added(&self) -> impl Iterator<Item = usize> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            EditOp::Insert { new_idx } => Some(new_idx),
            _ => None,
        })
    }

    /// Edit distance: number of removals plus insertions
    pub fn distance(&self) -> usize {
        self.ops.iter().filter(|op| !op.is_keep()).count()
    }

    pub fn stats(&self) -> DiffStats {
        self.ops.iter().fold(DiffStats::default(), |mut stats, op| {
            match op.kind() {
                EditKind::Keep => stats.kept += 1,
                EditKind::Remove => stats.removed += 1,
                EditKind::Insert => stats.inserted += 1,
            }
            stats
        })
    }

    /// True when old and new are identical
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(EditOp::is_keep)
    }

    /// Serialize into the two flat output buffers.
    ///
    /// Removed old indices go to `removed_out` and added new indices go to
    /// `added_out`, both in script order. Remaining slots are filled with
    /// [`SENTINEL`]. Nothing is written past either buffer's length.
    pub fn write_into(&self, removed_out: &mut [i64], added_out: &mut [i64]) {
        let written = write_padded(removed_out, self.removed());
        debug_assert_eq!(written, self.removed().count(), "removed buffer too short");

        let written = write_padded(added_out, self.added());
        debug_assert_eq!(written, self.added().count(), "added buffer too short");
    }

    /// Rebuild the new sequence from the old one by replaying the script.
    ///
    /// `old` and `new` must be the sequences the script was computed from.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Vec<T> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                EditOp::Keep { old_idx, .. } => Some(old[old_idx].clone()),
                EditOp::Insert { new_idx } => Some(new[new_idx].clone()),
                EditOp::Remove { .. } => None,
            })
            .collect()
    }
}

fn write_padded(out: &mut [i64], indices: impl Iterator<Item = usize>) -> usize {
    let mut written = 0;
    for (slot, idx) in out.iter_mut().zip(indices) {
        *slot = idx as i64;
        written += 1;
    }
    fill_sentinel(&mut out[written..]);
    written
}

/// Fill a whole buffer with [`SENTINEL`].
pub fn fill_sentinel(out: &mut [i64]) {
    out.fill(SENTINEL);
}

/// Rebuild the new sequence from flat index buffers.
///
/// Items of `old` whose index appears in `removed` are dropped, and items of
/// `new` whose index appears in `added` are spliced in at that position.
/// [`SENTINEL`] entries are ignored. This is the consumer-side view of a diff
/// produced by [`EditScript::write_into`].
pub fn apply_indices<T: Clone>(old: &[T], new: &[T], removed: &[i64], added: &[i64]) -> Vec<T> {
    let removed: FxHashSet<usize> = live_indices(removed).collect();
    let added: FxHashSet<usize> = live_indices(added).collect();

    let mut kept = old
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, item)| item);

    (0..new.len())
        .filter_map(|j| {
            if added.contains(&j) {
                Some(new[j].clone())
            } else {
                kept.next().cloned()
            }
        })
        .collect()
}

fn live_indices(buf: &[i64]) -> impl Iterator<Item = usize> + '_ {
    buf.iter()
        .take_while(|&&i| i != SENTINEL)
        .filter_map(|&i| usize::try_from(i).ok())
}

// =============================================================================
// Tests
// =============================================================================
