//! Myers Diff Algorithm over content-hash sequences
//!
//! Explores the edit graph by edit distance `d`, keeping for each diagonal
//! `k = x - y` the furthest-reaching point and the path that got there.
//!
//! # Paths
//!
//! Every candidate path is a parent-pointer chain in a [`PathArena`]. When two
//! diagonals branch from the same neighbor they share its prefix instead of
//! copying it, and the winning path is materialized once at termination.
//! Emitted operation order is the same as copying the path on every branch.
//!
//! # Tie-break
//!
//! The insertion move is taken when `k == -d`, or when `k != d` and the
//! `k - 1` neighbor is strictly behind the `k + 1` neighbor. The comparison is
//! strict `<`; using `<=` selects a different (equally short) script.
//!
//! # Complexity
//!
//! - Time: O((n+m)*d)
//! - Space: O(n+m) for the frontier, plus one arena node per recorded step
//!
//! # References
//!
//! - Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)

use crate::error::{DiffError, DiffResult};
use crate::hash::ContentHash;

use super::script::{fill_sentinel, EditOp, EditScript};

// =============================================================================
// Main API
// =============================================================================

/// Compute the shortest edit script from `old` to `new`.
///
/// Items are compared with `==` only. For [`ContentHash`] sequences that is a
/// bit-exact digest comparison.
pub fn shortest_edit_script<T: PartialEq>(old: &[T], new: &[T]) -> DiffResult<EditScript> {
    myers_core(old, new)
}

/// Diff two hash sequences into caller-provided index buffers.
///
/// `removed_out` must have length `old.len()` and `added_out` length
/// `new.len()`. On success both are fully written: removed old indices and
/// added new indices in script order, then `-1` padding.
///
/// If the search fails to terminate (an internal bug), both buffers are
/// filled with `-1` and the error is returned.
pub fn diff_into(
    old: &[ContentHash],
    new: &[ContentHash],
    removed_out: &mut [i64],
    added_out: &mut [i64],
) -> DiffResult<()> {
    if removed_out.len() != old.len() {
        return Err(DiffError::buffer_length("removed", old.len(), removed_out.len()));
    }
    if added_out.len() != new.len() {
        return Err(DiffError::buffer_length("added", new.len(), added_out.len()));
    }

    write_or_fallback(shortest_edit_script(old, new), removed_out, added_out)
}

/// Like [`diff_into`], allocating the two buffers.
pub fn diff_indices(old: &[ContentHash], new: &[ContentHash]) -> DiffResult<(Vec<i64>, Vec<i64>)> {
    let mut removed = vec![0; old.len()];
    let mut added = vec![0; new.len()];
    diff_into(old, new, &mut removed, &mut added)?;
    Ok((removed, added))
}

/// Serialize a search result, or fill both buffers with the sentinel.
pub(crate) fn write_or_fallback(
    result: DiffResult<EditScript>,
    removed_out: &mut [i64],
    added_out: &mut [i64],
) -> DiffResult<()> {
    match result {
        Ok(script) => {
            script.write_into(removed_out, added_out);
            Ok(())
        }
        Err(err) => {
            fill_sentinel(removed_out);
            fill_sentinel(added_out);
            Err(err)
        }
    }
}

// =============================================================================
// Path Arena
// =============================================================================

type PathId = usize;

#[derive(Debug, Clone, Copy)]
struct PathNode {
    op: EditOp,
    parent: Option<PathId>,
}

/// Append-only store of path nodes; a path is identified by its tail.
#[derive(Debug, Default)]
struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity) }
    }

    /// Extend the path ending at `parent` by one operation.
    fn push(&mut self, parent: Option<PathId>, op: EditOp) -> Option<PathId> {
        self.nodes.push(PathNode { op, parent });
        Some(self.nodes.len() - 1)
    }

    /// Materialize the path ending at `tail`, origin first.
    fn collect(&self, tail: Option<PathId>) -> Vec<EditOp> {
        let mut ops = Vec::new();
        let mut cursor = tail;
        while let Some(id) = cursor {
            let node = self.nodes[id];
            ops.push(node.op);
            cursor = node.parent;
        }
        ops.reverse();
        ops
    }
}

// =============================================================================
// Myers Algorithm Core
// =============================================================================

/// Furthest-reaching point on one diagonal
#[derive(Debug, Clone, Copy, Default)]
struct Frontier {
    x: usize,
    tail: Option<PathId>,
}

fn myers_core<T: PartialEq>(old: &[T], new: &[T]) -> DiffResult<EditScript> {
    let n = old.len();
    let m = new.len();
    let max_d = n + m;

    // k ranges over [-max_d, max_d] and reads k + 1, so one extra slot per side
    let offset = max_d + 1;
    let mut frontier = vec![Frontier::default(); 2 * offset + 1];
    // Seed: diagonal 1 at x = 0 with an empty path, which is the default entry

    let mut arena = PathArena::with_capacity(n + m);

    for d in 0..=max_d {
        let d = d as isize;
        tracing::trace!(d, "expanding frontier");

        for k in (-d..=d).step_by(2) {
            let kk = (k + offset as isize) as usize;

            // Insertion keeps x and moves down from k + 1,
            // removal advances x from k - 1
            let insertion = k == -d || (k != d && frontier[kk - 1].x < frontier[kk + 1].x);

            let (mut x, mut tail) = if insertion {
                let prev = frontier[kk + 1];
                (prev.x, prev.tail)
            } else {
                let prev = frontier[kk - 1];
                (prev.x + 1, prev.tail)
            };

            let mut y = x as isize - k;

            // Positions are 1-indexed here; recorded indices are 0-based
            if insertion && 1 <= y && y <= m as isize {
                tail = arena.push(tail, EditOp::Insert { new_idx: (y - 1) as usize });
            } else if 1 <= x && x <= n {
                tail = arena.push(tail, EditOp::Remove { old_idx: x - 1 });
            }

            // Snake: follow the diagonal while items match
            while x < n && y < m as isize && old[x] == new[y as usize] {
                x += 1;
                y += 1;
                tail = arena.push(
                    tail,
                    EditOp::Keep { old_idx: x - 1, new_idx: (y - 1) as usize },
                );
            }

            if x >= n && y >= m as isize {
                let script = EditScript::new(arena.collect(tail));
                tracing::debug!(
                    old_len = n,
                    new_len = m,
                    distance = d,
                    path_nodes = arena.nodes.len(),
                    "edit script found"
                );
                return Ok(script);
            }

            frontier[kk] = Frontier { x, tail };
        }
    }

    // Unreachable for finite inputs: the distance is at most n + m
    tracing::error!(old_len = n, new_len = m, "edit search exhausted without reaching the end");
    debug_assert!(false, "edit search exhausted without reaching the end");
    Err(DiffError::Unterminated { old_len: n, new_len: m })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::script::{apply_indices, EditKind, SENTINEL};

    fn h(n: u64) -> ContentHash {
        ContentHash::from_words([n, 0, 0, 0])
    }

    fn hashes(nums: &[u64]) -> Vec<ContentHash> {
        nums.iter().map(|&n| h(n)).collect()
    }

    fn lines(text: &[&str]) -> Vec<ContentHash> {
        text.iter()
            .map(|line| ContentHash::from_bytes(*blake3::hash(line.as_bytes()).as_bytes()))
            .collect()
    }

    /// Independent edit distance: n + m - 2 * LCS
    fn lcs_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
        let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                dp[i][j] = if a[i - 1] == b[j - 1] {
                    dp[i - 1][j - 1] + 1
                } else {
                    dp[i - 1][j].max(dp[i][j - 1])
                };
            }
        }
        a.len() + b.len() - 2 * dp[a.len()][b.len()]
    }

    #[test]
    fn test_empty_sequences() {
        let script = shortest_edit_script::<ContentHash>(&[], &[]).unwrap();
        assert!(script.ops().is_empty());
        assert_eq!(diff_indices(&[], &[]).unwrap(), (vec![], vec![]));
    }

    #[test]
    fn test_identity() {
        let a = hashes(&[1, 2, 3, 2, 1]);
        let (removed, added) = diff_indices(&a, &a).unwrap();
        assert!(removed.iter().all(|&i| i == SENTINEL));
        assert!(added.iter().all(|&i| i == SENTINEL));

        let script = shortest_edit_script(&a, &a).unwrap();
        assert!(script.is_identity());
        assert_eq!(script.stats().kept, 5);
    }

    #[test]
    fn test_full_removal() {
        let a = hashes(&[5, 6, 7, 8]);
        let (removed, added) = diff_indices(&a, &[]).unwrap();
        assert_eq!(removed, vec![0, 1, 2, 3]);
        assert!(added.is_empty());
    }

    #[test]
    fn test_full_insertion() {
        let b = hashes(&[1, 2]);
        let (removed, added) = diff_indices(&[], &b).unwrap();
        assert!(removed.is_empty());
        assert_eq!(added, vec![0, 1]);
    }

    #[test]
    fn test_remove_and_add_one() {
        let a = hashes(&[1, 2, 3]);
        let b = hashes(&[1, 3, 4]);
        let (removed, added) = diff_indices(&a, &b).unwrap();
        assert_eq!(removed, vec![1, -1, -1]);
        assert_eq!(added, vec![2, -1, -1]);
    }

    #[test]
    fn test_swap_tie_break() {
        // Both [remove a, insert a] and [insert b, remove b] cost 2;
        // the strict `<` picks removal first.
        let a = hashes(&[1, 2]);
        let b = hashes(&[2, 1]);
        let script = shortest_edit_script(&a, &b).unwrap();
        assert_eq!(
            script.ops(),
            &[
                EditOp::Remove { old_idx: 0 },
                EditOp::Keep { old_idx: 1, new_idx: 0 },
                EditOp::Insert { new_idx: 1 },
            ]
        );
        assert_eq!(diff_indices(&a, &b).unwrap(), (vec![0, -1], vec![1, -1]));
    }

    #[test]
    fn test_replace_all() {
        let a = hashes(&[1, 2]);
        let b = hashes(&[3, 4, 5]);
        let script = shortest_edit_script(&a, &b).unwrap();
        assert_eq!(script.distance(), 5);
        assert_eq!(script.removed().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(script.added().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_script_is_ordered_walk() {
        let a = hashes(&[1, 2, 3, 4, 5, 6]);
        let b = hashes(&[1, 1, 3, 4, 6]);
        let script = shortest_edit_script(&a, &b).unwrap();

        let mut next_old = 0;
        let mut next_new = 0;
        for op in script.ops() {
            if let Some(i) = op.old_idx() {
                assert_eq!(i, next_old);
                next_old += 1;
            }
            if let Some(j) = op.new_idx() {
                assert_eq!(j, next_new);
                next_new += 1;
            }
            if op.kind() == EditKind::Keep {
                let (i, j) = (op.old_idx().unwrap(), op.new_idx().unwrap());
                assert_eq!(a[i], b[j]);
            }
        }
        assert_eq!((next_old, next_new), (a.len(), b.len()));
    }

    #[test]
    fn test_source_lines() {
        let old = ["fn main() {", "    let x = 1;", "    println!(\"{x}\");", "}"];
        let new = ["fn main() {", "    let x = 2;", "    println!(\"{x}\");", "    drop(x);", "}"];
        let (removed, added) = diff_indices(&lines(&old), &lines(&new)).unwrap();
        assert_eq!(removed, vec![1, -1, -1, -1]);
        assert_eq!(added, vec![1, 3, -1, -1, -1]);
        assert_eq!(apply_indices(&old, &new, &removed, &added), new.to_vec());
    }

    #[test]
    fn test_chars_example() {
        let to_hashes = |s: &str| -> Vec<ContentHash> {
            s.chars()
                .map(|c| ContentHash::from_bytes(*blake3::hash(c.to_string().as_bytes()).as_bytes()))
                .collect()
        };
        let (a, b) = ("abcdef", "aacdf");
        let (removed, added) = diff_indices(&to_hashes(a), &to_hashes(b)).unwrap();
        let live = |v: &[i64]| v.iter().filter(|&&i| i != SENTINEL).count();
        assert_eq!(live(&removed) + live(&added), 3);

        let old: Vec<char> = a.chars().collect();
        let new: Vec<char> = b.chars().collect();
        assert_eq!(apply_indices(&old, &new, &removed, &added), new);
    }

    #[test]
    fn test_buffer_length_mismatch() {
        let a = hashes(&[1, 2]);
        let b = hashes(&[1]);
        let mut removed = [0; 1];
        let mut added = [0; 1];
        assert_eq!(
            diff_into(&a, &b, &mut removed, &mut added),
            Err(DiffError::buffer_length("removed", 2, 1))
        );

        let mut removed = [0; 2];
        let mut added = [0; 3];
        assert_eq!(
            diff_into(&a, &b, &mut removed, &mut added),
            Err(DiffError::buffer_length("added", 1, 3))
        );
    }

    #[test]
    fn test_fallback_fills_sentinel() {
        let mut removed = [7; 2];
        let mut added = [7; 3];
        let err = DiffError::Unterminated { old_len: 2, new_len: 3 };
        assert_eq!(write_or_fallback(Err(err.clone()), &mut removed, &mut added), Err(err));
        assert_eq!(removed, [-1; 2]);
        assert_eq!(added, [-1; 3]);
    }

    #[test]
    fn test_deterministic() {
        let a = hashes(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        let b = hashes(&[2, 7, 1, 8, 2, 8, 1, 8, 2, 8]);
        let first = diff_indices(&a, &b).unwrap();
        for _ in 0..5 {
            assert_eq!(diff_indices(&a, &b).unwrap(), first);
        }
    }

    #[test]
    fn test_long_common_run() {
        let mut a: Vec<u64> = (0..500).collect();
        let mut b = a.clone();
        a.insert(250, 10_000);
        b.push(20_000);
        let (a, b) = (hashes(&a), hashes(&b));

        let script = shortest_edit_script(&a, &b).unwrap();
        assert_eq!(script.removed().collect::<Vec<_>>(), vec![250]);
        assert_eq!(script.added().collect::<Vec<_>>(), vec![500]);
    }

    /// Every pair of sequences up to length 4 over {0, 1, 2}: the script is
    /// minimal and replays `old` into `new`, both as ops and as flat buffers.
    #[test]
    fn test_exhaustive_small_alphabet() {
        fn all_sequences(max_len: usize) -> Vec<Vec<u64>> {
            let mut out = vec![vec![]];
            let mut frontier = vec![vec![]];
            for _ in 0..max_len {
                let mut next = Vec::new();
                for seq in &frontier {
                    for sym in 0..3 {
                        let mut s: Vec<u64> = seq.clone();
                        s.push(sym);
                        next.push(s);
                    }
                }
                out.extend(next.iter().cloned());
                frontier = next;
            }
            out
        }

        let seqs = all_sequences(4);
        for old in &seqs {
            for new in &seqs {
                let (a, b) = (hashes(old), hashes(new));
                let script = shortest_edit_script(&a, &b).unwrap();
                assert_eq!(script.distance(), lcs_distance(old, new), "{old:?} -> {new:?}");
                assert_eq!(&script.apply(old, new), new, "{old:?} -> {new:?}");

                let (removed, added) = diff_indices(&a, &b).unwrap();
                assert_eq!(&apply_indices(old, new, &removed, &added), new, "{old:?} -> {new:?}");
            }
        }
    }
}
