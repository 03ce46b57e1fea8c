//! Myers' O((N+M)·D) shortest edit script
//!
//! The common prefix and suffix are trimmed first, then the greedy forward
//! search records one compact frontier per edit cost so the path can be
//! backtracked. The result is normalized: pure insertions and deletions are
//! slid toward the end of the sequence while the slid-over line is equal,
//! which reproduces git's placement of ambiguous hunks.

use crate::artifacts::diff::edit::{Edit, EditList, EditType, push_merged};
use derive_new::new;

/// Bounds beyond which the search gives up and reports one REPLACE edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct DiffLimits {
    /// Maximum combined length of the differing middle regions
    pub max_units: usize,
    /// Maximum edit distance explored before falling back
    pub max_edit_cost: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_units: 1_000_000,
            max_edit_cost: 4096,
        }
    }
}

pub trait DiffAlgorithm {
    type Trace;

    /// Run the forward search; `None` when the limits were exceeded
    fn compute_shortest_edit(&self) -> Option<Self::Trace>;

    fn backtrack(&self, trace: &Self::Trace) -> EditList;

    fn diff(&self) -> EditList;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
    limits: DiffLimits,
}

impl<'d, T: Eq> MyersDiff<'d, T> {
    pub fn new(a: &'d [T], b: &'d [T]) -> Self {
        Self::with_limits(a, b, DiffLimits::default())
    }

    pub fn with_limits(a: &'d [T], b: &'d [T], limits: DiffLimits) -> Self {
        Self { a, b, limits }
    }

    /// The same search restricted to `a[begin..end_a]` and `b[begin..end_b]`
    fn middle(&self, begin: usize, end_a: usize, end_b: usize) -> Self {
        Self {
            a: &self.a[begin..end_a],
            b: &self.b[begin..end_b],
            limits: self.limits,
        }
    }
}

/// Frontier `x` values per edit cost `d`, for `k = -d, -d+2, ..., d`
pub type Trace = Vec<Vec<isize>>;

fn frontier_x(frontier: &[isize], d: isize, k: isize) -> isize {
    frontier[((k + d) / 2) as usize]
}

impl<T: Eq> DiffAlgorithm for MyersDiff<'_, T> {
    type Trace = Trace;

    fn compute_shortest_edit(&self) -> Option<Trace> {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0isize; 2 * offset + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            if d as usize > self.limits.max_edit_cost {
                return None;
            }

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    // we came from k+1, thus an insertion
                    v[idx + 1]
                } else {
                    // we came from k-1, thus a deletion
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return Some(trace);
                }
            }

            let low = offset - d as usize;
            trace.push(v[low..=offset + d as usize].iter().step_by(2).copied().collect());
        }

        Some(trace)
    }

    fn backtrack(&self, trace: &Trace) -> EditList {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let mut edits = Vec::with_capacity(trace.len());

        // trace[d - 1] is the frontier the d-th move started from
        for d in (1..=trace.len() as isize).rev() {
            let frontier = &trace[(d - 1) as usize];
            let k = x - y;

            let prev_k = if k == -d
                || (k != d && frontier_x(frontier, d - 1, k - 1) < frontier_x(frontier, d - 1, k + 1))
            {
                k + 1
            } else {
                k - 1
            };

            let prev_x = frontier_x(frontier, d - 1, prev_k);
            let prev_y = prev_x - prev_k;
            let (px, py) = (prev_x as usize, prev_y as usize);

            if prev_k == k + 1 {
                edits.push(Edit::new(px, px, py, py + 1));
            } else {
                edits.push(Edit::new(px, px + 1, py, py));
            }

            (x, y) = (prev_x, prev_y);
        }

        let mut merged = EditList::with_capacity(edits.len());
        for edit in edits.into_iter().rev() {
            push_merged(&mut merged, edit);
        }
        merged
    }

    fn diff(&self) -> EditList {
        let (a, b) = (self.a, self.b);

        let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
        let suffix = a[prefix..]
            .iter()
            .rev()
            .zip(b[prefix..].iter().rev())
            .take_while(|(x, y)| x == y)
            .count();
        let (end_a, end_b) = (a.len() - suffix, b.len() - suffix);

        let whole = Edit::new(prefix, end_a, prefix, end_b);
        if whole.is_empty() {
            return EditList::new();
        }

        let mut edits = match whole.edit_type() {
            EditType::Insert | EditType::Delete => vec![whole],
            _ if whole.len_a() + whole.len_b() > self.limits.max_units => {
                tracing::warn!(
                    units = whole.len_a() + whole.len_b(),
                    "sequences too large to diff, reporting one replace edit"
                );
                vec![whole]
            }
            _ => {
                let middle = self.middle(prefix, end_a, end_b);
                match middle.compute_shortest_edit() {
                    Some(trace) => {
                        let mut edits = middle.backtrack(&trace);
                        edits.iter_mut().for_each(|edit| edit.shift(prefix));
                        edits
                    }
                    None => {
                        tracing::warn!(
                            max_edit_cost = self.limits.max_edit_cost,
                            "edit cost limit exceeded, reporting one replace edit"
                        );
                        vec![whole]
                    }
                }
            }
        };

        normalize(&mut edits, a, b);
        edits
    }
}

/// Slide pure insertions and deletions toward the end of the sequences
///
/// An edit moves down one line while the first line it covers equals the
/// line right after it, without reaching the next edit. Edits that end up
/// touching are merged.
pub fn normalize<T: Eq>(edits: &mut EditList, a: &[T], b: &[T]) {
    for i in (0..edits.len()).rev() {
        let (limit_a, limit_b) = edits
            .get(i + 1)
            .map(|next| (next.begin_a, next.begin_b))
            .unwrap_or((a.len(), b.len()));
        let edit = &mut edits[i];

        match edit.edit_type() {
            EditType::Insert => {
                while edit.end_a < limit_a
                    && edit.end_b < limit_b
                    && b[edit.begin_b] == b[edit.end_b]
                {
                    edit.shift(1);
                }
            }
            EditType::Delete => {
                while edit.end_a < limit_a
                    && edit.end_b < limit_b
                    && a[edit.begin_a] == a[edit.end_a]
                {
                    edit.shift(1);
                }
            }
            _ => {}
        }
    }

    let mut merged = EditList::with_capacity(edits.len());
    for edit in edits.drain(..) {
        push_merged(&mut merged, edit);
    }
    *edits = merged;
}
