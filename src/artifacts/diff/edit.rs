use derive_new::new;
use std::fmt::Display;

/// Kind of an edit, derived from which of its ranges are non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditType {
    Insert,
    Delete,
    Replace,
    Empty,
}

/// One contiguous region where sequence A differs from sequence B
///
/// `begin_a..end_a` is replaced by `begin_b..end_b`; both ranges are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Edit {
    pub begin_a: usize,
    pub end_a: usize,
    pub begin_b: usize,
    pub end_b: usize,
}

impl Edit {
    pub fn edit_type(&self) -> EditType {
        match (self.begin_a < self.end_a, self.begin_b < self.end_b) {
            (true, true) => EditType::Replace,
            (false, true) => EditType::Insert,
            (true, false) => EditType::Delete,
            (false, false) => EditType::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edit_type() == EditType::Empty
    }

    pub fn len_a(&self) -> usize {
        self.end_a - self.begin_a
    }

    pub fn len_b(&self) -> usize {
        self.end_b - self.begin_b
    }

    /// Move the edit `by` positions forward on both sides
    pub fn shift(&mut self, by: usize) {
        self.begin_a += by;
        self.end_a += by;
        self.begin_b += by;
        self.end_b += by;
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}({}-{},{}-{})",
            self.edit_type(),
            self.begin_a,
            self.end_a,
            self.begin_b,
            self.end_b
        )
    }
}

/// Edits ordered by position, non-overlapping, with adjacent edits merged
pub type EditList = Vec<Edit>;

/// Append an edit, merging it into the last one when the two touch
pub fn push_merged(edits: &mut EditList, edit: Edit) {
    if edit.is_empty() {
        return;
    }

    match edits.last_mut() {
        Some(last) if last.end_a == edit.begin_a && last.end_b == edit.begin_b => {
            last.end_a = edit.end_a;
            last.end_b = edit.end_b;
        }
        _ => edits.push(edit),
    }
}

/// Rebuild B from A and the lines B contributes to each edit
pub fn apply_edits<T: Clone>(a: &[T], b: &[T], edits: &[Edit]) -> Vec<T> {
    let mut result = Vec::with_capacity(b.len());
    let mut cursor = 0;

    for edit in edits {
        result.extend_from_slice(&a[cursor..edit.begin_a]);
        result.extend_from_slice(&b[edit.begin_b..edit.end_b]);
        cursor = edit.end_a;
    }
    result.extend_from_slice(&a[cursor..]);

    result
}
