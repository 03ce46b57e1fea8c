//! Line sequences for text content
//!
//! A `RawText` splits a buffer into lines that keep their `\n` terminator,
//! so a last line without a newline compares unequal to the same text with
//! one, and can be flagged with `\ No newline at end of file` when rendered.

use crate::areas::database::ObjectReader;
use crate::artifacts::diff::diff_error::DiffError;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::HashMap;

/// Number of leading bytes inspected by the binary heuristic (git's `FIRST_FEW_BYTES`)
pub const BINARY_SCAN_LIMIT: usize = 8000;

/// Heuristic binary detection: a NUL byte in the first `scan_limit` bytes
///
/// This is not exact (a text file with a late NUL, or a binary format
/// without NULs, is misclassified) but it is deterministic.
pub fn is_binary(content: &[u8], scan_limit: usize) -> bool {
    content[..content.len().min(scan_limit)].contains(&0)
}

/// Load blob content, reporting failures as `DiffError::ContentUnavailable`
pub fn read_content(reader: &dyn ObjectReader, id: &ObjectId) -> anyhow::Result<Bytes> {
    reader.open(id).map_err(|err| {
        DiffError::ContentUnavailable {
            id: id.clone(),
            reason: format!("{err:#}"),
        }
        .into()
    })
}

/// Text content indexed by line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    content: Bytes,
    /// start offset of every line, plus `content.len()` as a sentinel
    line_starts: Vec<usize>,
}

impl RawText {
    pub fn new(content: Bytes) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .iter()
                .enumerate()
                .filter(|(_, byte)| **byte == b'\n')
                .map(|(offset, _)| offset + 1)
                .filter(|start| *start < content.len()),
        );

        if content.is_empty() {
            line_starts.clear();
        }
        line_starts.push(content.len());

        Self {
            content,
            line_starts,
        }
    }

    pub fn empty() -> Self {
        Self::new(Bytes::new())
    }

    pub fn len(&self) -> usize {
        self.line_starts.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Line `index` including its terminator, if any
    pub fn line(&self, index: usize) -> &[u8] {
        &self.content[self.line_starts[index]..self.line_starts[index + 1]]
    }

    /// Line `index` without its terminator
    pub fn line_text(&self, index: usize) -> &[u8] {
        let line = self.line(index);
        line.strip_suffix(b"\n").unwrap_or(line)
    }

    /// Whether line `index` ends without a `\n`; only possible for the last line
    pub fn is_missing_newline(&self, index: usize) -> bool {
        !self.line(index).ends_with(b"\n")
    }

    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.len()).map(|index| self.line(index))
    }
}

/// Maps lines of two texts onto shared integer ids
///
/// Equal lines (terminator included) receive equal ids, so the edit script
/// computer compares `u32`s instead of byte slices.
pub fn intern_lines(a: &RawText, b: &RawText) -> (Vec<u32>, Vec<u32>) {
    let mut ids: HashMap<&[u8], u32> = HashMap::new();
    let mut intern = |line| {
        let next = ids.len() as u32;
        *ids.entry(line).or_insert(next)
    };

    let a_ids = a.lines().map(&mut intern).collect::<Vec<_>>();
    let b_ids = b.lines().map(&mut intern).collect::<Vec<_>>();

    (a_ids, b_ids)
}
