//! Grouping of edits into unified-diff hunks
//!
//! Edits closer than twice the context radius share a hunk, so their
//! context regions never overlap or repeat.

use crate::artifacts::diff::edit::Edit;
use crate::artifacts::diff::sequence::RawText;
use std::io::Write;

pub const DEFAULT_CONTEXT_LINES: usize = 3;

const NO_NEWLINE_MARKER: &[u8] = b"\\ No newline at end of file\n";

/// A run of edits plus the context lines around it
///
/// Ranges are 0-based and half-open; `a_start`/`b_start` give the 1-based
/// positions printed in the `@@` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hunk {
    begin_a: usize,
    end_a: usize,
    begin_b: usize,
    end_b: usize,
    edits: Vec<Edit>,
}

impl Hunk {
    /// Placeholder hunk for content that cannot be diffed line by line
    pub fn degenerate() -> Self {
        Self::default()
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn a_start(&self) -> usize {
        Self::start(self.begin_a, self.end_a)
    }

    pub fn a_size(&self) -> usize {
        self.end_a - self.begin_a
    }

    pub fn b_start(&self) -> usize {
        Self::start(self.begin_b, self.end_b)
    }

    pub fn b_size(&self) -> usize {
        self.end_b - self.begin_b
    }

    // an empty range is positioned at the line before it
    fn start(begin: usize, end: usize) -> usize {
        if begin == end { begin } else { begin + 1 }
    }

    fn format_range(start: usize, size: usize) -> String {
        match size {
            0 => format!("{start},0"),
            1 => format!("{start}"),
            _ => format!("{start},{size}"),
        }
    }

    /// The `@@ -a,b +c,d @@` line, without its terminator
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            Self::format_range(self.a_start(), self.a_size()),
            Self::format_range(self.b_start(), self.b_size())
        )
    }

    /// Write the header and the prefixed lines of this hunk
    pub fn write_to(&self, out: &mut impl Write, a: &RawText, b: &RawText) -> std::io::Result<()> {
        writeln!(out, "{}", self.header())?;

        let mut ai = self.begin_a;
        for edit in &self.edits {
            for index in ai..edit.begin_a {
                write_line(out, b' ', a, index)?;
            }
            for index in edit.begin_a..edit.end_a {
                write_line(out, b'-', a, index)?;
            }
            for index in edit.begin_b..edit.end_b {
                write_line(out, b'+', b, index)?;
            }
            ai = edit.end_a;
        }
        for index in ai..self.end_a {
            write_line(out, b' ', a, index)?;
        }

        Ok(())
    }
}

fn write_line(out: &mut impl Write, prefix: u8, text: &RawText, index: usize) -> std::io::Result<()> {
    out.write_all(&[prefix])?;
    out.write_all(text.line(index))?;

    if text.is_missing_newline(index) {
        out.write_all(b"\n")?;
        out.write_all(NO_NEWLINE_MARKER)?;
    }

    Ok(())
}

/// Split an edit list into hunks with `context` lines around each edit
pub fn assemble_hunks(edits: &[Edit], context: usize, len_a: usize, len_b: usize) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut first = 0;

    while first < edits.len() {
        let mut last = first;
        while last + 1 < edits.len() && edits[last + 1].begin_a - edits[last].end_a <= 2 * context {
            last += 1;
        }

        let (head, tail) = (&edits[first], &edits[last]);
        hunks.push(Hunk {
            begin_a: head.begin_a.saturating_sub(context),
            end_a: (tail.end_a + context).min(len_a),
            begin_b: head.begin_b.saturating_sub(context),
            end_b: (tail.end_b + context).min(len_b),
            edits: edits[first..=last].to_vec(),
        });

        first = last + 1;
    }

    hunks
}
