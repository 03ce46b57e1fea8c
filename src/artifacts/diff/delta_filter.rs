//! Content filters applied to a record after its edits are known
//!
//! - `Matching`: keep a record only if the pattern occurs in its removed or
//!   added lines (`git log -G` semantics)
//! - `Ignoring`: drop a record whose every edit replaces lines with lines
//!   that are identical once all pattern matches are deleted
//!
//! An empty pattern keeps every record in both modes.

use crate::artifacts::diff::edit::{Edit, EditType};
use crate::artifacts::diff::sequence::RawText;
use regex::bytes::Regex;
use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub enum DeltaFilter {
    #[default]
    None,
    Matching(Regex),
    Ignoring(Regex),
}

impl DeltaFilter {
    pub fn matching(pattern: &str) -> anyhow::Result<Self> {
        Ok(Self::Matching(Regex::new(pattern)?))
    }

    pub fn ignoring(pattern: &str) -> anyhow::Result<Self> {
        Ok(Self::Ignoring(Regex::new(pattern)?))
    }

    /// Whether the record with these texts and edits should be written
    ///
    /// Records without line edits (binary content, mode changes) are
    /// matched against empty text and are never ignored.
    pub fn accepts(&self, a: &RawText, b: &RawText, edits: &[Edit]) -> bool {
        match self {
            DeltaFilter::None => true,
            DeltaFilter::Matching(regex) | DeltaFilter::Ignoring(regex)
                if regex.as_str().is_empty() =>
            {
                true
            }
            DeltaFilter::Matching(regex) => {
                let changed = edits
                    .iter()
                    .flat_map(|edit| {
                        joined_lines(a, edit.begin_a..edit.end_a)
                            .into_iter()
                            .chain(joined_lines(b, edit.begin_b..edit.end_b))
                    })
                    .collect::<Vec<u8>>();
                regex.is_match(&changed)
            }
            DeltaFilter::Ignoring(regex) => {
                let ignorable = |edit: &Edit| {
                    edit.edit_type() == EditType::Replace
                        && regex.replace_all(&lines(a, edit.begin_a..edit.end_a), &b""[..])
                            == regex.replace_all(&lines(b, edit.begin_b..edit.end_b), &b""[..])
                };
                edits.is_empty() || !edits.iter().all(ignorable)
            }
        }
    }
}

/// Lines of a range, terminators included
fn lines(text: &RawText, range: Range<usize>) -> Vec<u8> {
    range.flat_map(|index| text.line(index).to_vec()).collect()
}

/// Lines of a range, each followed by a newline
fn joined_lines(text: &RawText, range: Range<usize>) -> Vec<u8> {
    range
        .flat_map(|index| {
            let mut line = text.line_text(index).to_vec();
            line.push(b'\n');
            line
        })
        .collect()
}
