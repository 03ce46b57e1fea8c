//! Per-file patch headers
//!
//! ```text
//! diff --git a/<path> b/<path>
//! old mode / new mode                   modes differ on a present pair
//! new file mode / deleted file mode     additions and deletions
//! similarity index, rename/copy from/to renames and copies
//! index <old>..<new>[ <mode>]           known, differing content
//! --- a/<path> / +++ b/<path>           content section
//! ```

use crate::artifacts::diff::diff_entry::{ChangeType, DEV_NULL, DiffEntry};
use crate::artifacts::diff::edit::EditList;
use crate::artifacts::diff::hunk::Hunk;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchType {
    #[default]
    Unified,
    Binary,
    GitBinary,
}

/// The rendered patch of one change record
///
/// `buffer` holds the header lines (including `Binary files differ` for
/// binary content); the hunk text is kept apart in `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    buffer: Vec<u8>,
    body: Vec<u8>,
    patch_type: PatchType,
    hunks: Vec<Hunk>,
}

impl FileHeader {
    pub fn new(buffer: Vec<u8>, body: Vec<u8>, patch_type: PatchType, hunks: Vec<Hunk>) -> Self {
        Self {
            buffer,
            body,
            patch_type,
            hunks,
        }
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn patch_type(&self) -> PatchType {
        self.patch_type
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// All edits of the record, across hunks
    pub fn to_edit_list(&self) -> EditList {
        self.hunks
            .iter()
            .flat_map(|hunk| hunk.edits().iter().copied())
            .collect()
    }

    /// Header and hunks as text
    pub fn script_text(&self) -> String {
        let mut script = String::from_utf8_lossy(&self.buffer).into_owned();
        script.push_str(&String::from_utf8_lossy(&self.body));
        script
    }

    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        out.write_all(&self.buffer)?;
        out.write_all(&self.body)
    }
}

/// Quote a path the way git does when it holds unusual bytes
///
/// Control characters, `"`, `\` and non-ASCII bytes force quoting; the
/// common control characters get their C escape, the rest an octal one.
pub fn quote_path(path: &str) -> String {
    let needs_quoting = path
        .bytes()
        .any(|byte| byte < 0x20 || byte == b'"' || byte == b'\\' || byte >= 0x7f);
    if !needs_quoting {
        return path.to_string();
    }

    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for byte in path.bytes() {
        match byte {
            0x07 => quoted.push_str("\\a"),
            0x08 => quoted.push_str("\\b"),
            b'\t' => quoted.push_str("\\t"),
            b'\n' => quoted.push_str("\\n"),
            0x0b => quoted.push_str("\\v"),
            0x0c => quoted.push_str("\\f"),
            b'\r' => quoted.push_str("\\r"),
            b'"' => quoted.push_str("\\\""),
            b'\\' => quoted.push_str("\\\\"),
            byte if byte < 0x20 || byte >= 0x7f => quoted.push_str(&format!("\\{byte:03o}")),
            byte => quoted.push(byte as char),
        }
    }
    quoted.push('"');

    quoted
}

fn prefixed_path(prefix: &str, path: &str) -> String {
    if path == DEV_NULL {
        DEV_NULL.to_string()
    } else {
        quote_path(&format!("{prefix}{path}"))
    }
}

/// `diff --git`, mode, similarity and rename/copy lines
pub fn write_git_header(out: &mut impl Write, entry: &DiffEntry) -> std::io::Result<()> {
    let old_path = match entry.change_type() {
        ChangeType::Add => entry.new_path(),
        _ => entry.old_path(),
    };
    let new_path = match entry.change_type() {
        ChangeType::Delete => entry.old_path(),
        _ => entry.new_path(),
    };
    writeln!(
        out,
        "diff --git {} {}",
        quote_path(&format!("a/{old_path}")),
        quote_path(&format!("b/{new_path}"))
    )?;

    let has_both_sides = matches!(
        entry.change_type(),
        ChangeType::Modify | ChangeType::Rename | ChangeType::Copy
    );
    if has_both_sides && entry.old_mode() != entry.new_mode() {
        writeln!(out, "old mode {}", entry.old_mode())?;
        writeln!(out, "new mode {}", entry.new_mode())?;
    }

    match entry.change_type() {
        ChangeType::Add => writeln!(out, "new file mode {}", entry.new_mode())?,
        ChangeType::Delete => writeln!(out, "deleted file mode {}", entry.old_mode())?,
        ChangeType::Rename | ChangeType::Copy => {
            let verb = if entry.change_type() == ChangeType::Rename {
                "rename"
            } else {
                "copy"
            };
            writeln!(out, "similarity index {}%", entry.score())?;
            writeln!(out, "{verb} from {}", quote_path(entry.old_path()))?;
            writeln!(out, "{verb} to {}", quote_path(entry.new_path()))?;
        }
        ChangeType::Modify if entry.score() > 0 => {
            writeln!(out, "dissimilarity index {}%", 100 - entry.score())?
        }
        ChangeType::Modify => {}
    }

    Ok(())
}

/// `index <old>..<new>`, with the mode appended when both sides share it
pub fn write_index_line(
    out: &mut impl Write,
    entry: &DiffEntry,
    old_abbreviation: &str,
    new_abbreviation: &str,
) -> std::io::Result<()> {
    write!(out, "index {old_abbreviation}..{new_abbreviation}")?;
    if entry.old_mode() == entry.new_mode() {
        write!(out, " {}", entry.new_mode())?;
    }
    writeln!(out)
}

/// `---` and `+++` lines
pub fn write_old_new_paths(out: &mut impl Write, entry: &DiffEntry) -> std::io::Result<()> {
    writeln!(out, "--- {}", prefixed_path("a/", entry.old_path()))?;
    writeln!(out, "+++ {}", prefixed_path("b/", entry.new_path()))
}
