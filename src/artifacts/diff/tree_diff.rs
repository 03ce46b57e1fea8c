use crate::artifacts::diff::diff_entry::{ChangeType, DiffEntry};
use crate::artifacts::diff::diff_error::DiffError;
use crate::artifacts::objects::tree_entry::TreeEntry;
use bitflags::bitflags;
use std::cmp::Ordering;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b00001;
        const DELETED = 0b00010;
        const MODIFIED = 0b00100;
        const RENAMED = 0b01000;
        const COPIED = 0b10000;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                'R' => filter |= Self::RENAMED,
                'C' => filter |= Self::COPIED,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, change_type: ChangeType) -> bool {
        match change_type {
            ChangeType::Add => self.contains(DiffFilter::ADDED),
            ChangeType::Delete => self.contains(DiffFilter::DELETED),
            ChangeType::Modify => self.contains(DiffFilter::MODIFIED),
            ChangeType::Rename => self.contains(DiffFilter::RENAMED),
            ChangeType::Copy => self.contains(DiffFilter::COPIED),
        }
    }
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Matches the paths of two flattened tree listings into change records
///
/// Both listings are walked once, side by side, so the comparison is linear
/// in the number of entries. Directory entries are skipped; listings are
/// expected to contain files only, sorted bytewise by path.
#[derive(Debug, Default)]
pub struct TreeDiff {
    changes: Vec<DiffEntry>,
}

impl TreeDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[DiffEntry] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<DiffEntry> {
        self.changes
    }

    /// Compare two listings; `None` stands for the empty tree
    pub fn compare_listings(
        &mut self,
        old: Option<&[TreeEntry]>,
        new: Option<&[TreeEntry]>,
    ) -> anyhow::Result<()> {
        let old = old.unwrap_or_default();
        let new = new.unwrap_or_default();
        Self::check_listing(old, "old")?;
        Self::check_listing(new, "new")?;

        let mut old_entries = old.iter().filter(|entry| !entry.is_tree()).peekable();
        let mut new_entries = new.iter().filter(|entry| !entry.is_tree()).peekable();

        loop {
            let order = match (old_entries.peek(), new_entries.peek()) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(old), Some(new)) => old.path.cmp(&new.path),
            };

            match order {
                Ordering::Less => self.record(old_entries.next(), None),
                Ordering::Greater => self.record(None, new_entries.next()),
                Ordering::Equal => self.compare_entries(old_entries.next(), new_entries.next()),
            }
        }

        Ok(())
    }

    fn compare_entries(&mut self, old: Option<&TreeEntry>, new: Option<&TreeEntry>) {
        match (old, new) {
            // a file type change (symlink, gitlink, file) is not a content change
            (Some(old), Some(new)) if !old.mode.same_type(&new.mode) => {
                self.record(Some(old), None);
                self.record(None, Some(new));
            }
            _ => self.record(old, new),
        }
    }

    fn record(&mut self, old: Option<&TreeEntry>, new: Option<&TreeEntry>) {
        if let Some(change) = DiffEntry::from_entries(old, new) {
            self.changes.push(change);
        }
    }

    fn check_listing(entries: &[TreeEntry], side: &str) -> anyhow::Result<()> {
        if let Some(entry) = entries.iter().find(|entry| entry.mode.is_missing()) {
            return Err(DiffError::MalformedEntry(format!(
                "{side} listing has no mode for '{}'",
                entry.path
            ))
            .into());
        }

        match entries.windows(2).find(|pair| pair[0].path >= pair[1].path) {
            Some(pair) => Err(DiffError::MalformedEntry(format!(
                "{side} listing is not strictly ordered: '{}' follows '{}'",
                pair[1].path, pair[0].path
            ))
            .into()),
            None => Ok(()),
        }
    }
}
