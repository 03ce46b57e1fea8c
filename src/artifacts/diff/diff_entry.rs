use crate::artifacts::diff::diff_error::DiffError;
use crate::artifacts::objects::entry_mode::FileMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_entry::TreeEntry;
use std::fmt::Display;

/// Path written on the absent side of an added or deleted file
pub const DEV_NULL: &str = "/dev/null";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeType {
    Add,
    Delete,
    Modify,
    Rename,
    Copy,
}

impl ChangeType {
    pub fn status_char(&self) -> char {
        match self {
            ChangeType::Add => 'A',
            ChangeType::Delete => 'D',
            ChangeType::Modify => 'M',
            ChangeType::Rename => 'R',
            ChangeType::Copy => 'C',
        }
    }
}

impl Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChangeType::Add => "ADD",
            ChangeType::Delete => "DELETE",
            ChangeType::Modify => "MODIFY",
            ChangeType::Rename => "RENAME",
            ChangeType::Copy => "COPY",
        };
        write!(f, "{name}")
    }
}

/// One file-level change between two tree states
///
/// Entries are immutable. Overrides that cannot be derived from a tree
/// comparison (explicit modes, unknown content ids) go through
/// [`DiffEntryBuilder`], which checks the invariants of the change type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    change_type: ChangeType,
    old_path: String,
    new_path: String,
    old_mode: FileMode,
    new_mode: FileMode,
    old_id: Option<ObjectId>,
    new_id: Option<ObjectId>,
    score: u8,
}

impl DiffEntry {
    /// A regular file added at `path`
    pub fn add(path: impl Into<String>, id: ObjectId) -> Self {
        Self {
            change_type: ChangeType::Add,
            old_path: DEV_NULL.to_string(),
            new_path: path.into(),
            old_mode: FileMode::Missing,
            new_mode: FileMode::Regular,
            old_id: Some(ObjectId::zero()),
            new_id: Some(id),
            score: 0,
        }
    }

    /// A regular file deleted from `path`
    pub fn delete(path: impl Into<String>, id: ObjectId) -> Self {
        Self {
            change_type: ChangeType::Delete,
            old_path: path.into(),
            new_path: DEV_NULL.to_string(),
            old_mode: FileMode::Regular,
            new_mode: FileMode::Missing,
            old_id: Some(id),
            new_id: Some(ObjectId::zero()),
            score: 0,
        }
    }

    /// A regular file modified in place, content ids unknown
    pub fn modify(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            change_type: ChangeType::Modify,
            old_path: path.clone(),
            new_path: path,
            old_mode: FileMode::Regular,
            new_mode: FileMode::Regular,
            old_id: None,
            new_id: None,
            score: 0,
        }
    }

    /// Combine the old side of `src` with the new side of `dst`
    pub fn pair(
        change_type: ChangeType,
        src: &DiffEntry,
        dst: &DiffEntry,
        score: u8,
    ) -> anyhow::Result<Self> {
        DiffEntryBuilder {
            entry: Self {
                change_type,
                old_path: src.old_path.clone(),
                new_path: dst.new_path.clone(),
                old_mode: src.old_mode,
                new_mode: dst.new_mode,
                old_id: src.old_id.clone(),
                new_id: dst.new_id.clone(),
                score,
            },
        }
        .build()
    }

    /// Classify the entries found at one path of the old and new listings
    pub fn from_entries(old: Option<&TreeEntry>, new: Option<&TreeEntry>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(Self {
                new_mode: new.mode,
                ..Self::add(new.path.clone(), new.oid.clone())
            }),
            (Some(old), None) => Some(Self {
                old_mode: old.mode,
                ..Self::delete(old.path.clone(), old.oid.clone())
            }),
            (Some(old), Some(new)) if old != new => Some(Self {
                change_type: ChangeType::Modify,
                old_path: old.path.clone(),
                new_path: new.path.clone(),
                old_mode: old.mode,
                new_mode: new.mode,
                old_id: Some(old.oid.clone()),
                new_id: Some(new.oid.clone()),
                score: 0,
            }),
            _ => None, // unchanged, or nothing at all
        }
    }

    pub fn to_builder(&self) -> DiffEntryBuilder {
        DiffEntryBuilder {
            entry: self.clone(),
        }
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn old_path(&self) -> &str {
        &self.old_path
    }

    pub fn new_path(&self) -> &str {
        &self.new_path
    }

    /// The path a change is listed under: the old path for deletions
    pub fn path(&self) -> &str {
        match self.change_type {
            ChangeType::Delete => &self.old_path,
            _ => &self.new_path,
        }
    }

    pub fn old_mode(&self) -> FileMode {
        self.old_mode
    }

    pub fn new_mode(&self) -> FileMode {
        self.new_mode
    }

    pub fn old_id(&self) -> Option<&ObjectId> {
        self.old_id.as_ref()
    }

    pub fn new_id(&self) -> Option<&ObjectId> {
        self.new_id.as_ref()
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Whether the entry carries content that differs between its sides
    pub fn has_content_change(&self) -> bool {
        match (&self.old_id, &self.new_id) {
            (Some(old_id), Some(new_id)) => old_id != new_id,
            _ => false,
        }
    }
}

impl Display for DiffEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.change_type {
            ChangeType::Rename | ChangeType::Copy => write!(
                f,
                "{} {}->{}",
                self.change_type, self.old_path, self.new_path
            ),
            _ => write!(f, "{} {}", self.change_type, self.path()),
        }
    }
}

/// Applies overrides to a copy of an entry, then re-validates it
#[derive(Debug, Clone)]
pub struct DiffEntryBuilder {
    entry: DiffEntry,
}

impl DiffEntryBuilder {
    pub fn old_mode(mut self, mode: FileMode) -> Self {
        self.entry.old_mode = mode;
        self
    }

    pub fn new_mode(mut self, mode: FileMode) -> Self {
        self.entry.new_mode = mode;
        self
    }

    pub fn old_id(mut self, id: Option<ObjectId>) -> Self {
        self.entry.old_id = id;
        self
    }

    pub fn new_id(mut self, id: Option<ObjectId>) -> Self {
        self.entry.new_id = id;
        self
    }

    /// Mark the content of both sides as unknown
    pub fn without_ids(self) -> Self {
        self.old_id(None).new_id(None)
    }

    pub fn score(mut self, score: u8) -> Self {
        self.entry.score = score;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffEntry> {
        let entry = self.entry;
        let malformed = |reason: String| -> anyhow::Result<DiffEntry> {
            Err(DiffError::MalformedEntry(reason).into())
        };

        if entry.score > 100 {
            return malformed(format!("{entry}: score {} exceeds 100", entry.score));
        }

        let old_absent = entry.old_path == DEV_NULL;
        let new_absent = entry.new_path == DEV_NULL;

        match entry.change_type {
            ChangeType::Add if !old_absent || !entry.old_mode.is_missing() => {
                malformed(format!("{entry}: an added file has no old side"))
            }
            ChangeType::Delete if !new_absent || !entry.new_mode.is_missing() => {
                malformed(format!("{entry}: a deleted file has no new side"))
            }
            ChangeType::Add if new_absent || entry.new_mode.is_missing() => {
                malformed(format!("{entry}: an added file needs a new side"))
            }
            ChangeType::Delete if old_absent || entry.old_mode.is_missing() => {
                malformed(format!("{entry}: a deleted file needs an old side"))
            }
            ChangeType::Modify if entry.old_path != entry.new_path => malformed(format!(
                "{entry}: modified paths differ ({} vs {})",
                entry.old_path, entry.new_path
            )),
            ChangeType::Rename | ChangeType::Copy if entry.old_path == entry.new_path => {
                malformed(format!("{entry}: source and destination are the same path"))
            }
            ChangeType::Modify | ChangeType::Rename | ChangeType::Copy
                if old_absent || new_absent =>
            {
                malformed(format!("{entry}: both sides must be present"))
            }
            _ => Ok(entry),
        }
    }
}
