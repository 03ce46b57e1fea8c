use crate::artifacts::objects::entry_mode::FileMode;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// One path of a flattened tree snapshot
///
/// Paths are slash-separated and relative to the snapshot root. Listings
/// handed to the tree diff must be sorted by path with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub path: String,
    pub mode: FileMode,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }
}
