use crate::areas::database::ObjectStore;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::FileMode;
use crate::artifacts::objects::tree_entry::TreeEntry;
use anyhow::Context;
use bytes::Bytes;
use is_executable::IsExecutable;
use std::path::{Component, Path};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

/// A directory on disk viewed as a tree snapshot
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hash every file under the workspace into `store` and list it
    ///
    /// The listing is flattened (no directory entries), uses slash-separated
    /// relative paths and is sorted bytewise, as the tree diff expects.
    /// Symlinks are not followed: their target path becomes the blob content.
    pub fn snapshot(&self, store: &dyn ObjectStore) -> anyhow::Result<Vec<TreeEntry>> {
        if !self.path.is_dir() {
            anyhow::bail!("The specified path is not a directory: {:?}", self.path);
        }

        let walker = WalkDir::new(&self.path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()));

        // an unreadable directory must fail the snapshot, not hide its files
        let mut entries = Vec::new();
        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to walk directory: {:?}", self.path))?;
            if !entry.file_type().is_dir() {
                entries.push(self.snapshot_entry(entry.path(), store)?);
            }
        }

        entries.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));

        Ok(entries)
    }

    fn snapshot_entry(&self, file_path: &Path, store: &dyn ObjectStore) -> anyhow::Result<TreeEntry> {
        let relative = file_path
            .strip_prefix(self.path.as_ref())
            .with_context(|| format!("{:?} is outside the workspace", file_path))?;
        let metadata = std::fs::symlink_metadata(file_path)
            .with_context(|| format!("Failed to get metadata for file: {:?}", relative))?;

        let (mode, content) = if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(file_path)
                .with_context(|| format!("Failed to read symlink: {:?}", relative))?;
            let target = target.to_string_lossy().into_owned();
            (FileMode::Symlink, Bytes::from(target))
        } else {
            let content = std::fs::read(file_path)
                .with_context(|| format!("Failed to read file: {:?}", relative))?;
            let mode = match file_path.is_executable() {
                true => FileMode::Executable,
                false => FileMode::Regular,
            };
            (mode, Bytes::from(content))
        };

        let oid = store.store(&Blob::new(content))?;

        Ok(TreeEntry::new(Self::to_slash_path(relative), mode, oid))
    }

    fn to_slash_path(path: &Path) -> String {
        path.components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }
}
