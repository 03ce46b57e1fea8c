use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::ColorWriter;
use crate::artifacts::diff::formatter::{DiffFormatter, DiffOptions};
use crate::artifacts::objects::tree_entry::TreeEntry;
use std::path::{Path, PathBuf};

impl Repository {
    /// Write the patch turning the `old` directory into the `new` one
    ///
    /// Both directories are snapshotted concurrently into the repository's
    /// object space before the formatter runs.
    pub async fn diff(
        &self,
        old: &Path,
        new: &Path,
        options: DiffOptions,
        colored: bool,
    ) -> anyhow::Result<()> {
        let (old_listing, new_listing) =
            tokio::try_join!(self.snapshot(old.into()), self.snapshot(new.into()))?;
        tracing::info!(
            old = old_listing.len(),
            new = new_listing.len(),
            "snapshotted directories"
        );

        let database = self.database();
        let formatter = DiffFormatter::new(&*database, options);
        let (old, new) = (Some(old_listing.as_slice()), Some(new_listing.as_slice()));
        let mut writer = self.writer();

        if colored {
            formatter.format_trees(old, new, &mut ColorWriter::new(&mut *writer))
        } else {
            formatter.format_trees(old, new, &mut *writer)
        }
    }

    async fn snapshot(&self, path: PathBuf) -> anyhow::Result<Vec<TreeEntry>> {
        let database = self.database();

        tokio::task::spawn_blocking(move || {
            Workspace::new(path.into_boxed_path()).snapshot(&*database)
        })
        .await?
    }
}
