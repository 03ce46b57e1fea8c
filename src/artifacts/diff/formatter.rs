use crate::areas::database::ObjectReader;
use crate::artifacts::diff::abbreviation::{DEFAULT_ABBREVIATION_LENGTH, abbreviate};
use crate::artifacts::diff::delta_filter::DeltaFilter;
use crate::artifacts::diff::diff_entry::{ChangeType, DiffEntry};
use crate::artifacts::diff::diff_error::DiffError;
use crate::artifacts::diff::edit::EditList;
use crate::artifacts::diff::header::{
    FileHeader, PatchType, write_git_header, write_index_line, write_old_new_paths,
};
use crate::artifacts::diff::hunk::{DEFAULT_CONTEXT_LINES, Hunk, assemble_hunks};
use crate::artifacts::diff::myers::{DiffAlgorithm, DiffLimits, MyersDiff};
use crate::artifacts::diff::path_filter::PathFilter;
use crate::artifacts::diff::rename_detector::{
    DEFAULT_RENAME_LIMIT, DEFAULT_RENAME_THRESHOLD, RenameDetector,
};
use crate::artifacts::diff::sequence::{
    BINARY_SCAN_LIMIT, RawText, intern_lines, is_binary, read_content,
};
use crate::artifacts::diff::tree_diff::{DiffFilter, TreeDiff};
use crate::artifacts::objects::entry_mode::FileMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_entry::TreeEntry;
use bytes::Bytes;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Settings of a diff invocation
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub abbreviation_length: usize,
    pub context_lines: usize,
    pub detect_renames: bool,
    pub find_copies: bool,
    pub rename_threshold: u8,
    pub rename_limit: usize,
    pub path_filter: PathFilter,
    pub change_filter: DiffFilter,
    pub delta_filter: DeltaFilter,
    pub binary_scan_limit: usize,
    pub limits: DiffLimits,
    pub patch_type: PatchType,
    pub cancellation: Option<Arc<AtomicBool>>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            abbreviation_length: DEFAULT_ABBREVIATION_LENGTH,
            context_lines: DEFAULT_CONTEXT_LINES,
            detect_renames: true,
            find_copies: false,
            rename_threshold: DEFAULT_RENAME_THRESHOLD,
            rename_limit: DEFAULT_RENAME_LIMIT,
            path_filter: PathFilter::empty(),
            change_filter: DiffFilter::all(),
            delta_filter: DeltaFilter::None,
            binary_scan_limit: BINARY_SCAN_LIMIT,
            limits: DiffLimits::default(),
            patch_type: PatchType::Unified,
            cancellation: None,
        }
    }
}

impl DiffOptions {
    pub fn with_abbreviation_length(mut self, abbreviation_length: usize) -> Self {
        self.abbreviation_length = abbreviation_length;
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_detect_renames(mut self, detect_renames: bool) -> Self {
        self.detect_renames = detect_renames;
        self
    }

    pub fn with_find_copies(mut self, find_copies: bool) -> Self {
        self.find_copies = find_copies;
        self
    }

    pub fn with_rename_threshold(mut self, rename_threshold: u8) -> Self {
        self.rename_threshold = rename_threshold;
        self
    }

    pub fn with_rename_limit(mut self, rename_limit: usize) -> Self {
        self.rename_limit = rename_limit;
        self
    }

    pub fn with_path_filter(mut self, path_filter: PathFilter) -> Self {
        self.path_filter = path_filter;
        self
    }

    pub fn with_change_filter(mut self, change_filter: DiffFilter) -> Self {
        self.change_filter = change_filter;
        self
    }

    pub fn with_delta_filter(mut self, delta_filter: DeltaFilter) -> Self {
        self.delta_filter = delta_filter;
        self
    }

    pub fn with_binary_scan_limit(mut self, binary_scan_limit: usize) -> Self {
        self.binary_scan_limit = binary_scan_limit;
        self
    }

    pub fn with_limits(mut self, limits: DiffLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_patch_type(mut self, patch_type: PatchType) -> Self {
        self.patch_type = patch_type;
        self
    }

    pub fn with_cancellation(mut self, cancellation: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }
}

/// A rendered record together with what the delta filter inspects
struct FormatResult {
    header: FileHeader,
    a: RawText,
    b: RawText,
    edits: EditList,
}

/// Renders change records as a unified git patch
///
/// Every record is rendered into memory first and only written to the sink
/// once it passed the filters, so a failure or a filtered record never leaves
/// partial output behind.
pub struct DiffFormatter<'r> {
    reader: &'r dyn ObjectReader,
    options: DiffOptions,
}

impl<'r> DiffFormatter<'r> {
    pub fn new(reader: &'r dyn ObjectReader, options: DiffOptions) -> Self {
        Self { reader, options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Change records between two listings, renames and copies included
    pub fn scan(
        &self,
        old: Option<&[TreeEntry]>,
        new: Option<&[TreeEntry]>,
    ) -> anyhow::Result<Vec<DiffEntry>> {
        let mut tree_diff = TreeDiff::new();
        tree_diff.compare_listings(old, new)?;
        let changes = tree_diff.into_changes();

        if !self.options.detect_renames {
            return Ok(changes);
        }

        RenameDetector::new(self.reader)
            .with_threshold(self.options.rename_threshold)
            .with_rename_limit(self.options.rename_limit)
            .with_find_copies(self.options.find_copies)
            .detect(changes)
    }

    pub fn format_trees(
        &self,
        old: Option<&[TreeEntry]>,
        new: Option<&[TreeEntry]>,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let entries = self.scan(old, new)?;
        self.format(&entries, out)
    }

    /// Write the patch of every record that passes the filters
    pub fn format(&self, entries: &[DiffEntry], out: &mut impl Write) -> anyhow::Result<()> {
        self.check_patch_type()?;

        for entry in entries {
            self.check_cancelled()?;

            if !self.options.change_filter.matches(entry.change_type()) {
                tracing::debug!(%entry, "skipped by change filter");
                continue;
            }
            if !self.options.path_filter.matches_entry(entry) {
                tracing::trace!(%entry, "skipped by path filter");
                continue;
            }

            let result = self.create_format_result(entry)?;
            if !self
                .options
                .delta_filter
                .accepts(&result.a, &result.b, &result.edits)
            {
                tracing::debug!(%entry, "suppressed by delta filter");
                continue;
            }

            let mut record = Vec::new();
            result.header.write_to(&mut record)?;
            out.write_all(&record)?;
            tracing::debug!(%entry, bytes = record.len(), "formatted");
        }

        out.flush()?;
        Ok(())
    }

    /// Render one record without writing it
    pub fn to_file_header(&self, entry: &DiffEntry) -> anyhow::Result<FileHeader> {
        self.check_patch_type()?;
        Ok(self.create_format_result(entry)?.header)
    }

    fn create_format_result(&self, entry: &DiffEntry) -> anyhow::Result<FormatResult> {
        let mut buffer = Vec::new();
        write_git_header(&mut buffer, entry)?;

        // pure renames and mode changes carry no content section
        let (Some(old_id), Some(new_id)) = (entry.old_id(), entry.new_id()) else {
            return Ok(FormatResult::without_content(buffer));
        };
        if old_id == new_id {
            return Ok(FormatResult::without_content(buffer));
        }

        write_index_line(
            &mut buffer,
            entry,
            &abbreviate(old_id, self.options.abbreviation_length, self.reader),
            &abbreviate(new_id, self.options.abbreviation_length, self.reader),
        )?;

        let old_content = self.open(old_id, entry.old_mode())?;
        let new_content = self.open(new_id, entry.new_mode())?;

        let scan_limit = self.options.binary_scan_limit;
        if is_binary(&old_content, scan_limit) || is_binary(&new_content, scan_limit) {
            write_old_new_paths(&mut buffer, entry)?;
            writeln!(buffer, "Binary files differ")?;

            return Ok(FormatResult {
                header: FileHeader::new(
                    buffer,
                    Vec::new(),
                    PatchType::Binary,
                    vec![Hunk::degenerate()],
                ),
                a: RawText::empty(),
                b: RawText::empty(),
                edits: EditList::new(),
            });
        }

        let a = RawText::new(old_content);
        let b = RawText::new(new_content);
        let (a_ids, b_ids) = intern_lines(&a, &b);
        let edits = MyersDiff::with_limits(&a_ids, &b_ids, self.options.limits).diff();

        let has_paths = match entry.change_type() {
            ChangeType::Rename | ChangeType::Copy => !edits.is_empty(),
            _ => true,
        };
        if has_paths {
            write_old_new_paths(&mut buffer, entry)?;
        }

        let hunks = assemble_hunks(&edits, self.options.context_lines, a.len(), b.len());
        let mut body = Vec::new();
        for hunk in &hunks {
            hunk.write_to(&mut body, &a, &b)?;
        }

        Ok(FormatResult {
            header: FileHeader::new(buffer, body, PatchType::Unified, hunks),
            a,
            b,
            edits,
        })
    }

    /// Content of one side; gitlinks are shown as the commit they point to
    fn open(&self, id: &ObjectId, mode: FileMode) -> anyhow::Result<Bytes> {
        if mode.is_missing() || id.is_zero() {
            return Ok(Bytes::new());
        }
        if mode.is_gitlink() {
            return Ok(Bytes::from(format!("Subproject commit {id}\n")));
        }

        read_content(self.reader, id)
    }

    fn check_patch_type(&self) -> anyhow::Result<()> {
        match self.options.patch_type {
            PatchType::Unified => Ok(()),
            other => Err(DiffError::UnsupportedPatchType(other).into()),
        }
    }

    fn check_cancelled(&self) -> anyhow::Result<()> {
        match &self.options.cancellation {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(DiffError::Cancelled.into()),
            _ => Ok(()),
        }
    }
}

impl FormatResult {
    fn without_content(buffer: Vec<u8>) -> Self {
        Self {
            header: FileHeader::new(buffer, Vec::new(), PatchType::Unified, Vec::new()),
            a: RawText::empty(),
            b: RawText::empty(),
            edits: EditList::new(),
        }
    }
}
