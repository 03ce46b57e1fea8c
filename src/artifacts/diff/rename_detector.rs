//! Rename and copy detection
//!
//! Added files are paired with deleted files (and, when copies are wanted,
//! with the old side of modified files) whose content is similar enough.
//! Similarity is estimated by hashing content into chunks (one per line,
//! capped at 64 bytes) and counting the bytes both sides have in common.

use crate::areas::database::ObjectReader;
use crate::artifacts::diff::diff_entry::{ChangeType, DiffEntry};
use crate::artifacts::diff::sequence::read_content;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

pub const DEFAULT_RENAME_THRESHOLD: u8 = 60;
pub const DEFAULT_RENAME_LIMIT: usize = 400;

const MAX_CHUNK_LENGTH: usize = 64;

/// Chunk histogram of one blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimilarityIndex {
    size: usize,
    chunks: HashMap<u64, usize>,
}

impl SimilarityIndex {
    pub fn new(content: &[u8]) -> Self {
        let mut chunks = HashMap::new();
        let mut rest = content;

        while !rest.is_empty() {
            let limit = rest.len().min(MAX_CHUNK_LENGTH);
            let length = rest[..limit]
                .iter()
                .position(|byte| *byte == b'\n')
                .map(|newline| newline + 1)
                .unwrap_or(limit);

            let mut hasher = DefaultHasher::new();
            rest[..length].hash(&mut hasher);
            *chunks.entry(hasher.finish()).or_insert(0) += length;

            rest = &rest[length..];
        }

        Self {
            size: content.len(),
            chunks,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Percentage of the larger blob shared with the other one
    pub fn score(&self, other: &SimilarityIndex) -> u8 {
        let max_size = self.size.max(other.size);
        if max_size == 0 {
            return 100;
        }

        let common: usize = self
            .chunks
            .iter()
            .filter_map(|(hash, bytes)| other.chunks.get(hash).map(|theirs| (*bytes).min(*theirs)))
            .sum();

        (common * 100 / max_size) as u8
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: u8,
    source: usize,
    destination: usize,
}

/// Re-pairs additions with deletions (or copy sources) into renames and copies
pub struct RenameDetector<'r> {
    reader: &'r dyn ObjectReader,
    threshold: u8,
    rename_limit: usize,
    find_copies: bool,
}

impl<'r> RenameDetector<'r> {
    pub fn new(reader: &'r dyn ObjectReader) -> Self {
        Self {
            reader,
            threshold: DEFAULT_RENAME_THRESHOLD,
            rename_limit: DEFAULT_RENAME_LIMIT,
            find_copies: false,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold.min(100);
        self
    }

    pub fn with_rename_limit(mut self, rename_limit: usize) -> Self {
        self.rename_limit = rename_limit;
        self
    }

    pub fn with_find_copies(mut self, find_copies: bool) -> Self {
        self.find_copies = find_copies;
        self
    }

    /// Replace matched ADD/DELETE entries by RENAME and COPY entries
    ///
    /// The result is ordered by the path each entry is listed under.
    pub fn detect(&self, entries: Vec<DiffEntry>) -> anyhow::Result<Vec<DiffEntry>> {
        let sources = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| match entry.change_type() {
                ChangeType::Delete => true,
                ChangeType::Modify => self.find_copies,
                _ => false,
            })
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let destinations = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.change_type() == ChangeType::Add)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        if sources.is_empty() || destinations.is_empty() {
            return Ok(entries);
        }

        let candidates = self.score_candidates(&entries, &sources, &destinations)?;

        let mut taken = HashSet::new();
        let mut renamed = HashSet::new();
        let mut pairs = Vec::new();

        for candidate in candidates {
            if taken.contains(&candidate.destination) {
                continue;
            }

            let source = &entries[candidate.source];
            let change_type = match source.change_type() {
                ChangeType::Delete if renamed.insert(candidate.source) => ChangeType::Rename,
                _ if self.find_copies => ChangeType::Copy,
                _ => continue,
            };

            let destination = &entries[candidate.destination];
            let pair = DiffEntry::pair(change_type, source, destination, candidate.score)?;
            tracing::debug!(
                from = source.old_path(),
                to = destination.new_path(),
                score = candidate.score,
                "detected {}",
                change_type
            );

            taken.insert(candidate.destination);
            pairs.push(pair);
        }

        let mut result = entries
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !renamed.contains(index) && !taken.contains(index))
            .map(|(_, entry)| entry)
            .chain(pairs)
            .collect::<Vec<_>>();
        result.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(result)
    }

    /// All pairs at or above the threshold, best first
    fn score_candidates(
        &self,
        entries: &[DiffEntry],
        sources: &[usize],
        destinations: &[usize],
    ) -> anyhow::Result<Vec<Candidate>> {
        let exact_only = sources.len() * destinations.len()
            > self.rename_limit.saturating_mul(self.rename_limit);
        if exact_only {
            tracing::warn!(
                sources = sources.len(),
                destinations = destinations.len(),
                "too many files for inexact rename detection"
            );
        }

        let mut indexes: HashMap<ObjectId, SimilarityIndex> = HashMap::new();
        let mut candidates = Vec::new();

        for &source in sources {
            for &destination in destinations {
                let (src, dst) = (&entries[source], &entries[destination]);
                if src.old_path() == dst.new_path()
                    || !src.old_mode().same_type(&dst.new_mode())
                {
                    continue;
                }

                let (Some(src_id), Some(dst_id)) = (src.old_id(), dst.new_id()) else {
                    continue;
                };

                let score = if src_id == dst_id {
                    100
                } else if exact_only || src.old_mode().is_gitlink() {
                    continue;
                } else {
                    let src_size = self.index(&mut indexes, src_id)?.size();
                    let dst_size = self.index(&mut indexes, dst_id)?.size();
                    if !self.may_reach_threshold(src_size, dst_size) {
                        continue;
                    }
                    indexes[src_id].score(&indexes[dst_id])
                };

                if score >= self.threshold {
                    candidates.push(Candidate {
                        score,
                        source,
                        destination,
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| entries[a.source].old_path().cmp(entries[b.source].old_path()))
                .then_with(|| {
                    entries[a.destination]
                        .new_path()
                        .cmp(entries[b.destination].new_path())
                })
        });

        Ok(candidates)
    }

    fn index<'i>(
        &self,
        indexes: &'i mut HashMap<ObjectId, SimilarityIndex>,
        id: &ObjectId,
    ) -> anyhow::Result<&'i SimilarityIndex> {
        if !indexes.contains_key(id) {
            let content = read_content(self.reader, id)?;
            indexes.insert(id.clone(), SimilarityIndex::new(&content));
        }

        Ok(&indexes[id])
    }

    // the smaller blob can share at most all of its bytes
    fn may_reach_threshold(&self, a: usize, b: usize) -> bool {
        let (min, max) = (a.min(b), a.max(b));
        max == 0 || min * 100 / max >= self.threshold as usize
    }
}
