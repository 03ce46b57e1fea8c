//! Git-compatible unified diffs between two tree snapshots
//!
//! A snapshot is a sorted listing of `TreeEntry` values whose blob content
//! lives in an object space reachable through `ObjectReader`. The
//! `DiffFormatter` compares two snapshots and writes `git diff` output.

pub mod areas;
pub mod artifacts;
pub mod commands;
