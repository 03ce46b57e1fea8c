//! Tree comparison and unified patch rendering
//!
//! The pipeline runs in this order:
//!
//! - `tree_diff`: pairs two sorted listings into ADD/DELETE/MODIFY records
//! - `rename_detector`: turns DELETE/ADD pairs into RENAME or COPY records
//! - `sequence` and `myers`: split blob content into lines and compute the
//!   shortest edit script between them
//! - `hunk`: groups edits with their context lines
//! - `header`: renders the per-file git header lines
//! - `formatter`: drives the whole pipeline and applies the path, change-type
//!   and content filters before anything reaches the sink

pub mod abbreviation;
pub mod delta_filter;
pub mod diff_entry;
pub mod diff_error;
pub mod edit;
pub mod formatter;
pub mod header;
pub mod hunk;
pub mod myers;
pub mod path_filter;
pub mod rename_detector;
pub mod sequence;
pub mod tree_diff;
