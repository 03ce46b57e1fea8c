//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `diff`: Show the patch between two directory snapshots

pub mod diff;
