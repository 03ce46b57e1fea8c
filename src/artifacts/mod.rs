//! Git data structures and algorithms
//!
//! - `core`: Shared output utilities (pager and color adapters)
//! - `diff`: Change detection and patch rendering
//! - `objects`: Git object types (blob, tree entry, modes, ids)

pub mod core;
pub mod diff;
pub mod objects;
