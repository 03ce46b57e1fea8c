//! Git object types and operations
//!
//! Content is addressed by SHA-1 hashes of the serialized object:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree entry**: A path in a flattened snapshot, with its mode and blob id
//!
//! Blobs serialize to the Git object format `<type> <size>\0<content>`,
//! whose hash is the object id.

pub mod blob;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree_entry;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
