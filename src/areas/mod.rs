//! Storage and repository components
//!
//! - `database`: Loose object database and the object access traits
//! - `memory_database`: Object space kept in memory
//! - `repository`: Ties an object space to an output sink for commands
//! - `workspace`: Snapshots of directories on disk

pub mod database;
pub mod memory_database;
pub mod repository;
pub mod workspace;
