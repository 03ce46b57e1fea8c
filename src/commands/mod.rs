//! Command implementations
//!
//! Commands are `Repository` methods that write their output through the
//! repository's writer.

pub mod porcelain;
