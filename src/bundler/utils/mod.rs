//! Shared helpers: filesystem operations, process execution, version parsing.

pub mod fs;
pub mod process;
pub mod version;
