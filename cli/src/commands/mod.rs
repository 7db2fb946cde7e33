//! CLI command implementations
//!
//! Each command module implements a specific unjoin CLI command.

pub mod check;
pub mod init;
pub mod map;
