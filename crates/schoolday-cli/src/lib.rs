//! Schoolday CLI library.
//!
//! File loading and plain-text rendering shared by the `schoolday-cli`
//! subcommands.

pub mod load;
pub mod render;
