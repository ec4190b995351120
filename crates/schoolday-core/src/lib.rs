//! # Schoolday Core
//!
//! Core types, errors, and utilities shared by the Schoolday crates.
//!
//! - [`errors`]: Application error type with a machine-readable kind
//! - [`labels`]: Vietnamese display strings used across the portal
//! - [`serde`]: Lenient deserialization helpers for upstream JSON
//!
//! # Example
//!
//! ```ignore
//! use schoolday_core::errors::AppError;
//!
//! let error = AppError::missing_context(anyhow::anyhow!("No student selected"));
//! assert_eq!(error.kind.code(), "missing_context");
//! ```

pub mod errors;
pub mod labels;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
