//! Schoolday Observability
//!
//! Console logging for the library and the CLI. Everything in the workspace
//! logs through `tracing` macros; this crate only installs the subscriber.

mod basic_logging;

pub use basic_logging::{init_basic_console_logging, init_json_logging};
