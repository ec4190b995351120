//! # Schoolday Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`api`]: Backend location and request timeout
//! - [`schedule`]: Fallback period table, break inference and clock tick
//!
//! # Example
//!
//! ```ignore
//! use schoolday_config::{ApiConfig, ScheduleConfig};
//!
//! schoolday_config::load_dotenv();
//! let api = ApiConfig::from_env();
//! let schedule = ScheduleConfig::from_env();
//! ```

pub mod api;
pub mod schedule;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use schedule::{FallbackCatalog, ScheduleConfig};

/// Load a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }
}
