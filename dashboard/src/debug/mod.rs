//! # Logging
//!
//! Structured logging for the dashboard access layer: stderr output plus an
//! optional daily-rotated file under `logs/`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dashboard::debug::{self, LogConfig};
//!
//! let _guard = debug::init_logger(&LogConfig::from_env());
//! tracing::info!(resource = "super-agents", "Loading page");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dashboard=debug,info`)
//! - `DASHBOARD_LOG_DIR`: Directory for the log file (default: `logs`)
//! - `DASHBOARD_LOG_FILE_ENABLED`: Also write the log file (`true`/`false`, default `false`)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;
