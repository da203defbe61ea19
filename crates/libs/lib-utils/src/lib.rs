//! # Utilities Library
//!
//! Shared utility functions for environment variables and input validation.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};
pub use validation::{validate_min_length, validate_no_whitespace, validate_not_empty};
