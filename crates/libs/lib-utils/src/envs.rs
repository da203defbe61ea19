//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an environment variable, falling back to `default` when unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Parse an environment variable, falling back to `default` only when it is unset.
///
/// A value that is set but does not parse is an error rather than silently ignored.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

/// Read a `1/0`, `true/false`, `yes/no`, `on/off` flag.
pub fn get_env_bool(name: &'static str, default: bool) -> Result<bool, Error> {
    let val = match env::var(name) {
        Ok(val) => val,
        Err(_) => return Ok(default),
    };
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        "" => Ok(default),
        _ => Err(Error::WrongFormat(name)),
    }
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "environment variable {name} is not set"),
            Error::WrongFormat(name) => write!(fmt, "environment variable {name} has an invalid value"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name so they can run in parallel.

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        assert_eq!(get_env_parse_or::<u64>("LIB_UTILS_TEST_UNSET_U64", 30), Ok(30));
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("LIB_UTILS_TEST_GARBAGE_U64", "thirty");
        assert_eq!(
            get_env_parse_or::<u64>("LIB_UTILS_TEST_GARBAGE_U64", 30),
            Err(Error::WrongFormat("LIB_UTILS_TEST_GARBAGE_U64"))
        );
    }

    #[test]
    fn test_bool_flags() {
        env::set_var("LIB_UTILS_TEST_FLAG_ON", "Yes");
        assert_eq!(get_env_bool("LIB_UTILS_TEST_FLAG_ON", false), Ok(true));
        assert_eq!(get_env_bool("LIB_UTILS_TEST_FLAG_UNSET", true), Ok(true));
        env::set_var("LIB_UTILS_TEST_FLAG_BAD", "maybe");
        assert!(get_env_bool("LIB_UTILS_TEST_FLAG_BAD", true).is_err());
    }

    #[test]
    fn test_get_env_or_ignores_blank() {
        env::set_var("LIB_UTILS_TEST_BLANK", "  ");
        assert_eq!(get_env_or("LIB_UTILS_TEST_BLANK", "fallback"), "fallback");
    }
}
