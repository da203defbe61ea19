//! # Shared Utility Functions
//!
//! ## Credential Masking
//!
//! Functions for showing API keys and secrets without leaking them:
//! - [`mask_secret`] - keep the first N and last M characters, hide the rest
//! - [`redact`] - [`mask_secret`] with 4/4 defaults
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::mask_secret;
//!
//! let key = "pk_live_8W6QginkhTTxoP2d";
//! assert_eq!(mask_secret(key, 4, 4), "pk_l…oP2d");
//! ```

/// Mask a credential, showing only the first `prefix_len` and last `suffix_len` characters.
///
/// Values too short to keep both ends while hiding something are fully masked.
///
/// # Examples
///
/// ```rust
/// use shared::utils::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijkl", 2, 2), "ab…kl");
/// assert_eq!(mask_secret("short", 4, 4), "*****");
/// assert_eq!(mask_secret("", 4, 4), "");
/// ```
pub fn mask_secret(secret: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();

    if len <= prefix_len + suffix_len {
        return "*".repeat(len);
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[len - suffix_len..].iter().collect();

    format!("{}…{}", prefix, suffix)
}

/// Mask a credential with a 4-character prefix and suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::redact;
///
/// assert_eq!(redact("0123456789abcdef"), "0123…cdef");
/// ```
pub fn redact(secret: &str) -> String {
    mask_secret(secret, 4, 4)
}
