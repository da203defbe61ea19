//! # Endpoint Templates
//!
//! Endpoints are declared as templates (`super-agents/{uid}/assign`) next to the
//! service functions that use them. [`fill_template`] substitutes the placeholders,
//! percent-encoding each value as a single path segment.

use crate::core::error::{AppError, Result};

/// Substitute `{name}` placeholders in `template`.
///
/// Fails when a value is empty, when a placeholder has no value, or when a value is
/// supplied for a placeholder the template does not contain.
///
/// ```rust
/// use dashboard::services::api::endpoints::fill_template;
///
/// let path = fill_template("super-agents/{uid}/sub-agents", &[("uid", "SA 1")]).unwrap();
/// assert_eq!(path, "super-agents/SA%201/sub-agents");
/// ```
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut path = template.to_string();

    for (name, value) in values {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("`{name}` must not be empty")));
        }
        let placeholder = format!("{{{name}}}");
        if !path.contains(&placeholder) {
            return Err(AppError::Validation(format!(
                "endpoint `{template}` has no `{placeholder}` placeholder"
            )));
        }
        path = path.replace(&placeholder, &urlencoding::encode(value));
    }

    if let Some(start) = path.find('{') {
        let rest = &path[start..];
        let end = rest.find('}').map_or(rest.len(), |i| i + 1);
        return Err(AppError::Validation(format!(
            "endpoint `{template}` is missing a value for {}",
            &rest[..end]
        )));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_all_placeholders() {
        let path = fill_template(
            "group-agents/{uid}/members/{memberUid}",
            &[("uid", "G-1"), ("memberUid", "A/2")],
        )
        .unwrap();
        assert_eq!(path, "group-agents/G-1/members/A%2F2");
    }

    #[test]
    fn test_rejects_empty_value() {
        assert!(matches!(
            fill_template("partners/{uid}", &[("uid", " ")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_missing_value() {
        let err = fill_template("partners/{uid}", &[]).unwrap_err();
        assert!(err.to_string().contains("{uid}"));
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        assert!(fill_template("partners", &[("uid", "P-1")]).is_err());
    }

    #[test]
    fn test_templates_without_placeholders_pass_through() {
        assert_eq!(fill_template("partners/statistics", &[]).unwrap(), "partners/statistics");
    }
}
