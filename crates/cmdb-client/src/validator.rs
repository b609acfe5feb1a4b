//! Search pattern validation shared by all resource searches.
//!
//! The backend interprets search patterns as regular expressions. A pattern
//! that does not compile is escaped into a literal match instead of being
//! sent as is.

use regex::Regex;
use tracing::debug;

use crate::error::ValidationError;

/// Keep a valid regular expression, escape an invalid one.
///
/// # Example
///
/// ```
/// use cmdb_client::validator::validate_regex;
///
/// assert_eq!(validate_regex("srv-[0-9]+"), "srv-[0-9]+");
/// assert_eq!(validate_regex("db(01"), "db\\(01");
/// ```
pub fn validate_regex(pattern: &str) -> String {
    match Regex::new(pattern) {
        Ok(_) => pattern.to_string(),
        Err(e) => {
            debug!(pattern = %pattern, error = %e, "Escaping invalid search pattern");
            regex::escape(pattern)
        }
    }
}

/// Check if a segment would be removed by URL path normalization.
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Prepare a pattern for a `find` request.
///
/// The pattern is validated, then trimmed. An empty result is rejected,
/// since it would address the list endpoint instead. A pattern of only dots
/// is grouped, so it stays a path segment and matches the same names.
pub fn search_pattern(pattern: &str) -> Result<String, ValidationError> {
    let pattern = validate_regex(pattern).trim().to_string();
    if pattern.is_empty() {
        return Err(ValidationError::EmptyPattern);
    }
    if is_dot_segment(&pattern) {
        return Ok(format!("(?:{})", pattern));
    }
    Ok(pattern)
}

/// Check that a name can be sent as one path segment.
pub fn path_name(name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() || is_dot_segment(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patterns_unchanged() {
        assert_eq!(validate_regex("foo*"), "foo*");
        assert_eq!(validate_regex("^web-(01|02)$"), "^web-(01|02)$");
        assert_eq!(validate_regex("plain"), "plain");
    }

    #[test]
    fn test_invalid_patterns_escaped() {
        assert_eq!(validate_regex("*foo"), "\\*foo");
        assert_eq!(validate_regex("[rack"), "\\[rack");

        let escaped = validate_regex("a(b");
        assert!(Regex::new(&escaped).unwrap().is_match("a(b"));
    }

    #[test]
    fn test_search_pattern_trims() {
        assert_eq!(search_pattern("  switch  ").unwrap(), "switch");
    }

    #[test]
    fn test_search_pattern_rejects_empty() {
        assert_eq!(search_pattern(""), Err(ValidationError::EmptyPattern));
        assert_eq!(search_pattern("   "), Err(ValidationError::EmptyPattern));
    }

    #[test]
    fn test_search_pattern_groups_dot_segments() {
        assert_eq!(search_pattern(".").unwrap(), "(?:.)");
        assert_eq!(search_pattern(" .. ").unwrap(), "(?:..)");
        assert_eq!(search_pattern("...").unwrap(), "...");

        let grouped = Regex::new(&search_pattern(".").unwrap()).unwrap();
        assert!(grouped.is_match("x"));
        assert!(!grouped.is_match(""));
    }

    #[test]
    fn test_path_name() {
        assert_eq!(path_name("network"), Ok("network"));
        assert_eq!(path_name(".hidden"), Ok(".hidden"));
        assert_eq!(path_name(""), Err(ValidationError::InvalidName(String::new())));
        assert_eq!(path_name("."), Err(ValidationError::InvalidName(".".to_string())));
        assert_eq!(path_name(".."), Err(ValidationError::InvalidName("..".to_string())));
    }
}
