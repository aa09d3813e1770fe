//! Identifier validation for table and column names.
//!
//! Values always travel as parameters; identifiers are spliced into the
//! statement text, so every identifier a builder accepts goes through
//! [`assert_valid_sql_identifier`] first.

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Whether `s` is a plain SQL identifier.
///
/// Accepted: ASCII letter or underscore, then ASCII letters, digits or
/// underscores, 1 to 63 characters in total.
///
/// ```
/// use trivia_sql::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("questions"));
/// assert!(is_valid_sql_identifier("type"));
/// assert!(!is_valid_sql_identifier("questions; DROP TABLE categories"));
/// assert!(!is_valid_sql_identifier("2nd"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Panic unless `s` is a valid SQL identifier.
///
/// Identifiers come from code, never from request input, so an invalid one
/// is a programming error.
///
/// # Panics
///
/// Panics with `Invalid SQL {context} name '...'` if the identifier is invalid.
#[inline]
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "Invalid SQL {context} name '{s}': must start with letter/underscore, \
             contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_identifiers_are_valid() {
        for name in ["questions", "categories", "id", "question", "answer", "category", "difficulty", "type", "count"] {
            assert!(is_valid_sql_identifier(name), "{name}");
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_sql_identifier(""));
        assert!(!is_valid_sql_identifier("1question"));
        assert!(!is_valid_sql_identifier("question text"));
        assert!(!is_valid_sql_identifier("questions.id"));
        assert!(!is_valid_sql_identifier("id--"));
        assert!(!is_valid_sql_identifier("(SELECT 1)"));
        assert!(!is_valid_sql_identifier("catégorie"));
        assert!(!is_valid_sql_identifier(&"q".repeat(64)));
        assert!(is_valid_sql_identifier(&"q".repeat(63)));
    }

    #[test]
    #[should_panic(expected = "Invalid SQL sort field name")]
    fn test_assert_panics_with_context() {
        assert_valid_sql_identifier("id; DROP TABLE questions", "sort field");
    }
}
