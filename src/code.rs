//! Knowledge-point code extraction from source filenames.
//!
//! A filename like `c5.1.1-renal-physiology.txt` carries its hierarchical
//! code (`C5.1.1`) as a leading prefix. Extraction is two-pass: a loose
//! regex pulls the leading letter-and-digits prefix, then the normalized
//! result is re-validated against the strict `<letter><n>.<n>.<n>` grammar
//! so partial matches like `c5.1` never become keys.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SkipReason;

static CODE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][0-9.]+").unwrap());

static CODE_STRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]+\.[0-9]+\.[0-9]+$").unwrap());

/// Derive the normalized knowledge-point code from a filename.
///
/// Returns the skip reason when the filename carries no code prefix or the
/// extracted prefix fails strict validation. Neither case is an error.
pub fn extract_code(file_name: &str) -> Result<String, SkipReason> {
    let Some(m) = CODE_PREFIX.find(file_name) else {
        return Err(SkipReason::NoCodeMatch);
    };

    // The loose match swallows the dot before the extension for names like
    // `c5.1.1.txt`; strip it before validating.
    let code = m.as_str().trim_end_matches('.').to_uppercase();

    if CODE_STRICT.is_match(&code) {
        Ok(code)
    } else {
        Err(SkipReason::InvalidCode(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_and_normalizes_code() {
        assert_eq!(extract_code("c5.1.1-renal.txt"), Ok("C5.1.1".to_string()));
        assert_eq!(extract_code("C12.3.45 notes.txt"), Ok("C12.3.45".to_string()));
    }

    #[test]
    fn test_trailing_extension_dot_is_stripped() {
        assert_eq!(extract_code("c5.1.1.txt"), Ok("C5.1.1".to_string()));
    }

    #[test]
    fn test_no_letter_prefix_is_no_match() {
        assert_eq!(extract_code("5.1.1.txt"), Err(SkipReason::NoCodeMatch));
        assert_eq!(extract_code("notes.txt"), Err(SkipReason::NoCodeMatch));
    }

    #[test]
    fn test_two_segment_code_fails_strict_validation() {
        assert_eq!(
            extract_code("c5.1.txt"),
            Err(SkipReason::InvalidCode("C5.1".to_string()))
        );
    }

    #[test]
    fn test_four_segment_code_fails_strict_validation() {
        assert!(matches!(
            extract_code("c5.1.1.2-extra.txt"),
            Err(SkipReason::InvalidCode(_))
        ));
    }
}
