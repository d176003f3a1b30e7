use regex::{Regex, RegexBuilder};

use super::error::ConfigError;

/// Longest prefix of a rejected pattern quoted back in the error.
const ERROR_PATTERN_CHARS: usize = 40;

/// Case-insensitive wildcard pattern: `*` is any run of characters, `?` exactly one.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');

        // Metacharacters are escaped; an oversized pattern can still exceed the size limit
        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.chars().take(ERROR_PATTERN_CHARS).collect(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        WildcardPattern::new(pattern).unwrap().matches(name)
    }

    #[test]
    fn test_star_matches_any_run() {
        assert!(matches("Konar*", "Konar quo Maten"));
        assert!(matches("Konar*", "Konar"));
        assert!(matches("*Maten", "Konar quo Maten"));
        assert!(matches("*", ""));
        assert!(!matches("Konar*", "Vannaka"));
    }

    #[test]
    fn test_question_mark_is_exactly_one() {
        assert!(matches("A?a", "Aya"));
        assert!(!matches("A?a", "Aa"));
        assert!(!matches("A?a", "Ayya"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("vannaka", "Vannaka"));
        assert!(matches("KONAR*", "konar quo maten"));
    }

    #[test]
    fn test_whole_name_only() {
        assert!(!matches("Steve", "Steve the Cook"));
        assert!(!matches("Nieve", "Not Nieve"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("Dr. Jekyll (x)", "dr. jekyll (x)"));
        assert!(!matches("Dr. Jekyll", "Drx Jekyll"));
        assert!(matches("a+b", "A+B"));
        assert!(!matches("a+b", "aab"));
        assert!(matches("[x]", "[X]"));
    }

    #[test]
    fn test_oversized_pattern_is_rejected() {
        let err = WildcardPattern::new(&"?".repeat(200_000)).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern.len(), 40),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_as_str_keeps_source() {
        assert_eq!(WildcardPattern::new("Konar*").unwrap().as_str(), "Konar*");
    }
}
