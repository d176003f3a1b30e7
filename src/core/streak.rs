//! Extracts the slayer task streak from game messages.
//!
//! The game reports the streak on task completion, e.g.
//! "You've completed 49 tasks and received 15 points, giving you a total of 500".

use lazy_static::lazy_static;
use regex::Regex;

use super::error::StreakError;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: StreakExtractor = StreakExtractor::new();
}

/// Parser for the "<n> tasks" streak fragment.
pub struct StreakExtractor {
    streak_regex: Regex,
}

impl StreakExtractor {
    pub fn new() -> Self {
        // ASCII digits only, comma separators allowed between digits: "1,234 tasks"
        let streak_regex =
            Regex::new(r"[0-9](?:[0-9,]*[0-9])? tasks").expect("Invalid streak regex");

        Self { streak_regex }
    }

    /// Return the streak from the first "<n> tasks" occurrence in `message`.
    pub fn extract(&self, message: &str) -> Result<u32, StreakError> {
        let found = self.streak_regex.find(message).ok_or(StreakError::NotFound)?;

        let digits: String = found.as_str().chars().filter(char::is_ascii_digit).collect();
        digits
            .parse::<u32>()
            .map_err(|_| StreakError::Overflow(digits))
    }
}

impl Default for StreakExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract using a shared, lazily compiled extractor.
pub fn extract_streak(message: &str) -> Result<u32, StreakError> {
    DEFAULT_EXTRACTOR.extract(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_completion_message() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("You've completed 49 tasks in a row."), Ok(49));
        assert_eq!(
            extractor.extract(
                "You've completed 149 tasks and received 15 points, giving you a total of 800; return to a Slayer master."
            ),
            Ok(149)
        );
    }

    #[test]
    fn test_no_streak_is_not_found() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("Well done."), Err(StreakError::NotFound));
        assert_eq!(extractor.extract("You have 12 task left."), Err(StreakError::NotFound));
        assert_eq!(extractor.extract("tasks 12"), Err(StreakError::NotFound));
        assert_eq!(extractor.extract(""), Err(StreakError::NotFound));
    }

    #[test]
    fn test_match_is_case_sensitive_with_single_space() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("12 Tasks"), Err(StreakError::NotFound));
        assert_eq!(extractor.extract("12  tasks"), Err(StreakError::NotFound));
        assert_eq!(extractor.extract("12tasks"), Err(StreakError::NotFound));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("7 tasks, then 8 tasks"), Ok(7));
    }

    #[test]
    fn test_leading_zeros_and_zero() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("007 tasks"), Ok(7));
        assert_eq!(extractor.extract("0 tasks"), Ok(0));
    }

    #[test]
    fn test_digit_groups_join_into_one_number() {
        let extractor = StreakExtractor::new();
        assert_eq!(extractor.extract("You've completed 1,234 tasks"), Ok(1234));
        // A trailing comma is not part of the number
        assert_eq!(extractor.extract("Tasks: 5, 6 tasks"), Ok(6));
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        let extractor = StreakExtractor::new();
        // Arabic-Indic digits
        assert_eq!(extractor.extract("\u{0664}\u{0669} tasks"), Err(StreakError::NotFound));
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        let extractor = StreakExtractor::new();
        assert_eq!(
            extractor.extract("99999999999 tasks"),
            Err(StreakError::Overflow("99999999999".to_string()))
        );
        assert_eq!(extractor.extract("4294967295 tasks"), Ok(u32::MAX));
    }

    #[test]
    fn test_shared_extractor() {
        assert_eq!(extract_streak("50 tasks"), Ok(50));
        assert_eq!(extract_streak("nothing"), Err(StreakError::NotFound));
    }
}
