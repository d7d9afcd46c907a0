//! Goal input validation

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Default maximum goal length, in characters after trimming
pub const MAX_GOAL_LENGTH: usize = 1000;

/// Why a raw goal was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("Please enter a goal.")]
    Empty,

    #[error("Goal is too long. Please keep it under {max} characters.")]
    TooLong { max: usize, len: usize },
}

/// A trimmed, non-empty goal within the length limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal(String);

impl Goal {
    /// Trim and validate a raw goal
    ///
    /// Length is counted in characters, not bytes; `max_len` is inclusive.
    pub fn parse(raw: &str, max_len: usize) -> Result<Self, GoalError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!("Goal::parse: empty after trim");
            return Err(GoalError::Empty);
        }

        let len = trimmed.chars().count();
        if len > max_len {
            debug!(len, max_len, "Goal::parse: too long");
            return Err(GoalError::TooLong { max: max_len, len });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let goal = Goal::parse("\n\t  Plan a birthday party  \r\n", MAX_GOAL_LENGTH).unwrap();
        assert_eq!(goal.as_str(), "Plan a birthday party");
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert_eq!(Goal::parse("", MAX_GOAL_LENGTH), Err(GoalError::Empty));
        assert_eq!(Goal::parse("   \n\t", MAX_GOAL_LENGTH), Err(GoalError::Empty));
    }

    #[test]
    fn test_length_boundary_is_inclusive() {
        let exact = "a".repeat(MAX_GOAL_LENGTH);
        assert!(Goal::parse(&exact, MAX_GOAL_LENGTH).is_ok());

        let over = "a".repeat(MAX_GOAL_LENGTH + 1);
        assert_eq!(
            Goal::parse(&over, MAX_GOAL_LENGTH),
            Err(GoalError::TooLong {
                max: MAX_GOAL_LENGTH,
                len: MAX_GOAL_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_length_ignores_surrounding_whitespace() {
        let padded = format!("   {}   ", "b".repeat(MAX_GOAL_LENGTH));
        assert!(Goal::parse(&padded, MAX_GOAL_LENGTH).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 1000 two-byte characters
        let goal = "é".repeat(MAX_GOAL_LENGTH);
        assert!(Goal::parse(&goal, MAX_GOAL_LENGTH).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GoalError::Empty.to_string(), "Please enter a goal.");
        assert_eq!(
            GoalError::TooLong { max: 1000, len: 1200 }.to_string(),
            "Goal is too long. Please keep it under 1000 characters."
        );
    }
}
