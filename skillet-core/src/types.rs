use serde::{Deserialize, Serialize};
use std::fmt;

/// Recipe difficulty level. Records that omit or garble the field fall back
/// to [`Difficulty::Medium`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a difficulty label, ignoring case. Unknown labels are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe as mapped from the external API, before it has been assigned an
/// identity or timestamps by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub calories_per_serving: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_ignores_case() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("MEDIUM"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse(" Hard "), Some(Difficulty::Hard));
    }

    #[test]
    fn test_parse_unknown_difficulty() {
        assert_eq!(Difficulty::parse("expert"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn test_default_difficulty_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
