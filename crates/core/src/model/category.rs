use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown learning-style category: {0:?}")]
    Unknown(String),
}

//
// ─── CATEGORY ─────────────────────────────────────────────────────────────────
//

/// One of the three learning-style dimensions measured by the quiz.
///
/// Declaration order doubles as the rank order used when two categories
/// end up with the same score: visual ranks before auditory, auditory before
/// logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Images, diagrams, spatial understanding.
    Visual,
    /// Listening, discussion, audio.
    Auditory,
    /// Structure, patterns, reasoning.
    Logical,
}

impl Category {
    /// Every category, in rank order.
    pub const ALL: [Category; 3] = [Category::Visual, Category::Auditory, Category::Logical];

    /// Lower-case label, e.g. `visual`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Visual => "visual",
            Category::Auditory => "auditory",
            Category::Logical => "logical",
        }
    }

    /// Label with an upper-case first letter, e.g. `Visual`.
    #[must_use]
    pub fn capitalized(self) -> &'static str {
        match self {
            Category::Visual => "Visual",
            Category::Auditory => "Auditory",
            Category::Logical => "Logical",
        }
    }

    /// Sentence describing how a learner of this style learns best.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Category::Visual => {
                "You learn best through images, diagrams and spatial understanding."
            }
            Category::Auditory => {
                "You prefer listening to explanations, discussions and audio lessons."
            }
            Category::Logical => {
                "You excel when information is organized logically with patterns and reasoning."
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("visual".parse::<Category>().unwrap(), Category::Visual);
        assert_eq!(" Auditory ".parse::<Category>().unwrap(), Category::Auditory);
        assert_eq!("LOGICAL".parse::<Category>().unwrap(), Category::Logical);
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "kinesthetic".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryError::Unknown("kinesthetic".into()));
    }

    #[test]
    fn serializes_as_lowercase_label() {
        let json = serde_json::to_string(&Category::Auditory).unwrap();
        assert_eq!(json, "\"auditory\"");
    }
}
