use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Description used when no category scored at all.
pub const BALANCED_DESCRIPTION: &str =
    "You have a balanced learning style across visual, auditory and logical dimensions.";

/// The dominant style derived from a final tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearningStyle {
    /// One category strictly ahead of the others.
    Single { category: Category },
    /// The top two ranked categories share the highest score.
    Combined {
        primary: Category,
        secondary: Category,
    },
    /// Nothing scored.
    Balanced,
}

impl LearningStyle {
    /// Human-readable title, e.g. `Visual-Auditory learner`.
    #[must_use]
    pub fn title(self) -> String {
        match self {
            LearningStyle::Single { category } => format!("{} learner", category.capitalized()),
            LearningStyle::Combined { primary, secondary } => format!(
                "{}-{} learner",
                primary.capitalized(),
                secondary.capitalized()
            ),
            LearningStyle::Balanced => "Balanced learner".to_string(),
        }
    }

    #[must_use]
    pub fn description(self) -> String {
        match self {
            LearningStyle::Single { category } => category.description().to_string(),
            LearningStyle::Combined { primary, secondary } => format!(
                "{} At the same time, you also benefit from {}",
                primary.description(),
                lower_first(secondary.description())
            ),
            LearningStyle::Balanced => BALANCED_DESCRIPTION.to_string(),
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Final, immutable quiz outcome shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    style: LearningStyle,
    title: String,
    description: String,
}

impl QuizResult {
    #[must_use]
    pub fn from_style(style: LearningStyle) -> Self {
        Self {
            style,
            title: style.title(),
            description: style.description(),
        }
    }

    #[must_use]
    pub fn style(&self) -> LearningStyle {
        self.style
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Banner line for the result screen, e.g. `You're a Visual learner!`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("You're a {}!", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_description_lowercases_secondary() {
        let style = LearningStyle::Combined {
            primary: Category::Logical,
            secondary: Category::Auditory,
        };
        assert_eq!(
            style.description(),
            "You excel when information is organized logically with patterns and reasoning. \
             At the same time, you also benefit from you prefer listening to explanations, \
             discussions and audio lessons."
        );
    }

    #[test]
    fn headline_wraps_title() {
        let result = QuizResult::from_style(LearningStyle::Single {
            category: Category::Auditory,
        });
        assert_eq!(result.title(), "Auditory learner");
        assert_eq!(result.headline(), "You're a Auditory learner!");
    }

    #[test]
    fn lower_first_handles_empty() {
        assert_eq!(lower_first(""), "");
        assert_eq!(lower_first("Abc"), "abc");
    }
}
