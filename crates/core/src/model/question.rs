use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Category;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question {index} has no options")]
    NoOptions { index: usize },

    #[error("option {option} of question {index} has empty text")]
    EmptyOptionText { index: usize, option: usize },
}

/// A selectable answer: display text plus the category it counts towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    text: String,
    category: Category,
}

impl QuizOption {
    #[must_use]
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}

/// A quiz question at a fixed position in the question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    index: usize,
    prompt: String,
    options: Vec<QuizOption>,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt,
    /// `QuestionError::NoOptions` when `options` is empty, and
    /// `QuestionError::EmptyOptionText` when an option has blank text.
    pub fn new(
        index: usize,
        prompt: impl Into<String>,
        options: Vec<QuizOption>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions { index });
        }
        if let Some(option) = options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(QuestionError::EmptyOptionText { index, option });
        }
        Ok(Self {
            index,
            prompt,
            options,
        })
    }

    /// 0-based position in the quiz.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, option_index: usize) -> Option<&QuizOption> {
        self.options.get(option_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new(0, "  ", vec![QuizOption::new("A", Category::Visual)])
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_missing_options() {
        let err = Question::new(3, "Pick one", Vec::new()).unwrap_err();
        assert_eq!(err, QuestionError::NoOptions { index: 3 });
    }

    #[test]
    fn rejects_blank_option_text() {
        let err = Question::new(
            1,
            "Pick one",
            vec![
                QuizOption::new("Charts", Category::Visual),
                QuizOption::new("", Category::Logical),
            ],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyOptionText { index: 1, option: 1 });
    }

    #[test]
    fn option_lookup_is_bounds_checked() {
        let q = Question::new(0, "Pick one", vec![QuizOption::new("A", Category::Auditory)])
            .unwrap();
        assert_eq!(q.option(0).map(QuizOption::category), Some(Category::Auditory));
        assert!(q.option(1).is_none());
    }
}
