use serde::Serialize;

use neuropath_core::model::{Category, Question};
use neuropath_core::quiz::QuizProgress;

/// One selectable option as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Index to pass back to `QuizSession::answer`.
    pub index: usize,
    pub text: String,
    pub category: Category,
}

/// Everything needed to render the current question and the progress bar.
///
/// Plain data only; the presentation layer decides how to format it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub progress: QuizProgress,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(question: &Question, progress: QuizProgress) -> Self {
        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| OptionView {
                index,
                text: option.text().to_string(),
                category: option.category(),
            })
            .collect();
        Self {
            index: question.index(),
            prompt: question.prompt().to_string(),
            options,
            progress,
        }
    }

    /// Progress bar width in percent.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress.percent()
    }
}
