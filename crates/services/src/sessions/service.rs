use chrono::{DateTime, Utc};
use neuropath_core::model::{Category, QuizResult};
use neuropath_core::quiz::{QuizEngine, QuizProgress};

use crate::error::QuizSessionError;
use super::view::QuestionView;

//
// ─── ANSWER RESULT ─────────────────────────────────────────────────────────────
//

/// Outcome of answering one question within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerResult {
    pub question_index: usize,
    pub category: Category,
    pub progress: QuizProgress,
    /// Set once the last question has been answered.
    pub result: Option<QuizResult>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's pass through the quiz.
///
/// Wraps a fresh `QuizEngine` and records when the pass started and ended.
/// The result is resolved once, when the final answer comes in.
#[derive(Debug, Clone)]
pub struct QuizSession {
    engine: QuizEngine,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    result: Option<QuizResult>,
}

impl QuizSession {
    #[must_use]
    pub fn new(engine: QuizEngine, started_at: DateTime<Utc>) -> Self {
        Self {
            engine,
            started_at,
            completed_at: None,
            result: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.engine.progress()
    }

    /// The resolved result, once the quiz is complete.
    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// View of the question waiting for an answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` once the quiz is complete.
    pub fn current_view(&self) -> Result<QuestionView, QuizSessionError> {
        let question = self.engine.current()?;
        Ok(QuestionView::from_question(question, self.engine.progress()))
    }

    /// Answer the current question with the option at `option_index`.
    ///
    /// `answered_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` if the quiz is already
    /// complete or the option does not exist.
    pub fn answer(
        &mut self,
        option_index: usize,
        answered_at: DateTime<Utc>,
    ) -> Result<QuizAnswerResult, QuizSessionError> {
        let question_index = self.engine.current_index();
        let category = self.engine.answer_option(option_index)?;
        self.after_answer(question_index, category, answered_at)
    }

    /// Answer the current question directly with a category.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` if the quiz is already complete.
    pub fn answer_category(
        &mut self,
        category: Category,
        answered_at: DateTime<Utc>,
    ) -> Result<QuizAnswerResult, QuizSessionError> {
        let question_index = self.engine.current_index();
        self.engine.record_answer(category)?;
        self.after_answer(question_index, category, answered_at)
    }

    fn after_answer(
        &mut self,
        question_index: usize,
        category: Category,
        answered_at: DateTime<Utc>,
    ) -> Result<QuizAnswerResult, QuizSessionError> {
        if self.engine.is_complete() && self.result.is_none() {
            let result = self.engine.resolve_result()?;
            log::info!("quiz completed: {}", result.title());
            self.completed_at = Some(answered_at);
            self.result = Some(result);
        }

        Ok(QuizAnswerResult {
            question_index,
            category,
            progress: self.engine.progress(),
            result: self.result.clone(),
        })
    }
}
