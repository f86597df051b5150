use std::sync::Arc;

use neuropath_core::model::Category;
use neuropath_core::quiz::QuizEngine;

use crate::Clock;
use crate::error::QuizSessionError;
use crate::submission_service::{SubmissionReceipt, SubmissionService};

use super::service::{QuizAnswerResult, QuizSession};

/// Orchestrates quiz sessions and the post-quiz lesson unlock.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    submissions: Arc<SubmissionService>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, submissions: Arc<SubmissionService>) -> Self {
        Self { clock, submissions }
    }

    /// Start a fresh session over the built-in questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Definition` if the question catalog is invalid.
    pub fn start_session(&self) -> Result<QuizSession, QuizSessionError> {
        let engine = QuizEngine::neuropath()?;
        log::debug!("starting quiz with {} questions", engine.question_count());
        Ok(QuizSession::new(engine, self.clock.now()))
    }

    /// Answer the current question with the option at `option_index`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` if the session is finished or
    /// the option does not exist.
    pub fn answer(
        &self,
        session: &mut QuizSession,
        option_index: usize,
    ) -> Result<QuizAnswerResult, QuizSessionError> {
        session.answer(option_index, self.clock.now())
    }

    /// Answer the current question with an explicit category.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` if the session is finished.
    pub fn answer_category(
        &self,
        session: &mut QuizSession,
        category: Category,
    ) -> Result<QuizAnswerResult, QuizSessionError> {
        session.answer_category(category, self.clock.now())
    }

    /// Store the email entered under the result's call to action.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::InvalidState` if the session is not complete,
    /// and `QuizSessionError::Submission` for a bad email or storage failure.
    pub async fn unlock_lesson(
        &self,
        session: &QuizSession,
        email: &str,
    ) -> Result<SubmissionReceipt, QuizSessionError> {
        let result = session.engine().resolve_result()?;
        let receipt = self
            .submissions
            .submit_lesson_unlock(email, result.title())
            .await?;
        Ok(receipt)
    }
}
