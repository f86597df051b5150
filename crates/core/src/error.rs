use thiserror::Error;

use crate::model::{CategoryError, QuestionError, SubmissionError};
use crate::quiz::{InvalidStateError, QuizDefinitionError};

/// Umbrella error for callers that do not care which core check failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
    #[error(transparent)]
    Definition(#[from] QuizDefinitionError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
