mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizSessionError;
pub use service::{QuizAnswerResult, QuizSession};
pub use view::{OptionView, QuestionView};
pub use workflow::QuizSessionService;
