mod category;
mod ids;
mod outcome;
mod question;
mod submission;
mod tally;

pub use category::{Category, CategoryError};
pub use ids::SubmissionId;
pub use outcome::{BALANCED_DESCRIPTION, LearningStyle, QuizResult};
pub use question::{Question, QuestionError, QuizOption};
pub use submission::{
    EmailAddress, FormFields, NewSubmission, Submission, SubmissionError, SubmissionKind,
};
pub use tally::ScoreTally;
