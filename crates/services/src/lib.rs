#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;
pub mod submission_service;

pub use neuropath_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizSessionError, SubmissionServiceError};
pub use sessions::{OptionView, QuestionView, QuizAnswerResult, QuizSession, QuizSessionService};
pub use submission_service::{SubmissionReceipt, SubmissionService};
