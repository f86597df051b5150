//! Learning-style quiz: question catalog, engine state machine and result resolution.

pub mod catalog;
mod engine;
mod resolve;

pub use engine::{InvalidStateError, QuizDefinitionError, QuizEngine, QuizProgress};
pub use resolve::resolve;
