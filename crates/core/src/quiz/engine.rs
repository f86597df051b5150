use serde::Serialize;
use thiserror::Error;

use crate::model::{Category, Question, QuestionError, QuizResult, ScoreTally};
use crate::quiz::catalog;
use crate::quiz::resolve;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// An engine operation was called outside its valid state window.
///
/// These are caller bugs; the engine state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateError {
    #[error("question index {index} is out of range (quiz has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("option index {index} is out of range (question has {options} options)")]
    OptionOutOfRange { index: usize, options: usize },

    #[error("quiz is already complete ({total} of {total} answered)")]
    AlreadyComplete { total: usize },

    #[error("quiz is not complete ({answered} of {total} answered)")]
    NotComplete { answered: usize, total: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDefinitionError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("question at position {position} reports index {index}")]
    MisplacedQuestion { position: usize, index: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Read-only view of how far through the quiz the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Share of questions answered, in percent (0-100).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.answered as f64 / self.total as f64 * 100.0
    }
}

//
// ─── ENGINE ───────────────────────────────────────────────────────────────────
//

/// Drives one pass through a quiz: present, answer, resolve.
///
/// Questions are visited strictly in order. Every answer bumps exactly one
/// category in the tally and moves to the next question, so the tally total
/// always equals the number of answered questions.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    current: usize,
    tally: ScoreTally,
}

impl QuizEngine {
    /// Create an engine over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizDefinitionError::Empty` for an empty list and
    /// `QuizDefinitionError::MisplacedQuestion` when a question's index does
    /// not match its position.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizDefinitionError> {
        if questions.is_empty() {
            return Err(QuizDefinitionError::Empty);
        }
        if let Some((position, q)) = questions
            .iter()
            .enumerate()
            .find(|(position, q)| q.index() != *position)
        {
            return Err(QuizDefinitionError::MisplacedQuestion {
                position,
                index: q.index(),
            });
        }
        Ok(Self {
            questions,
            current: 0,
            tally: ScoreTally::new(),
        })
    }

    /// Fresh engine over the built-in NeuroPath questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizDefinitionError` if the catalog fails validation.
    pub fn neuropath() -> Result<Self, QuizDefinitionError> {
        Self::new(catalog::neuropath_questions()?)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Question at `index`, for display.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError::QuestionOutOfRange` unless `index < question_count()`.
    pub fn present(&self, index: usize) -> Result<&Question, InvalidStateError> {
        self.questions
            .get(index)
            .ok_or(InvalidStateError::QuestionOutOfRange {
                index,
                total: self.questions.len(),
            })
    }

    /// The question awaiting an answer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError::AlreadyComplete` once every question is answered.
    pub fn current(&self) -> Result<&Question, InvalidStateError> {
        self.questions
            .get(self.current)
            .ok_or(InvalidStateError::AlreadyComplete {
                total: self.questions.len(),
            })
    }

    /// Count an answer for `category` and advance to the next question.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError::AlreadyComplete` after the last question;
    /// the tally is not touched in that case.
    pub fn record_answer(&mut self, category: Category) -> Result<(), InvalidStateError> {
        if self.is_complete() {
            return Err(InvalidStateError::AlreadyComplete {
                total: self.questions.len(),
            });
        }
        self.tally.increment(category);
        self.current += 1;
        log::debug!(
            "recorded {category} answer ({}/{})",
            self.current,
            self.questions.len()
        );
        Ok(())
    }

    /// Record the option at `option_index` of the current question.
    ///
    /// Returns the category that was counted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError::AlreadyComplete` after the last question
    /// and `InvalidStateError::OptionOutOfRange` for an unknown option.
    pub fn answer_option(&mut self, option_index: usize) -> Result<Category, InvalidStateError> {
        let question = self.current()?;
        let category = question
            .option(option_index)
            .map(|option| option.category())
            .ok_or(InvalidStateError::OptionOutOfRange {
                index: option_index,
                options: question.options().len(),
            })?;
        self.record_answer(category)?;
        Ok(category)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        QuizProgress {
            answered: self.current,
            total,
            remaining: total.saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Resolve the final tally into a result. Does not change engine state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateError::NotComplete` while questions remain.
    pub fn resolve_result(&self) -> Result<QuizResult, InvalidStateError> {
        if !self.is_complete() {
            return Err(InvalidStateError::NotComplete {
                answered: self.current,
                total: self.questions.len(),
            });
        }
        Ok(resolve::resolve(&self.tally))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizOption;
    use crate::model::Category::{Auditory, Logical, Visual};

    fn play(answers: &[Category]) -> QuizEngine {
        let mut engine = QuizEngine::neuropath().unwrap();
        for category in answers {
            engine.record_answer(*category).unwrap();
        }
        engine
    }

    #[test]
    fn completion_flips_only_after_last_answer() {
        let mut engine = QuizEngine::neuropath().unwrap();
        for index in 0..5 {
            assert_eq!(engine.current_index(), index);
            assert!(!engine.is_complete());
            engine.record_answer(Logical).unwrap();
        }
        assert_eq!(engine.current_index(), 5);
        assert!(engine.is_complete());
    }

    #[test]
    fn tally_total_tracks_answers() {
        let mut engine = QuizEngine::neuropath().unwrap();
        let answers = [Auditory, Logical, Auditory, Visual, Logical];
        for (answered, category) in answers.into_iter().enumerate() {
            assert_eq!(engine.tally().total() as usize, answered);
            engine.record_answer(category).unwrap();
        }
        assert_eq!(engine.tally().total(), 5);
    }

    #[test]
    fn every_answer_sequence_totals_five() {
        for seq in 0..3_usize.pow(5) {
            let mut engine = QuizEngine::neuropath().unwrap();
            let mut rest = seq;
            while !engine.is_complete() {
                engine.answer_option(rest % 3).unwrap();
                rest /= 3;
            }
            assert_eq!(engine.tally().total(), 5, "sequence {seq}");
            assert!(engine.resolve_result().is_ok());
        }
    }

    #[test]
    fn mostly_visual_answers_resolve_to_visual() {
        let engine = play(&[Visual, Visual, Visual, Auditory, Logical]);
        assert_eq!(*engine.tally(), ScoreTally::from_counts(3, 1, 1));
        assert_eq!(engine.resolve_result().unwrap().title(), "Visual learner");
    }

    #[test]
    fn tied_answers_resolve_to_combined_style() {
        let engine = play(&[Visual, Visual, Auditory, Auditory, Logical]);
        assert_eq!(*engine.tally(), ScoreTally::from_counts(2, 2, 1));
        assert_eq!(
            engine.resolve_result().unwrap().title(),
            "Visual-Auditory learner"
        );
    }

    #[test]
    fn sixth_answer_is_rejected_and_tally_unchanged() {
        let mut engine = play(&[Visual, Visual, Visual, Auditory, Logical]);
        let before = *engine.tally();

        let err = engine.record_answer(Auditory).unwrap_err();

        assert_eq!(err, InvalidStateError::AlreadyComplete { total: 5 });
        assert_eq!(*engine.tally(), before);
        assert_eq!(engine.current_index(), 5);
    }

    #[test]
    fn present_is_bounds_checked() {
        let engine = QuizEngine::neuropath().unwrap();
        assert_eq!(engine.present(4).unwrap().index(), 4);
        assert_eq!(
            engine.present(5).unwrap_err(),
            InvalidStateError::QuestionOutOfRange { index: 5, total: 5 }
        );
        assert!(engine.present(usize::MAX).is_err());
    }

    #[test]
    fn present_does_not_touch_state() {
        let engine = QuizEngine::neuropath().unwrap();
        let _ = engine.present(3).unwrap();
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.tally().total(), 0);
    }

    #[test]
    fn resolve_before_completion_fails() {
        let engine = play(&[Visual, Logical]);
        assert_eq!(
            engine.resolve_result().unwrap_err(),
            InvalidStateError::NotComplete {
                answered: 2,
                total: 5
            }
        );
    }

    #[test]
    fn resolve_is_repeatable() {
        let engine = play(&[Logical, Logical, Visual, Auditory, Logical]);
        let first = engine.resolve_result().unwrap();
        let second = engine.resolve_result().unwrap();
        assert_eq!(first, second);
        assert!(engine.is_complete());
    }

    #[test]
    fn answer_option_uses_option_category() {
        let mut engine = QuizEngine::neuropath().unwrap();
        assert_eq!(engine.answer_option(1).unwrap(), Auditory);
        assert_eq!(engine.answer_option(2).unwrap(), Logical);
        assert_eq!(engine.tally().get(Auditory), 1);
        assert_eq!(engine.tally().get(Logical), 1);
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn answer_option_out_of_range_changes_nothing() {
        let mut engine = QuizEngine::neuropath().unwrap();
        let err = engine.answer_option(3).unwrap_err();
        assert_eq!(
            err,
            InvalidStateError::OptionOutOfRange {
                index: 3,
                options: 3
            }
        );
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.tally().total(), 0);
    }

    #[test]
    fn current_fails_after_completion() {
        let engine = play(&[Visual; 5]);
        assert!(matches!(
            engine.current(),
            Err(InvalidStateError::AlreadyComplete { total: 5 })
        ));
    }

    #[test]
    fn progress_reports_percentage() {
        let engine = play(&[Visual, Auditory]);
        let progress = engine.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.remaining, 3);
        assert!(!progress.is_complete);
        assert!((progress.percent() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_and_misplaced_questions() {
        assert_eq!(
            QuizEngine::new(Vec::new()).unwrap_err(),
            QuizDefinitionError::Empty
        );

        let q = Question::new(1, "Only one", vec![QuizOption::new("A", Visual)]).unwrap();
        assert_eq!(
            QuizEngine::new(vec![q]).unwrap_err(),
            QuizDefinitionError::MisplacedQuestion {
                position: 0,
                index: 1
            }
        );
    }

    #[test]
    fn custom_quiz_with_single_question() {
        let q = Question::new(0, "Pick", vec![QuizOption::new("Sound", Auditory)]).unwrap();
        let mut engine = QuizEngine::new(vec![q]).unwrap();
        engine.answer_option(0).unwrap();
        assert_eq!(engine.resolve_result().unwrap().title(), "Auditory learner");
    }
}
