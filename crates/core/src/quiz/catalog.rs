//! The NeuroPath learning-style questions.

use crate::model::{Category, Question, QuestionError, QuizOption};

/// Prompt and (visual, auditory, logical) option texts for each question.
const NEUROPATH_QUESTIONS: [(&str, [&str; 3]); 5] = [
    (
        "When studying new material, what helps you remember best?",
        [
            "Diagrams, charts or images",
            "Listening to explanations or podcasts",
            "Working through formulas or logic steps",
        ],
    ),
    (
        "How do you prefer to take notes?",
        [
            "Drawing mind maps or sketching",
            "Recording voice memos",
            "Writing outlines or bullet lists",
        ],
    ),
    (
        "Which activity do you enjoy more?",
        [
            "Watching tutorials or infographics",
            "Listening to lectures or discussions",
            "Solving puzzles or brainteasers",
        ],
    ),
    (
        "When solving a problem, you tend to…",
        [
            "Visualize the solution in your mind",
            "Talk it out loud or listen to others",
            "Break it down into steps or equations",
        ],
    ),
    (
        "What kind of teachers inspire you?",
        [
            "Those who use slides, visuals and props",
            "Those who have captivating voices",
            "Those who focus on reasoning and structure",
        ],
    ),
];

/// Number of questions in the built-in quiz.
pub const NEUROPATH_QUESTION_COUNT: usize = NEUROPATH_QUESTIONS.len();

/// Build the five NeuroPath questions in presentation order.
///
/// # Errors
///
/// Returns `QuestionError` if a catalog entry fails validation.
pub fn neuropath_questions() -> Result<Vec<Question>, QuestionError> {
    NEUROPATH_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, (prompt, texts))| {
            let options = Category::ALL
                .into_iter()
                .zip(texts)
                .map(|(category, text)| QuizOption::new(*text, category))
                .collect();
            Question::new(index, *prompt, options)
        })
        .collect()
}
