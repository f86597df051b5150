use std::fmt;
use std::io::{self, BufRead, Write};

use neuropath_core::model::QuizResult;
use services::{QuestionView, QuizSessionError, QuizSessionService};

const BAR_WIDTH: usize = 20;

#[derive(Debug)]
pub enum TerminalError {
    Io(io::Error),
    InputClosed,
    Quiz(QuizSessionError),
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalError::Io(err) => write!(f, "terminal I/O failed: {err}"),
            TerminalError::InputClosed => write!(f, "input closed before the quiz finished"),
            TerminalError::Quiz(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TerminalError {}

impl From<io::Error> for TerminalError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<QuizSessionError> for TerminalError {
    fn from(err: QuizSessionError) -> Self {
        Self::Quiz(err)
    }
}

/// Line-based presentation adapter for the quiz.
pub struct TerminalQuiz<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalQuiz<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run one quiz session to completion, then offer the lesson unlock.
    pub async fn run(&mut self, quiz: &QuizSessionService) -> Result<QuizResult, TerminalError> {
        let mut session = quiz.start_session()?;

        let result = loop {
            let view = session.current_view()?;
            self.show_question(&view)?;
            let choice = self.read_choice(view.options.len())?;
            if let Some(result) = quiz.answer(&mut session, choice)?.result {
                break result;
            }
        };

        writeln!(self.output, "{}", render_progress(session.progress().percent()))?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", result.headline())?;
        writeln!(self.output, "{}", result.description())?;
        writeln!(self.output)?;

        write!(self.output, "Try a personalized lesson? [y/N] ")?;
        self.output.flush()?;
        let wants_lesson = self
            .read_line()?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"));
        if !wants_lesson {
            return Ok(result);
        }

        loop {
            write!(self.output, "Enter your email to unlock (blank to skip): ")?;
            self.output.flush()?;
            let Some(email) = self.read_line()? else {
                break;
            };
            if email.is_empty() {
                break;
            }
            match quiz.unlock_lesson(&session, &email).await {
                Ok(receipt) => {
                    writeln!(self.output, "{}", receipt.message)?;
                    break;
                }
                Err(QuizSessionError::Submission(err)) => {
                    writeln!(self.output, "{err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(result)
    }

    fn show_question(&mut self, view: &QuestionView) -> io::Result<()> {
        writeln!(self.output, "{}", render_progress(view.progress_percent()))?;
        writeln!(
            self.output,
            "Question {} of {}: {}",
            view.index + 1,
            view.progress.total,
            view.prompt
        )?;
        for option in &view.options {
            writeln!(self.output, "  {}) {}", option.index + 1, option.text)?;
        }
        Ok(())
    }

    fn read_choice(&mut self, options: usize) -> Result<usize, TerminalError> {
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let line = self.read_line()?.ok_or(TerminalError::InputClosed)?;
            match line.parse::<usize>() {
                Ok(n) if (1..=options).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Please pick a number from 1 to {options}.")?,
            }
        }
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Text progress bar, e.g. `[########------------]  40%`.
#[must_use]
pub fn render_progress(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        clamped
    )
}
