use crate::model::{LearningStyle, QuizResult, ScoreTally};

/// Resolve a tally snapshot into the result shown to the user.
///
/// Only the two highest-ranked categories are compared. When they tie on a
/// non-zero score the style is combined; a third category sharing that score
/// is ignored. An all-zero tally resolves to the balanced style.
#[must_use]
pub fn resolve(tally: &ScoreTally) -> QuizResult {
    let ranked = tally.ranked();
    let top = (ranked[0].1 > 0).then_some(ranked[0]);
    let second = (ranked[1].1 > 0).then_some(ranked[1]);

    let style = match (top, second) {
        (Some((primary, a)), Some((secondary, b))) if a == b => {
            LearningStyle::Combined { primary, secondary }
        }
        (Some((category, _)), _) => LearningStyle::Single { category },
        (None, _) => LearningStyle::Balanced,
    };
    log::debug!("resolved tally {tally:?} to {style:?}");
    QuizResult::from_style(style)
}
