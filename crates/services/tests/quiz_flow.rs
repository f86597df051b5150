use neuropath_core::model::{Category, LearningStyle, SubmissionKind};
use neuropath_core::time::{fixed_clock, fixed_now};
use services::AppServices;

#[tokio::test]
async fn quiz_then_unlock_persists_style() {
    let services = AppServices::new_sqlite(
        "sqlite:file:memdb_quiz_flow?mode=memory&cache=shared",
        fixed_clock(),
    )
    .await
    .expect("sqlite services");
    let quiz = services.quiz();

    let mut session = quiz.start_session().unwrap();
    assert_eq!(session.started_at(), fixed_now());

    // visual, visual, auditory, auditory, logical
    let mut last = None;
    for option in [0, 0, 1, 1, 2] {
        let view = session.current_view().unwrap();
        assert_eq!(view.options[option].index, option);
        last = Some(quiz.answer(&mut session, option).unwrap());
    }

    let result = last.and_then(|answer| answer.result).expect("result after last answer");
    assert_eq!(result.title(), "Visual-Auditory learner");
    assert_eq!(
        result.style(),
        LearningStyle::Combined {
            primary: Category::Visual,
            secondary: Category::Auditory
        }
    );
    assert_eq!(result.headline(), "You're a Visual-Auditory learner!");

    let receipt = quiz
        .unlock_lesson(&session, "ada@example.com")
        .await
        .unwrap();
    assert_eq!(
        receipt.message,
        "Thanks! We will notify you when your personalized lesson is ready."
    );

    let unlocks = services
        .submissions()
        .list(SubmissionKind::LessonUnlock)
        .await
        .unwrap();
    assert_eq!(unlocks.len(), 1);
    assert_eq!(unlocks[0].fields.get("style"), Some("Visual-Auditory learner"));
    assert_eq!(unlocks[0].fields.get("email"), Some("ada@example.com"));
}

#[tokio::test]
async fn progress_advances_by_one_fifth() {
    let services = AppServices::in_memory(fixed_clock());
    let quiz = services.quiz();
    let mut session = quiz.start_session().unwrap();

    let mut seen = vec![session.progress().percent()];
    while !session.is_complete() {
        quiz.answer_category(&mut session, Category::Logical).unwrap();
        seen.push(session.progress().percent());
    }

    let expected = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];
    assert_eq!(seen.len(), expected.len());
    for (got, want) in seen.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
    assert_eq!(session.result().unwrap().title(), "Logical learner");
}
