use quizgen::client::QuizSession;
use quizgen::models::quiz::QuizQuestion;

fn quiz(correct_choice: i32) -> QuizQuestion {
    QuizQuestion {
        question_text: "Which statement is correct?".to_string(),
        options: vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
            "fourth".to_string(),
        ],
        correct_choice,
        correct_reason: "because".to_string(),
        wrong_reason: "because not".to_string(),
    }
}

#[test]
fn batch_install_creates_unanswered_slots_in_order() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(1), quiz(2), quiz(3)]);

    assert_eq!(session.len(), 3);
    for index in 0..3 {
        let state = session.answer(index).expect("slot");
        assert_eq!(state.selected_option(), None);
        assert!(!state.explanation_visible());
        assert_eq!(session.is_correct(index), None);
    }
}

#[test]
fn first_selection_answers_and_reveals_the_explanation() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(2)]);

    // correct_choice is 1-based; option index 1 is choice 2.
    assert!(session.select(0, 1));
    let state = session.answer(0).expect("slot");
    assert!(state.is_answered());
    assert_eq!(state.selected_option(), Some(1));
    assert!(state.explanation_visible());
    assert_eq!(session.is_correct(0), Some(true));
}

#[test]
fn wrong_selection_is_marked_incorrect() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(2)]);

    assert!(session.select(0, 3));
    assert_eq!(session.is_correct(0), Some(false));
}

#[test]
fn second_selection_is_a_no_op() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(2)]);

    assert!(session.select(0, 0));
    assert!(!session.select(0, 1));
    assert!(!session.select(0, 0));

    let state = session.answer(0).expect("slot");
    assert_eq!(state.selected_option(), Some(0));
    // The failed re-selections must not flip the explanation either.
    assert!(state.explanation_visible());
}

#[test]
fn out_of_range_indices_are_rejected() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(1)]);

    assert!(!session.select(5, 0));
    assert!(!session.select(0, 9));
    assert!(!session.answer(0).expect("slot").is_answered());
}

#[test]
fn explanation_toggle_is_independent_of_selection() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(1)]);

    session.toggle_explanation(0);
    assert!(session.answer(0).expect("slot").explanation_visible());
    session.toggle_explanation(0);
    assert!(!session.answer(0).expect("slot").explanation_visible());
}

#[test]
fn new_batch_resets_answered_slots() {
    let mut session = QuizSession::new();
    session.install_batch(vec![quiz(1), quiz(2)]);
    assert!(session.select(0, 0));
    assert!(session.select(1, 1));

    session.install_batch(vec![quiz(3)]);
    assert_eq!(session.len(), 1);
    assert!(!session.answer(0).expect("slot").is_answered());
    assert!(session.answer(1).is_none());
    assert!(session.select(0, 2));
}
