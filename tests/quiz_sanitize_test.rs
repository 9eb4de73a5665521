use serde_json::json;
use validator::Validate;

use quizgen::dto::quiz_dto::GenerateQuizRequest;
use quizgen::services::ai_service::AiService;

fn service() -> AiService {
    AiService::new(reqwest::Client::new(), "gpt-4".to_string())
}

#[test]
fn sanitize_keeps_well_formed_questions() {
    let raw = json!({
        "quizzes": [
            {
                "question_text": "Which statement is correct?",
                "options": ["a", "b", "c", "d"],
                "correct_choice": 3,
                "correct_reason": "c holds",
                "wrong_reason": "the rest do not"
            }
        ]
    });

    let quizzes = service().sanitize_quizzes(&raw, 1);
    assert_eq!(quizzes.len(), 1);
    let quiz = &quizzes[0];
    assert_eq!(quiz.options.len(), 4);
    // The shuffle may move the correct option, but the 1-based index must
    // still point at the same text.
    assert!(quiz.correct_choice >= 1 && quiz.correct_choice as usize <= quiz.options.len());
    assert_eq!(quiz.options[quiz.correct_index()], "c");
    assert_eq!(quiz.correct_reason, "c holds");
}

#[test]
fn sanitize_drops_entries_with_too_few_options() {
    let raw = json!({
        "quizzes": [
            { "question_text": "degenerate", "options": ["only"], "correct_choice": 1 },
            { "question_text": "fine", "options": ["a", "b"], "correct_choice": 2 }
        ]
    });

    let quizzes = service().sanitize_quizzes(&raw, 5);
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].question_text, "fine");
}

#[test]
fn sanitize_clamps_out_of_range_correct_choice() {
    let raw = json!({
        "quizzes": [
            { "question_text": "q", "options": ["a", "b", "c"], "correct_choice": 9 },
            { "question_text": "r", "options": ["a", "b", "c"], "correct_choice": 0 }
        ]
    });

    for quiz in service().sanitize_quizzes(&raw, 5) {
        assert!(quiz.correct_choice >= 1 && quiz.correct_choice as usize <= quiz.options.len());
    }
}

#[test]
fn sanitize_truncates_to_the_requested_count() {
    let entries: Vec<_> = (0..7)
        .map(|i| {
            json!({
                "question_text": format!("q{}", i),
                "options": ["a", "b", "c", "d"],
                "correct_choice": 1
            })
        })
        .collect();
    let raw = json!({ "quizzes": entries });

    assert_eq!(service().sanitize_quizzes(&raw, 3).len(), 3);
}

#[test]
fn sanitize_accepts_a_bare_array() {
    let raw = json!([
        { "question_text": "q", "options": ["a", "b"], "correct_choice": 1 }
    ]);
    assert_eq!(service().sanitize_quizzes(&raw, 1).len(), 1);
}

#[test]
fn sanitize_skips_malformed_entries() {
    let raw = json!({
        "quizzes": [
            { "options": ["a", "b"], "correct_choice": 1 },
            { "question_text": "no options", "correct_choice": 1 },
            "not an object"
        ]
    });
    assert!(service().sanitize_quizzes(&raw, 5).is_empty());
}

#[test]
fn request_count_bounds_are_enforced() {
    for n in 1..=5 {
        let req = GenerateQuizRequest {
            number_of_questions: n,
            api_key: "sk-test-0123456789-0123456789".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    for n in [0, 6, 100] {
        let req = GenerateQuizRequest {
            number_of_questions: n,
            api_key: "sk-test-0123456789-0123456789".to_string(),
        };
        assert!(req.validate().is_err());
    }
}

#[test]
fn empty_api_key_is_rejected() {
    let req = GenerateQuizRequest {
        number_of_questions: 3,
        api_key: String::new(),
    };
    assert!(req.validate().is_err());
}
