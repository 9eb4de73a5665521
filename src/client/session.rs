use crate::models::quiz::QuizQuestion;
use std::collections::BTreeMap;

/// Per-question answer record. A slot starts unanswered; the first
/// selection is terminal until the next batch install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerState {
    selected_option: Option<usize>,
    explanation_visible: bool,
}

impl AnswerState {
    pub fn is_answered(&self) -> bool {
        self.selected_option.is_some()
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }
}

/// Owns the current quiz batch and the answer state for one UI session.
/// Quiz position is the key; every position gets a default slot when a
/// batch is installed, so the map is total over the batch.
#[derive(Debug, Default)]
pub struct QuizSession {
    quizzes: Vec<QuizQuestion>,
    answers: BTreeMap<usize, AnswerState>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the batch and resets every answer slot to unanswered.
    pub fn install_batch(&mut self, quizzes: Vec<QuizQuestion>) {
        self.answers = (0..quizzes.len())
            .map(|index| (index, AnswerState::default()))
            .collect();
        self.quizzes = quizzes;
    }

    pub fn quizzes(&self) -> &[QuizQuestion] {
        &self.quizzes
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    pub fn answer(&self, quiz_index: usize) -> Option<&AnswerState> {
        self.answers.get(&quiz_index)
    }

    /// Records the first selection for a question and flips its
    /// explanation visibility. Already-answered slots and out-of-range
    /// indices are ignored; returns whether the transition happened.
    pub fn select(&mut self, quiz_index: usize, option_index: usize) -> bool {
        let Some(quiz) = self.quizzes.get(quiz_index) else {
            return false;
        };
        if option_index >= quiz.options.len() {
            return false;
        }
        let Some(state) = self.answers.get_mut(&quiz_index) else {
            return false;
        };
        if state.selected_option.is_some() {
            return false;
        }
        state.selected_option = Some(option_index);
        state.explanation_visible = !state.explanation_visible;
        true
    }

    pub fn toggle_explanation(&mut self, quiz_index: usize) {
        if let Some(state) = self.answers.get_mut(&quiz_index) {
            state.explanation_visible = !state.explanation_visible;
        }
    }

    /// `None` until the question is answered, then whether the selection
    /// matches the quiz's correct option.
    pub fn is_correct(&self, quiz_index: usize) -> Option<bool> {
        let quiz = self.quizzes.get(quiz_index)?;
        let selected = self.answers.get(&quiz_index)?.selected_option?;
        Some(selected == quiz.correct_index())
    }
}
