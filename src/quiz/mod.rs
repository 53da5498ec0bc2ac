pub mod question;
pub mod session;

use crate::fact::Factor;

pub use question::generate_quiz_question;
pub use session::{AnswerOutcome, Feedback, QuizSession};

/// A multiple choice question. Never mutated; the session replaces it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizQuestion {
    pub a: Factor,
    pub b: Factor,
    /// Display order, already shuffled.
    pub options: Vec<u32>,
    pub correct_answer: u32,
}

impl QuizQuestion {
    pub fn text(&self) -> String {
        format!("{} × {} = ?", self.a, self.b)
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }
}
