use rand::Rng;

use crate::quiz::{generate_quiz_question, QuizQuestion};

pub const POINTS_PER_CORRECT: u32 = 10;
/// A celebration is shown every time the streak reaches a multiple of this.
pub const CELEBRATE_EVERY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Feedback {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    pub correct_answer: u32,
    pub celebrate: bool,
}

impl AnswerOutcome {
    pub fn message(&self) -> String {
        match self.feedback {
            Feedback::Correct => "Awesome! (太棒了!)".to_string(),
            Feedback::Wrong => format!("Try again! (The answer is {})", self.correct_answer),
        }
    }
}

/// Score and streak live only as long as the session itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    question: QuizQuestion,
    score: u32,
    streak: u32,
    feedback: Option<Feedback>,
}

impl QuizSession {
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            question: generate_quiz_question(rng),
            score: 0,
            streak: 0,
            feedback: None,
        }
    }

    pub fn question(&self) -> &QuizQuestion {
        &self.question
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }

    /// Grades an answer to the current question.
    /// Returns `None` if the question was already answered.
    pub fn answer(&mut self, value: u32) -> Option<AnswerOutcome> {
        if self.is_answered() {
            return None;
        }

        let correct = self.question.is_correct(value);
        let feedback = if correct {
            self.score += POINTS_PER_CORRECT;
            self.streak += 1;
            Feedback::Correct
        } else {
            self.streak = 0;
            Feedback::Wrong
        };
        self.feedback = Some(feedback);

        Some(AnswerOutcome {
            feedback,
            correct_answer: self.question.correct_answer,
            celebrate: correct && self.streak % CELEBRATE_EVERY == 0,
        })
    }

    /// Moves on to a fresh question, answered or not. Skipping keeps the streak.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.question = generate_quiz_question(rng);
        self.feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wrong_option(session: &QuizSession) -> u32 {
        let q = session.question();
        *q.options.iter().find(|o| !q.is_correct(**o)).unwrap()
    }

    #[test]
    fn correct_answer_scores_and_extends_streak() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = QuizSession::start(&mut rng);
        let correct = session.question().correct_answer;

        let outcome = session.answer(correct).unwrap();
        assert_eq!(outcome.feedback, Feedback::Correct);
        assert_eq!(outcome.message(), "Awesome! (太棒了!)");
        assert!(!outcome.celebrate);
        assert_eq!(session.score(), 10);
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn wrong_answer_resets_streak_and_reveals_the_product() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = QuizSession::start(&mut rng);
        let correct = session.question().correct_answer;
        session.answer(correct);
        session.advance(&mut rng);

        let wrong = wrong_option(&session);
        let correct = session.question().correct_answer;
        let outcome = session.answer(wrong).unwrap();
        assert_eq!(outcome.feedback, Feedback::Wrong);
        assert_eq!(outcome.message(), format!("Try again! (The answer is {correct})"));
        assert_eq!(session.streak(), 0);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn second_answer_to_the_same_question_is_ignored() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = QuizSession::start(&mut rng);
        let correct = session.question().correct_answer;

        assert!(session.answer(correct).is_some());
        assert!(session.answer(correct).is_none());
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn every_fifth_in_a_row_is_celebrated() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = QuizSession::start(&mut rng);
        let mut celebrations = Vec::new();
        for _ in 0..10 {
            let correct = session.question().correct_answer;
            celebrations.push(session.answer(correct).unwrap().celebrate);
            session.advance(&mut rng);
        }
        let expected = (1..=10).map(|n| n % 5 == 0).collect::<Vec<_>>();
        assert_eq!(celebrations, expected);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn skipping_replaces_the_question_and_keeps_the_streak() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::start(&mut rng);
        let correct = session.question().correct_answer;
        session.answer(correct);

        session.advance(&mut rng);
        assert!(!session.is_answered());
        session.advance(&mut rng);
        assert_eq!(session.streak(), 1);
        assert_eq!(session.score(), 10);
    }
}
