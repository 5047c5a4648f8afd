pub mod bank;
pub mod error;
pub mod question;

use rand::Rng;

pub use bank::{QuestionBank, QuestionSpec};
pub use error::{BankError, QuestionError};
pub use question::{Label, Outcome, Question, Response, BASE_WORTH};

/// One round of play: the questions in order and which one is up next.
#[derive(Debug, Clone, Default)]
pub struct Quiz {
    pub questions: Vec<Question>,
    pub current_question: usize,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_question: 0,
        }
    }

    pub fn shuffle_all_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for question in &mut self.questions {
            question.shuffle_with(rng);
        }
    }

    pub fn shuffle_all(&mut self) {
        self.shuffle_all_with(&mut rand::thread_rng());
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    pub fn current_mut(&mut self) -> Option<&mut Question> {
        self.questions.get_mut(self.current_question)
    }

    /// Moves on to the next question. Returns `false` once the round is over.
    pub fn advance(&mut self) -> bool {
        if self.current_question < self.questions.len() {
            self.current_question += 1;
        }
        !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.current_question >= self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.questions.iter().map(Question::score).sum()
    }

    pub fn max_score(&self) -> u32 {
        BASE_WORTH * self.questions.len() as u32
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            score: self.score(),
            max_score: self.max_score(),
            ..Summary::default()
        };
        for question in &self.questions {
            match question.outcome() {
                Outcome::Correct => summary.correct += 1,
                Outcome::Incorrect => summary.incorrect += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Unanswered => summary.unanswered += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    pub unanswered: usize,
    pub score: u32,
    pub max_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn round() -> Quiz {
        Quiz::new(vec![
            Question::new(1, "2+2?", "4", "3", Some("5"), None).unwrap(),
            Question::new(2, "Capital of France?", "Paris", "Berlin", Some("Madrid"), Some("Rome"))
                .unwrap(),
            Question::new(3, "Sky is blue?", "Yes", "No", None, None).unwrap(),
        ])
    }

    fn answer(question: &mut Question, correct: bool) {
        let index = if correct {
            question.correct_index()
        } else {
            (0..question.response_count())
                .find(|&i| !question.is_response_correct(i).unwrap())
                .unwrap()
        };
        question.set_response(index).unwrap();
        question.set_attempted();
    }

    #[test]
    fn walks_questions_in_order() {
        let mut quiz = round();
        assert_eq!(quiz.current().map(Question::number), Some(1));
        assert!(quiz.advance());
        assert_eq!(quiz.current().map(Question::number), Some(2));
        assert!(quiz.advance());
        assert!(!quiz.advance());
        assert!(quiz.is_finished());
        assert!(quiz.current().is_none());
        assert!(!quiz.advance());
    }

    #[test]
    fn shuffle_all_keeps_every_correct_answer() {
        let mut quiz = round();
        quiz.shuffle_all_with(&mut StdRng::seed_from_u64(11));
        for question in &quiz.questions {
            assert!(question.is_response_correct(question.correct_index()).unwrap());
        }
    }

    #[test]
    fn summary_counts_outcomes_and_decayed_worth() {
        let mut quiz = round();
        quiz.shuffle_all_with(&mut StdRng::seed_from_u64(5));

        let first = quiz.current_mut().unwrap();
        first.cheat();
        answer(first, true);
        quiz.advance();

        let second = quiz.current_mut().unwrap();
        answer(second, false);
        quiz.advance();

        quiz.current_mut().unwrap().set_skipped();

        let summary = quiz.summary();
        assert_eq!(
            summary,
            Summary {
                correct: 1,
                incorrect: 1,
                skipped: 1,
                unanswered: 0,
                score: 50,
                max_score: 300,
            }
        );
    }

    #[test]
    fn empty_round_is_finished() {
        let quiz = Quiz::new(Vec::new());
        assert!(quiz.is_finished());
        assert_eq!(quiz.summary(), Summary::default());
    }
}
