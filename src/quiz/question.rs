use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::error::QuestionError;

/// Points a question is worth before any cheats are spent.
pub const BASE_WORTH: u32 = 100;

/// Each question allows at most this many cheats.
pub const MAX_CHEATS: u8 = 2;

/// Identifies a response. Never shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Correct,
    WrongA,
    WrongB,
    WrongC,
}

impl Label {
    pub fn is_correct(self) -> bool {
        self == Label::Correct
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub label: Label,
    pub text: String,
}

impl Response {
    pub fn new(label: Label, text: String) -> Self {
        Self { label, text }
    }

    // First cheat removes WrongC, the second one also removes WrongB.
    fn hidden_by(&self, cheat_count: u8) -> bool {
        match self.label {
            Label::WrongC => cheat_count >= 1,
            Label::WrongB => cheat_count >= 2,
            Label::Correct | Label::WrongA => false,
        }
    }
}

/// Where a question ended up once the player is done with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unanswered,
    Skipped,
    Correct,
    Incorrect,
}

/// A single quiz question with its responses and the player's progress on it.
///
/// Responses are kept in insertion order (correct one first) until
/// [`Question::shuffle`] is called, so positions must never be used to find
/// the correct answer. Use [`Question::is_response_correct`] or
/// [`Question::correct_index`] instead.
#[derive(Debug, Clone)]
pub struct Question {
    number: u32,
    text: String,
    responses: Vec<Response>,
    attempted: bool,
    skipped: bool,
    selected: Option<usize>,
    cheat_count: u8,
}

impl Question {
    /// Builds a question out of its text and answers.
    ///
    /// `wrong_b` and `wrong_c` are optional, which allows true/false and
    /// one-of-three questions. Each is appended whenever it is `Some`.
    pub fn new(
        number: u32,
        text: &str,
        correct: &str,
        wrong_a: &str,
        wrong_b: Option<&str>,
        wrong_c: Option<&str>,
    ) -> Result<Self, QuestionError> {
        if correct.trim().is_empty() {
            return Err(QuestionError::InvalidConstruction(
                "the correct answer is missing",
            ));
        }
        if wrong_a.trim().is_empty() {
            return Err(QuestionError::InvalidConstruction(
                "at least one wrong answer is required",
            ));
        }

        let mut responses = vec![
            Response::new(Label::Correct, correct.to_string()),
            Response::new(Label::WrongA, wrong_a.to_string()),
        ];
        for (label, answer) in [(Label::WrongB, wrong_b), (Label::WrongC, wrong_c)] {
            if let Some(answer) = answer {
                responses.push(Response::new(label, answer.to_string()));
            }
        }

        Ok(Self {
            number,
            text: text.to_string(),
            responses,
            attempted: false,
            skipped: false,
            selected: None,
            cheat_count: 0,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn question_text(&self) -> &str {
        &self.text
    }

    /// Shuffles the responses with the given source of randomness.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.responses.shuffle(rng);
        debug!(
            "Question {}: shuffled responses, correct one is now at {:?}",
            self.number,
            self.correct_index()
        );
    }

    /// Shuffles the responses with a freshly seeded thread-local generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    fn response_at(&self, index: usize) -> Result<&Response, QuestionError> {
        self.responses.get(index).ok_or(QuestionError::OutOfRange {
            index,
            count: self.responses.len(),
        })
    }

    pub fn label(&self, index: usize) -> Result<Label, QuestionError> {
        Ok(self.response_at(index)?.label)
    }

    pub fn is_response_correct(&self, index: usize) -> Result<bool, QuestionError> {
        Ok(self.label(index)?.is_correct())
    }

    /// Current position of the correct response.
    pub fn correct_index(&self) -> usize {
        self.responses
            .iter()
            .position(|r| r.label.is_correct())
            .expect("question has no correct response")
    }

    /// Text of the response at `index`, or `None` when a cheat has removed it.
    /// Callers should not render hidden responses at all.
    pub fn response_text(&self, index: usize) -> Result<Option<&str>, QuestionError> {
        let response = self.response_at(index)?;
        if response.hidden_by(self.cheat_count) {
            return Ok(None);
        }
        Ok(Some(&response.text))
    }

    /// All responses that are still shown, with their current index.
    pub fn visible_responses(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let cheat_count = self.cheat_count;
        self.responses
            .iter()
            .enumerate()
            .filter(move |(_, r)| !r.hidden_by(cheat_count))
            .map(|(i, r)| (i, r.text.as_str()))
    }

    fn max_cheats(&self) -> u8 {
        let wrong = self.responses.len().saturating_sub(1);
        MAX_CHEATS.min(wrong as u8)
    }

    /// Cheats are capped at two, or at the number of wrong answers if that is lower.
    pub fn can_cheat(&self) -> bool {
        self.cheat_count < self.max_cheats()
    }

    pub fn cheat_count(&self) -> u8 {
        self.cheat_count
    }

    /// Spends a cheat, halving the worth of the question and hiding one more
    /// wrong answer. Does nothing once the cheats are used up.
    /// Returns whether a cheat was actually spent.
    pub fn cheat(&mut self) -> bool {
        if !self.can_cheat() {
            debug!("Question {}: no cheats left", self.number);
            return false;
        }
        self.cheat_count += 1;
        debug!(
            "Question {}: cheat #{} used, worth is now {}",
            self.number,
            self.cheat_count,
            self.worth()
        );
        true
    }

    /// Points for this question: 100, halved for every cheat used.
    pub fn worth(&self) -> u32 {
        BASE_WORTH >> self.cheat_count
    }

    pub fn set_attempted(&mut self) {
        self.attempted = true;
    }

    pub fn attempted(&self) -> bool {
        self.attempted
    }

    /// Records the player's choice. Indices past the last response are rejected.
    pub fn set_response(&mut self, index: usize) -> Result<(), QuestionError> {
        self.response_at(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn response(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_skipped(&mut self) {
        self.skipped = true;
    }

    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    pub fn outcome(&self) -> Outcome {
        match (self.attempted, self.selected) {
            (true, Some(index)) => {
                let correct = self
                    .responses
                    .get(index)
                    .map_or(false, |r| r.label.is_correct());
                if correct {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            }
            _ if self.skipped => Outcome::Skipped,
            _ => Outcome::Unanswered,
        }
    }

    /// Points earned: the current worth for a correct answer, nothing otherwise.
    pub fn score(&self) -> u32 {
        match self.outcome() {
            Outcome::Correct => self.worth(),
            _ => 0,
        }
    }
}
