use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("response index {index} is out of range (question has {count} responses)")]
    OutOfRange { index: usize, count: usize },
    #[error("invalid question: {0}")]
    InvalidConstruction(&'static str),
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question number {0} appears more than once")]
    DuplicateNumber(u32),
    #[error("question {number} is invalid: {source}")]
    Question {
        number: u32,
        #[source]
        source: QuestionError,
    },
}
