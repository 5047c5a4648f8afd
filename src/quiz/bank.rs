use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::error::BankError;
use super::question::Question;

/// Raw question as stored in a bank file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionSpec {
    pub number: u32,
    pub question: String,
    pub answer_correct: String,
    pub answer_wrong_a: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_wrong_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_wrong_c: Option<String>,
}

impl QuestionSpec {
    /// Builds the question. Blank optional answers in a bank file count as missing.
    pub fn to_question(&self) -> Result<Question, BankError> {
        Question::new(
            self.number,
            &self.question,
            &self.answer_correct,
            &self.answer_wrong_a,
            self.optional_answer("answer_wrong_b", &self.answer_wrong_b),
            self.optional_answer("answer_wrong_c", &self.answer_wrong_c),
        )
        .map_err(|source| BankError::Question {
            number: self.number,
            source,
        })
    }

    fn optional_answer<'a>(&self, field: &str, answer: &'a Option<String>) -> Option<&'a str> {
        match answer.as_deref() {
            Some(text) if text.trim().is_empty() => {
                warn!("Question {}: ignoring blank {}", self.number, field);
                None
            }
            other => other,
        }
    }
}

/// Ordered collection of question specs, loaded from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pub specs: Vec<QuestionSpec>,
}

impl QuestionBank {
    pub fn new(mut specs: Vec<QuestionSpec>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.number) {
                return Err(BankError::DuplicateNumber(spec.number));
            }
        }
        specs.sort_by_key(|spec| spec.number);
        Ok(Self { specs })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        info!("Loading question bank from {}", path.display());
        let bank = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded {} questions", bank.len());
        Ok(bank)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let specs: Vec<QuestionSpec> = serde_json::from_reader(reader)?;
        Self::new(specs)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), BankError> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, &self.specs)?;
        writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Builds every question in bank order. Fails on the first invalid one.
    pub fn questions(&self) -> Result<Vec<Question>, BankError> {
        self.specs.iter().map(QuestionSpec::to_question).collect()
    }
}
