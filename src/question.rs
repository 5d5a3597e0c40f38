//! Question data and the data source contract
//!
//! Questions arrive from an external source as JSON. Each record carries a
//! prompt and a list of answers whose first element is the correct one.
//! Once loaded, a session only ever sees the read-only [`QuestionPool`]:
//! the prompts and their correct answers, index-aligned.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::question::{MAX_ANSWER_LENGTH, MAX_POOL_SIZE, MAX_PROMPT_LENGTH};

/// Errors raised while loading question data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source produced no data
    #[error("question source '{0}' is unavailable")]
    Unavailable(String),
    /// The data could not be read as questions
    #[error("question data is malformed: {0}")]
    Malformed(String),
    /// The data contained no questions
    #[error("question data contains no questions")]
    Empty,
    /// Prompts and answers were supplied as columns of different lengths
    #[error("{prompts} prompts but {answers} answers")]
    MismatchedColumns {
        /// Number of prompts supplied
        prompts: usize,
        /// Number of answers supplied
        answers: usize,
    },
    /// A record failed validation
    #[error("invalid question data: {0}")]
    Invalid(String),
}

/// A single question as supplied by a data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QuestionRecord {
    /// The question text shown to the player
    #[garde(length(chars, max = MAX_PROMPT_LENGTH))]
    pub prompt: String,
    /// Candidate answers, the first being the correct one
    #[garde(length(min = 1), inner(length(chars, max = MAX_ANSWER_LENGTH)))]
    pub answers: Vec<String>,
}

impl QuestionRecord {
    /// Creates a record from a prompt and its correct answer
    pub fn new(prompt: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answers: vec![correct_answer.into()],
        }
    }
}

/// The shapes a data source may deliver
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceData {
    /// A list of records
    Records(Vec<QuestionRecord>),
    /// Prompts and correct answers as two index-aligned columns
    Columns {
        definitions: Vec<String>,
        terms: Vec<String>,
    },
}

/// The immutable set of questions for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPool {
    /// Question prompts
    prompts: Vec<String>,
    /// Correct answer for each prompt, index-aligned with `prompts`
    correct_answers: Vec<String>,
}

impl QuestionPool {
    /// Builds a pool from question records
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] for no records and [`Error::Invalid`] if a
    /// record has no answers or exceeds the length limits.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::Empty);
        }

        if records.len() > MAX_POOL_SIZE {
            return Err(Error::Invalid(format!(
                "more than {MAX_POOL_SIZE} questions"
            )));
        }

        records
            .iter()
            .try_for_each(|record| record.validate())
            .map_err(|report| Error::Invalid(report.to_string()))?;

        let (prompts, correct_answers) = records
            .into_iter()
            .filter_map(|QuestionRecord { prompt, answers }| {
                answers.into_iter().next().map(|correct| (prompt, correct))
            })
            .unzip();

        Ok(Self {
            prompts,
            correct_answers,
        })
    }

    /// Builds a pool from index-aligned prompt and answer columns
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedColumns`] if the columns differ in length,
    /// otherwise the same errors as [`QuestionPool::new`].
    pub fn from_columns(prompts: Vec<String>, correct_answers: Vec<String>) -> Result<Self, Error> {
        if prompts.len() != correct_answers.len() {
            return Err(Error::MismatchedColumns {
                prompts: prompts.len(),
                answers: correct_answers.len(),
            });
        }

        Self::new(
            prompts
                .into_iter()
                .zip(correct_answers)
                .map(|(prompt, answer)| QuestionRecord::new(prompt, answer))
                .collect_vec(),
        )
    }

    /// Parses a pool from JSON
    ///
    /// Accepts either a list of `{"prompt", "answers"}` records or an object
    /// with `definitions` (prompts) and `terms` (correct answers) columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the JSON matches neither shape, or any
    /// error from building the pool.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        match serde_json::from_str(json).map_err(|e| Error::Malformed(e.to_string()))? {
            SourceData::Records(records) => Self::new(records),
            SourceData::Columns { definitions, terms } => Self::from_columns(definitions, terms),
        }
    }

    /// Fetches and parses the pool identified by `id` from a source
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the source has nothing for `id`,
    /// or any error from [`QuestionPool::from_json`].
    pub fn load<S: QuestionSource + ?Sized>(source: &S, id: &str) -> Result<Self, Error> {
        let json = source
            .fetch(id)
            .ok_or_else(|| Error::Unavailable(id.to_owned()))?;
        Self::from_json(&json)
    }

    /// Number of questions in the pool
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always `false`: a pool holds at least one question
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// The prompt of the question at `index`
    pub fn prompt(&self, index: usize) -> Option<&str> {
        self.prompts.get(index).map(String::as_str)
    }

    /// The correct answer of the question at `index`
    pub fn correct_answer(&self, index: usize) -> Option<&str> {
        self.correct_answers.get(index).map(String::as_str)
    }

    /// Every correct answer in the pool, which doubles as the distractor pool
    pub fn answers(&self) -> &[String] {
        &self.correct_answers
    }

    /// Number of questions a session asks: the pool size capped at `max_questions`
    pub fn session_length(&self, max_questions: usize) -> usize {
        self.len().min(max_questions)
    }
}

/// Something that can supply raw question data by identifier
///
/// This is the seam to whatever actually fetches question sets, be it a
/// file system, a network request, or an embedded table.
pub trait QuestionSource {
    /// Returns the JSON text for `id`, or `None` if there is none
    fn fetch(&self, id: &str) -> Option<String>;
}

impl<F: Fn(&str) -> Option<String>> QuestionSource for F {
    fn fetch(&self, id: &str) -> Option<String> {
        self(id)
    }
}
