//! Answer set construction
//!
//! Each question is shown with its correct answer plus up to three
//! distractors borrowed from the correct answers of other questions in the
//! pool. Pools smaller than four simply produce fewer distractors.

use itertools::Itertools;
use serde::Serialize;

use crate::{
    constants::answers::{FIFTY_FIFTY_SIZE, MAX_DISTRACTORS},
    random::{random_index, shuffle_in_place},
};

/// The candidate answers shown for the active question, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: Vec<String>,
}

impl AnswerSet {
    /// Builds the answer set for the question at `question_index`
    ///
    /// Distractors are drawn from distinct pool indices other than
    /// `question_index`. Identical answer text at different indices is not
    /// collapsed. Returns `None` if `question_index` is outside the pool.
    pub fn build(
        rng: &mut fastrand::Rng,
        question_index: usize,
        pool: &[String],
    ) -> Option<Self> {
        let correct = pool.get(question_index)?;
        let distractor_count = MAX_DISTRACTORS.min(pool.len() - 1);

        let mut drawn = Vec::with_capacity(distractor_count);
        while drawn.len() < distractor_count {
            let Some(index) = random_index(rng, pool.len()) else {
                break;
            };
            if index != question_index && !drawn.contains(&index) {
                drawn.push(index);
            }
        }

        let mut answers = std::iter::once(correct)
            .chain(drawn.into_iter().map(|index| &pool[index]))
            .cloned()
            .collect_vec();
        shuffle_in_place(rng, &mut answers);

        Some(Self { answers })
    }

    /// Cuts the set down to the correct answer and one random wrong answer
    ///
    /// Sets of two or fewer answers are left alone apart from a reshuffle.
    pub fn fifty_fifty(&mut self, rng: &mut fastrand::Rng, correct: &str) {
        if let Some(correct_index) = self.position(correct) {
            let wrong = (0..self.answers.len())
                .filter(|&i| i != correct_index)
                .collect_vec();
            let kept_wrong = random_index(rng, wrong.len()).map(|i| wrong[i]);

            self.answers = std::mem::take(&mut self.answers)
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i == correct_index || Some(*i) == kept_wrong)
                .map(|(_, answer)| answer)
                .collect_vec();
        } else {
            self.answers.truncate(FIFTY_FIFTY_SIZE);
        }

        shuffle_in_place(rng, &mut self.answers);
    }

    /// Number of answers in the set
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether the set has no answers
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Whether `answer` is one of the candidates
    pub fn contains(&self, answer: &str) -> bool {
        self.position(answer).is_some()
    }

    /// Display position of `answer`, if present
    pub fn position(&self, answer: &str) -> Option<usize> {
        self.answers.iter().position(|a| a == answer)
    }

    /// The answers in display order
    pub fn as_slice(&self) -> &[String] {
        &self.answers
    }

    /// Iterates over the answers in display order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for AnswerSet {
    fn from(answers: Vec<String>) -> Self {
        Self { answers }
    }
}
