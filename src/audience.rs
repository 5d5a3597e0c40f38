//! Ask-the-audience poll simulation
//!
//! The audience is a crowd of virtual voters with hidden biases. Some
//! fraction knows the right answer; everybody else splits between one or
//! two "popular" wrong answers. The poll is purely cosmetic and never
//! influences whether an answer is judged correct.

use itertools::Itertools;
use serde::Serialize;

use crate::{
    answers::AnswerSet,
    constants::audience::{MAX_INCORRECT_SPLIT, MAX_SIZE, MIN_INCORRECT_SPLIT, MIN_SIZE},
    random::{random_between, random_index, random_int},
};

/// The hidden parameters of one poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bias {
    /// Probability that a voter picks the correct answer
    pub correct_share: f64,
    /// Probability that a wrong vote goes to the primary rather than the secondary wrong answer
    pub incorrect_split: f64,
    /// Display index of the most popular wrong answer
    pub primary_incorrect: Option<usize>,
    /// Display index of the second popular wrong answer; equals the primary with fewer than three options
    pub secondary_incorrect: Option<usize>,
}

impl Bias {
    /// Draws fresh biases for a set of `option_count` answers
    pub fn draw(rng: &mut fastrand::Rng, option_count: usize, correct: Option<usize>) -> Self {
        let wrong = (0..option_count)
            .filter(|&i| Some(i) != correct)
            .collect_vec();

        let primary_incorrect = random_index(rng, wrong.len()).map(|i| wrong[i]);

        let secondary_incorrect = if option_count >= 3 {
            let others = wrong
                .iter()
                .copied()
                .filter(|&i| Some(i) != primary_incorrect)
                .collect_vec();
            random_index(rng, others.len())
                .map(|i| others[i])
                .or(primary_incorrect)
        } else {
            primary_incorrect
        };

        Self {
            correct_share: rng.f64(),
            incorrect_split: random_between(rng, MIN_INCORRECT_SPLIT, MAX_INCORRECT_SPLIT),
            primary_incorrect,
            secondary_incorrect,
        }
    }
}

/// One line of the poll as shown to the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollRow {
    /// The answer text
    pub answer: String,
    /// Votes the answer received
    pub votes: usize,
    /// Unrounded percentage of the audience, suitable for bar widths
    pub share: f64,
    /// Percentage rounded for display
    pub percent: u32,
}

/// The outcome of an audience poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poll {
    /// Answers in the order they were shown
    answers: Vec<String>,
    /// Votes for each answer, index-aligned with `answers`
    tally: Vec<usize>,
    /// Number of voters
    audience_size: usize,
}

impl Poll {
    /// Runs a poll over the current answers with freshly drawn biases and audience size
    pub fn simulate(rng: &mut fastrand::Rng, answers: &AnswerSet, correct: &str) -> Self {
        let audience_size = random_int(rng, MIN_SIZE as i64, MAX_SIZE as i64) as usize;
        let correct_index = answers.position(correct);
        let bias = Bias::draw(rng, answers.len(), correct_index);

        Self::simulate_with(rng, answers, correct_index, &bias, audience_size)
    }

    /// Runs a poll with the given biases and audience size
    ///
    /// Every voter casts exactly one vote, so the tally always sums to
    /// `audience_size` unless there are no answers to vote for.
    pub fn simulate_with(
        rng: &mut fastrand::Rng,
        answers: &AnswerSet,
        correct: Option<usize>,
        bias: &Bias,
        audience_size: usize,
    ) -> Self {
        let mut tally = vec![0; answers.len()];

        if answers.is_empty() {
            return Self {
                answers: Vec::new(),
                tally,
                audience_size: 0,
            };
        }

        for _ in 0..audience_size {
            let wrong_choice = if rng.f64() < bias.incorrect_split {
                bias.primary_incorrect
            } else {
                bias.secondary_incorrect
            };

            let choice = match correct {
                Some(correct) if rng.f64() < bias.correct_share => correct,
                _ => wrong_choice.or(correct).unwrap_or_default(),
            };

            tally[choice] += 1;
        }

        Self {
            answers: answers.as_slice().to_vec(),
            tally,
            audience_size,
        }
    }

    /// Votes for each answer, in display order
    pub fn tally(&self) -> &[usize] {
        &self.tally
    }

    /// Number of voters
    pub fn audience_size(&self) -> usize {
        self.audience_size
    }

    /// The answers that were voted on, in display order
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Poll results ready for display
    pub fn rows(&self) -> Vec<PollRow> {
        self.answers
            .iter()
            .zip(&self.tally)
            .map(|(answer, &votes)| {
                let share = if self.audience_size == 0 {
                    0.
                } else {
                    votes as f64 / self.audience_size as f64 * 100.
                };
                PollRow {
                    answer: answer.clone(),
                    votes,
                    share,
                    percent: share.round() as u32,
                }
            })
            .collect_vec()
    }
}
