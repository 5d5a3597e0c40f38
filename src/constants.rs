//! Configuration constants for the ladder game
//!
//! This module contains the fixed limits used throughout the game:
//! the money ladder itself, how long a session runs, the bounds of the
//! simulated audience, and the size limits applied to question data.

/// Money ladder configuration constants
pub mod ladder {
    /// Prize values for each question slot, strictly increasing
    pub const MONEY_LADDER: [u64; 15] = [
        100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000,
        250_000, 500_000, 1_000_000,
    ];
    /// Default number of questions in a session, independent of pool size
    pub const MAX_QUESTIONS: usize = 5;
    /// Longest session the ladder can pay out for
    pub const MAX_QUESTIONS_LIMIT: usize = MONEY_LADDER.len();
}

/// Answer set construction constants
pub mod answers {
    /// Number of wrong answers shown alongside the correct one
    pub const MAX_DISTRACTORS: usize = 3;
    /// Number of answers left standing after 50:50
    pub const FIFTY_FIFTY_SIZE: usize = 2;
}

/// Audience poll simulation constants
pub mod audience {
    /// Smallest simulated audience
    pub const MIN_SIZE: usize = 10;
    /// Largest simulated audience
    pub const MAX_SIZE: usize = 500;
    /// Lower bound of the split between the two popular wrong answers
    pub const MIN_INCORRECT_SPLIT: f64 = 0.4;
    /// Upper bound (exclusive) of the split between the two popular wrong answers
    pub const MAX_INCORRECT_SPLIT: f64 = 0.6;
}

/// Timing constants, all in milliseconds
pub mod timing {
    /// Default delay between a correct answer and the next question
    pub const ADVANCE_DELAY: u64 = 2_000;
    /// Longest allowed advance delay
    pub const MAX_ADVANCE_DELAY: u64 = 10_000;
    /// Default time the audience spends voting
    pub const POLL_DURATION: u64 = 5_000;
    /// Longest allowed voting time
    pub const MAX_POLL_DURATION: u64 = 30_000;
}

/// Question data constants
pub mod question {
    /// Maximum number of questions accepted from a data source
    pub const MAX_POOL_SIZE: usize = 10_000;
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 1_000;
    /// Maximum length of a single answer in characters
    pub const MAX_ANSWER_LENGTH: usize = 200;
}
