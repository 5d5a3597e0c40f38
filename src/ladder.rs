//! Money ladder and prize values
//!
//! Every question slot is worth a fixed amount. Answering a question
//! correctly banks the value of its slot; the banked value is what the
//! player leaves with when a later answer is wrong.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::ladder::MONEY_LADDER;

/// An amount of prize money in whole dollars
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// No money banked
    pub const ZERO: Self = Self(0);

    /// The amount in dollars
    pub fn dollars(self) -> u64 {
        self.0
    }
}

impl Display for Money {
    /// Formats as US currency with thousands separators, e.g. `$125,000`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let grouped = digits
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk))
            .join(",");
        write!(f, "${grouped}")
    }
}

/// Returns the prize for answering the question at `index` correctly
pub fn value_at(index: usize) -> Option<Money> {
    MONEY_LADDER.get(index).copied().map(Money)
}
