//! Lifelines and their bookkeeping
//!
//! A player gets four lifelines per session, each usable once. This module
//! names them, tracks which have been spent, and describes why a request to
//! use one can be turned down. Applying their effects is the game's job.

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one-time assists available to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Lifeline {
    /// Poll a virtual audience on the current answers
    AskTheAudience,
    /// Remove all but one wrong answer
    FiftyFifty,
    /// Survive one wrong answer on the current question
    DoubleDip,
    /// Skip the current question without banking its value
    JumpTheQuestion,
}

impl Lifeline {
    /// Every lifeline, in the order they are offered
    pub const ALL: [Self; 4] = [
        Self::AskTheAudience,
        Self::FiftyFifty,
        Self::DoubleDip,
        Self::JumpTheQuestion,
    ];

    /// Display name of the lifeline
    pub fn name(self) -> &'static str {
        match self {
            Self::AskTheAudience => "Ask the Audience",
            Self::FiftyFifty => "50:50",
            Self::DoubleDip => "Double Dip",
            Self::JumpTheQuestion => "Jump the Question",
        }
    }

    /// One-line explanation used by the lifeline guide
    pub fn description(self) -> &'static str {
        match self {
            Self::AskTheAudience => {
                "Have the (virtual) audience vote on what answer is correct. They may or may not be right."
            }
            Self::FiftyFifty => {
                "Removes two of the incorrect answers, leaving you with a 50% chance of getting the question right."
            }
            Self::DoubleDip => {
                "Gives you two tries on a question. This does not carry over to the next question."
            }
            Self::JumpTheQuestion => "Skip a question entirely.",
        }
    }
}

/// Why a lifeline request was turned down
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// The game is not waiting for an answer
    #[error("no question is being answered")]
    NotAnswering,
    /// Another lifeline or a pending transition is still resolving
    #[error("another action is still in progress")]
    Busy,
    /// The lifeline was already spent this session
    #[error("lifeline has already been used")]
    AlreadyUsed,
    /// 50:50 cannot follow Double Dip on the same question
    #[error("50:50 cannot be used after Double Dip on the same question")]
    BlockedByDoubleDip,
}

/// The set of lifelines spent in the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsedLifelines(EnumMap<Lifeline, bool>);

impl UsedLifelines {
    /// Whether `lifeline` has been spent
    pub fn contains(&self, lifeline: Lifeline) -> bool {
        self.0[lifeline]
    }

    /// Marks `lifeline` as spent, returning `false` if it already was
    pub fn insert(&mut self, lifeline: Lifeline) -> bool {
        !std::mem::replace(&mut self.0[lifeline], true)
    }

    /// Makes every lifeline available again
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Spent lifelines, in the order they are offered
    pub fn iter(&self) -> impl Iterator<Item = Lifeline> + '_ {
        self.0.iter().filter(|(_, used)| **used).map(|(lifeline, _)| lifeline)
    }

    /// Number of spent lifelines
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no lifeline has been spent
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lifelines still available
    pub fn remaining(&self) -> Vec<Lifeline> {
        Lifeline::ALL
            .into_iter()
            .filter(|&lifeline| !self.contains(lifeline))
            .collect_vec()
    }
}

/// How far along the active lifeline is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// The audience is still voting
    Polling,
    /// The closing dialog is up and must be dismissed
    AwaitingDismissal,
}

/// A lifeline currently being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveLifeline {
    /// Which lifeline
    pub kind: Lifeline,
    /// Its progress
    pub stage: Stage,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_insert_once() {
        let mut used = UsedLifelines::default();

        assert!(used.is_empty());
        assert!(used.insert(Lifeline::DoubleDip));
        assert!(!used.insert(Lifeline::DoubleDip));
        assert!(used.contains(Lifeline::DoubleDip));
        assert!(!used.contains(Lifeline::FiftyFifty));
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_iter_and_remaining() {
        let mut used = UsedLifelines::default();
        used.insert(Lifeline::JumpTheQuestion);
        used.insert(Lifeline::AskTheAudience);

        assert_eq!(
            used.iter().collect_vec(),
            vec![Lifeline::AskTheAudience, Lifeline::JumpTheQuestion]
        );
        assert_eq!(
            used.remaining(),
            vec![Lifeline::FiftyFifty, Lifeline::DoubleDip]
        );
    }

    #[test]
    fn test_clear() {
        let mut used = UsedLifelines::default();
        Lifeline::ALL.into_iter().for_each(|l| {
            used.insert(l);
        });
        assert_eq!(used.len(), 4);

        used.clear();
        assert!(used.is_empty());
        assert_eq!(used.remaining(), Lifeline::ALL.to_vec());
    }

    #[test]
    fn test_names() {
        assert_eq!(Lifeline::FiftyFifty.name(), "50:50");
        assert_eq!(Lifeline::JumpTheQuestion.name(), "Jump the Question");
        assert!(Lifeline::ALL.iter().all(|l| !l.description().is_empty()));
    }

    #[test]
    fn test_used_serializes_as_map() {
        let mut used = UsedLifelines::default();
        used.insert(Lifeline::DoubleDip);
        let json = serde_json::to_string(&used).unwrap();

        assert!(json.contains("\"DoubleDip\":true"));
        assert!(json.contains("\"FiftyFifty\":false"));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::AlreadyUsed.to_string(),
            "lifeline has already been used"
        );
    }
}
