//! Presentation side effects
//!
//! This module defines the trait through which the game reaches the outside
//! world: sounds, dialogs, and the rendered game state. The game fires
//! these and moves on; the only thing it ever waits for is the player
//! dismissing a dialog, which arrives back as an incoming message.

use web_time::Duration;

use itertools::Itertools;
use serde::Serialize;
use serde_with::serde_as;

use crate::{audience::Poll, game::View, lifeline::Lifeline};

/// Notification sounds, keyed by the event that triggers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sound {
    /// An answer was right
    Correct,
    /// An answer was wrong
    Incorrect,
    /// A lifeline was invoked
    LifelineActivated,
    /// The last question was cleared
    SessionWon,
}

/// Informational dialogs shown to the player
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Dialog {
    /// The audience is voting; closes by itself when voting ends
    AudienceVoting {
        /// How long the vote lasts
        #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
        duration: Duration,
    },
    /// The audience poll results
    AudienceResults(Poll),
    /// Two wrong answers were removed
    FiftyFifty,
    /// Double Dip is now protecting the question
    DoubleDip,
    /// A wrong answer was forgiven by Double Dip
    DoubleDipRetry,
    /// The question was skipped
    JumpTheQuestion,
    /// How the lifelines work
    LifelineGuide,
    /// The game cannot start
    Error(String),
}

impl Dialog {
    /// The dialog heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::AudienceVoting { .. } | Self::AudienceResults(_) => {
                Lifeline::AskTheAudience.name()
            }
            Self::FiftyFifty => Lifeline::FiftyFifty.name(),
            Self::DoubleDip | Self::DoubleDipRetry => Lifeline::DoubleDip.name(),
            Self::JumpTheQuestion => Lifeline::JumpTheQuestion.name(),
            Self::LifelineGuide => "Lifelines",
            Self::Error(_) => "Error",
        }
    }

    /// The dialog body as plain text
    pub fn text(&self) -> String {
        match self {
            Self::AudienceVoting { .. } => "The audience is voting...".to_owned(),
            Self::AudienceResults(poll) => std::iter::once(format!(
                "Your audience size: {}",
                poll.audience_size()
            ))
            .chain(
                poll.rows()
                    .into_iter()
                    .map(|row| format!("{}: {}%", row.answer, row.percent)),
            )
            .join("\n"),
            Self::FiftyFifty => "Two incorrect answers were removed! You now have a 50% chance of getting this right if you guess.".to_owned(),
            Self::DoubleDip => "If you get this question wrong, you will be given another chance to answer.".to_owned(),
            Self::DoubleDipRetry => "Oops.. that wasn't the right answer! Fortunately, you get a chance to try again.".to_owned(),
            Self::JumpTheQuestion => "You have skipped that question!".to_owned(),
            Self::LifelineGuide => std::iter::once(
                "Lifelines can be used to help you answer a tough question. They can each only be used once.".to_owned(),
            )
            .chain(std::iter::once(
                "The 50:50 lifeline cannot be used after Double Dip is activated for a question. Use them in the opposite order if you wish to do this.".to_owned(),
            ))
            .chain(
                Lifeline::ALL
                    .into_iter()
                    .map(|lifeline| format!("{}: {}", lifeline.name(), lifeline.description())),
            )
            .join("\n"),
            Self::Error(message) => message.clone(),
        }
    }

    /// Whether the player can close the dialog
    pub fn is_dismissible(&self) -> bool {
        !matches!(self, Self::AudienceVoting { .. })
    }
}

/// Trait for delivering side effects to the presentation layer
///
/// Implementations might play audio through the browser, draw modals in a
/// terminal, or just record calls in tests. None of these calls may feed
/// back into the game synchronously; dismissals come back as
/// [`crate::game::IncomingMessage::Dismiss`].
pub trait Effects {
    /// Plays a notification sound
    fn play(&self, sound: Sound);

    /// Shows an informational dialog
    fn present(&self, dialog: &Dialog);

    /// Sends the current game state for rendering
    fn send_state(&self, state: &View);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;

    #[test]
    fn test_titles() {
        assert_eq!(Dialog::FiftyFifty.title(), "50:50");
        assert_eq!(Dialog::DoubleDipRetry.title(), "Double Dip");
        assert_eq!(
            Dialog::AudienceVoting {
                duration: Duration::from_secs(5)
            }
            .title(),
            "Ask the Audience"
        );
        assert_eq!(Dialog::Error("boom".to_string()).title(), "Error");
    }

    #[test]
    fn test_audience_results_text() {
        let mut rng = fastrand::Rng::with_seed(31);
        let answers = AnswerSet::from(vec!["Paris".to_string(), "Rome".to_string()]);
        let poll = Poll::simulate(&mut rng, &answers, "Paris");
        let text = Dialog::AudienceResults(poll.clone()).text();

        assert!(text.starts_with(&format!("Your audience size: {}", poll.audience_size())));
        assert!(text.contains("Paris: "));
        assert!(text.contains("Rome: "));
    }

    #[test]
    fn test_guide_lists_every_lifeline() {
        let text = Dialog::LifelineGuide.text();
        assert!(Lifeline::ALL.iter().all(|l| text.contains(l.name())));
    }

    #[test]
    fn test_voting_is_not_dismissible() {
        assert!(
            !Dialog::AudienceVoting {
                duration: Duration::ZERO
            }
            .is_dismissible()
        );
        assert!(Dialog::JumpTheQuestion.is_dismissible());
    }

    #[test]
    fn test_dialog_serialization() {
        let json = serde_json::to_string(&Dialog::AudienceVoting {
            duration: Duration::from_millis(1500),
        })
        .unwrap();
        assert_eq!(json, r#"{"AudienceVoting":{"duration":1500}}"#);
    }
}
