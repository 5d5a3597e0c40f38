//! # Ladder Game Library
//!
//! This library provides the core logic for a single-player money ladder
//! trivia game. It loads a question set, builds shuffled answer choices,
//! tracks winnings along a fixed prize ladder, and applies four one-time
//! lifelines: Ask the Audience, 50:50, Double Dip, and Jump the Question.
//!
//! The game never renders anything itself. Sounds, dialogs, and views are
//! handed to an [`session::Effects`] implementation, and timed transitions
//! are requested through a scheduling callback and delivered back as
//! [`game::AlarmMessage`]s.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]

pub mod answers;
pub mod audience;
pub mod config;
pub mod constants;
pub mod game;
pub mod ladder;
pub mod lifeline;
pub mod question;
pub mod random;
pub mod session;

pub use config::Options;
pub use game::{AlarmMessage, Game, IncomingMessage, Phase, StartupError, View};
pub use ladder::Money;
pub use lifeline::Lifeline;
pub use question::{QuestionPool, QuestionSource};
pub use session::{Dialog, Effects, Sound};
