//! Core game logic and state management
//!
//! This module contains the game session: which question is up, how much
//! money is banked, which lifelines are spent, and how answers, lifelines,
//! timers, and replays move the session between phases. Every change runs
//! through [`Game::receive_message`] or [`Game::receive_alarm`], so the
//! session is only ever mutated one event at a time.

use std::fmt::Debug;

use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::{
    answers::AnswerSet,
    audience::Poll,
    config::{self, Options},
    constants::ladder::MAX_QUESTIONS_LIMIT,
    ladder::{self, Money},
    lifeline::{ActiveLifeline, Lifeline, Rejection, Stage, UsedLifelines},
    question::{self, QuestionPool, QuestionSource},
    session::{Dialog, Effects, Sound},
};

/// The phase a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to pick an answer
    Answering,
    /// A lifeline is resolving; returns to `Answering` afterwards
    UsingLifeline,
    /// Every question was cleared
    Finished,
    /// A wrong answer ended the session
    Failed,
}

impl Phase {
    /// Whether the session is over until the player starts again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

/// Input from the player
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum IncomingMessage {
    /// The player picked an answer
    Answer(String),
    /// The player asked for a lifeline
    Lifeline(Lifeline),
    /// The player closed the dialog on screen
    Dismiss,
    /// The player wants a fresh session
    PlayAgain,
    /// The player opened the lifeline guide
    OpenGuide,
}

/// Timers the game asks the host to fire later
///
/// Each alarm carries the epoch of the session that scheduled it. Starting
/// again bumps the epoch, which turns every outstanding alarm into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Move past a correctly answered question
    Advance {
        /// Session epoch that scheduled the alarm
        epoch: u64,
        /// Question that was answered
        index: usize,
    },
    /// The audience has finished voting
    AudienceVoted {
        /// Session epoch that scheduled the alarm
        epoch: u64,
    },
}

/// Errors that prevent a session from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The session options are unusable
    #[error(transparent)]
    Config(#[from] config::Error),
    /// The question data could not be loaded
    #[error(transparent)]
    Questions(#[from] question::Error),
}

/// An answer button as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    /// The answer text
    pub text: String,
    /// Whether the button is disabled
    pub disabled: bool,
}

/// Snapshot of the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum View {
    /// A lifeline is resolving; nothing is interactive
    Hidden,
    /// A question is up
    Question {
        /// Index of the current question (0-based)
        index: usize,
        /// Number of questions in the session
        count: usize,
        /// The question text
        prompt: String,
        /// Money banked so far
        money: Money,
        /// What answering this question correctly banks
        question_value: Money,
        /// Answer buttons in display order
        answers: Vec<AnswerView>,
        /// Whether each lifeline can be used right now
        lifelines: EnumMap<Lifeline, bool>,
    },
    /// The session ended on a wrong answer
    Failed {
        /// Money the player leaves with
        money: Money,
    },
    /// Every question was answered
    Finished {
        /// Money the player leaves with
        money: Money,
    },
}

impl View {
    /// Converts the view to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A single-player game session
pub struct Game {
    /// Questions for the session
    pool: QuestionPool,
    /// Options the session was started with
    options: Options,
    /// Source of every random draw
    rng: fastrand::Rng,
    /// Incremented on every replay to invalidate stale alarms
    epoch: u64,
    /// Current phase
    phase: Phase,
    /// Index of the current question
    question_index: usize,
    /// Last fully-earned ladder value
    money: Money,
    /// Answers shown for the current question
    answer_set: AnswerSet,
    /// Lifelines spent this session
    used_lifelines: UsedLifelines,
    /// Lifeline currently resolving
    active_lifeline: Option<ActiveLifeline>,
    /// Whether Double Dip will absorb the next wrong answer
    double_dip_protection: bool,
    /// Wrong answer already absorbed by Double Dip on this question
    double_dipped_answer: Option<String>,
    /// Whether a correct answer is waiting for its advance alarm
    pending_advance: bool,
}

impl Debug for Game {
    /// Custom debug implementation that skips the question pool
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("question_index", &self.question_index)
            .field("money", &self.money)
            .field("active_lifeline", &self.active_lifeline)
            .finish_non_exhaustive()
    }
}

// Accessors
impl Game {
    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the current question
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Money banked so far
    pub fn money(&self) -> Money {
        self.money
    }

    /// Answers shown for the current question
    pub fn answer_set(&self) -> &AnswerSet {
        &self.answer_set
    }

    /// Lifelines spent this session
    pub fn used_lifelines(&self) -> &UsedLifelines {
        &self.used_lifelines
    }

    /// Lifeline currently resolving, if any
    pub fn active_lifeline(&self) -> Option<ActiveLifeline> {
        self.active_lifeline
    }

    /// Whether Double Dip will absorb the next wrong answer
    pub fn double_dip_protection(&self) -> bool {
        self.double_dip_protection
    }

    /// Wrong answer already absorbed by Double Dip on this question
    pub fn double_dipped_answer(&self) -> Option<&str> {
        self.double_dipped_answer.as_deref()
    }

    /// Epoch of the current session
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of questions in this session
    pub fn session_length(&self) -> usize {
        self.pool.session_length(self.options.max_questions)
    }

    /// The question pool
    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    fn correct_answer(&self) -> Option<&str> {
        self.pool.correct_answer(self.question_index)
    }
}

impl Game {
    /// Creates a new session over the given questions
    ///
    /// The first answer set is built immediately. The session's random
    /// number generator is seeded from `options.seed` when present.
    /// `options.max_questions` is clamped to `1..=MAX_QUESTIONS_LIMIT`, so a
    /// session asks at least one question and every question has a prize.
    pub fn new(pool: QuestionPool, mut options: Options) -> Self {
        let max_questions = options.max_questions.clamp(1, MAX_QUESTIONS_LIMIT);
        if max_questions != options.max_questions {
            log::debug!(
                "clamping max_questions from {} to {max_questions}",
                options.max_questions
            );
            options.max_questions = max_questions;
        }

        let mut game = Self {
            rng: options.rng(),
            pool,
            options,
            epoch: 0,
            phase: Phase::Answering,
            question_index: 0,
            money: Money::ZERO,
            answer_set: AnswerSet::default(),
            used_lifelines: UsedLifelines::default(),
            active_lifeline: None,
            double_dip_protection: false,
            double_dipped_answer: None,
            pending_advance: false,
        };
        game.enter_question();
        game
    }

    /// Loads the configured question source and starts a session
    ///
    /// Any failure is shown to the player as a blocking error dialog before
    /// being returned; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Config`] when no source is configured or the
    /// options are invalid, and [`StartupError::Questions`] when the source
    /// cannot be loaded.
    pub fn bootstrap<Q: QuestionSource + ?Sized, E: Effects>(
        options: Options,
        source: &Q,
        effects: &E,
    ) -> Result<Self, StartupError> {
        let pool = options
            .check()
            .map_err(StartupError::from)
            .and_then(|()| {
                let id = options.source_id()?;
                Ok(QuestionPool::load(source, id)?)
            });

        match pool {
            Ok(pool) => {
                log::info!(
                    "starting session with {} questions from {:?}",
                    pool.len(),
                    options.source
                );
                let game = Self::new(pool, options);
                effects.send_state(&game.state_message());
                Ok(game)
            }
            Err(e) => {
                log::warn!("cannot start session: {e}");
                effects.present(&Dialog::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Handles input from the player
    ///
    /// Input that does not apply in the current state is ignored. The view
    /// is re-sent after every change.
    ///
    /// # Type Parameters
    ///
    /// * `E` - Type implementing the Effects trait for presentation
    /// * `S` - Function type for scheduling alarm messages
    pub fn receive_message<E: Effects, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: IncomingMessage,
        schedule_message: S,
        effects: &E,
    ) {
        match message {
            IncomingMessage::Answer(answer) => {
                self.submit_answer(&answer, schedule_message, effects);
            }
            IncomingMessage::Lifeline(lifeline) => {
                if let Err(rejection) = self.use_lifeline(lifeline, schedule_message, effects) {
                    log::debug!("rejected {lifeline:?}: {rejection}");
                }
            }
            IncomingMessage::Dismiss => self.dismiss(effects),
            IncomingMessage::PlayAgain => self.play_again(effects),
            IncomingMessage::OpenGuide => {
                if matches!(self.state_message(), View::Question { .. }) {
                    effects.present(&Dialog::LifelineGuide);
                } else {
                    log::debug!("ignoring guide request in {:?}", self.phase);
                }
            }
        }
    }

    /// Handles a timer that was scheduled earlier
    ///
    /// Alarms from an earlier session epoch, or that no longer match the
    /// state they were scheduled for, are dropped.
    pub fn receive_alarm<E: Effects>(&mut self, message: AlarmMessage, effects: &E) {
        match message {
            AlarmMessage::Advance { epoch, index }
                if epoch == self.epoch && index == self.question_index && self.pending_advance =>
            {
                self.advance(effects);
                effects.send_state(&self.state_message());
            }
            AlarmMessage::AudienceVoted { epoch }
                if epoch == self.epoch
                    && matches!(
                        self.active_lifeline,
                        Some(ActiveLifeline {
                            kind: Lifeline::AskTheAudience,
                            stage: Stage::Polling,
                        })
                    ) =>
            {
                self.reveal_poll(effects);
                effects.send_state(&self.state_message());
            }
            message => log::debug!("dropping stale alarm {message:?}"),
        }
    }

    /// Checks whether `lifeline` may be used right now
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] explaining why the lifeline is unavailable.
    pub fn check_lifeline(&self, lifeline: Lifeline) -> Result<(), Rejection> {
        if self.active_lifeline.is_some() || self.pending_advance {
            return Err(Rejection::Busy);
        }
        if self.phase != Phase::Answering {
            return Err(Rejection::NotAnswering);
        }
        if self.used_lifelines.contains(lifeline) {
            return Err(Rejection::AlreadyUsed);
        }
        if lifeline == Lifeline::FiftyFifty
            && (self.double_dip_protection || self.double_dipped_answer.is_some())
        {
            return Err(Rejection::BlockedByDoubleDip);
        }
        Ok(())
    }

    /// Invokes a lifeline
    ///
    /// The lifeline is marked as spent, its effect applied, and it stays
    /// active until the player dismisses its closing dialog. Ask the Audience
    /// first waits for the voting alarm.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] and leaves the session untouched if the
    /// lifeline is unavailable.
    pub fn use_lifeline<E: Effects, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        lifeline: Lifeline,
        mut schedule_message: S,
        effects: &E,
    ) -> Result<(), Rejection> {
        self.check_lifeline(lifeline)?;

        log::info!("using {} on question {}", lifeline.name(), self.question_index);

        self.used_lifelines.insert(lifeline);
        self.active_lifeline = Some(ActiveLifeline {
            kind: lifeline,
            stage: Stage::AwaitingDismissal,
        });
        self.phase = Phase::UsingLifeline;
        effects.play(Sound::LifelineActivated);

        match lifeline {
            Lifeline::AskTheAudience => {
                let duration = self.options.poll_duration;
                if duration.is_zero() {
                    self.reveal_poll(effects);
                } else {
                    self.active_lifeline = Some(ActiveLifeline {
                        kind: lifeline,
                        stage: Stage::Polling,
                    });
                    effects.present(&Dialog::AudienceVoting { duration });
                    schedule_message(AlarmMessage::AudienceVoted { epoch: self.epoch }, duration);
                }
            }
            Lifeline::FiftyFifty => {
                if let Some(correct) = self.pool.correct_answer(self.question_index) {
                    self.answer_set.fifty_fifty(&mut self.rng, correct);
                }
                effects.present(&Dialog::FiftyFifty);
            }
            Lifeline::DoubleDip => {
                self.double_dip_protection = true;
                effects.present(&Dialog::DoubleDip);
            }
            Lifeline::JumpTheQuestion => {
                self.advance(effects);
                effects.present(&Dialog::JumpTheQuestion);
            }
        }

        effects.send_state(&self.state_message());
        Ok(())
    }

    /// Returns the view the presentation layer should show
    pub fn state_message(&self) -> View {
        if self.active_lifeline.is_some() {
            return View::Hidden;
        }

        match self.phase {
            Phase::Failed => View::Failed { money: self.money },
            Phase::Finished => View::Finished { money: self.money },
            Phase::Answering | Phase::UsingLifeline => View::Question {
                index: self.question_index,
                count: self.session_length(),
                prompt: self
                    .pool
                    .prompt(self.question_index)
                    .unwrap_or_default()
                    .to_owned(),
                money: self.money,
                question_value: ladder::value_at(self.question_index).unwrap_or(self.money),
                answers: self
                    .answer_set
                    .iter()
                    .map(|answer| AnswerView {
                        text: answer.to_owned(),
                        disabled: self.double_dipped_answer.as_deref() == Some(answer),
                    })
                    .collect_vec(),
                lifelines: EnumMap::from_fn(|lifeline| self.check_lifeline(lifeline).is_ok()),
            },
        }
    }

    fn submit_answer<E: Effects, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        answer: &str,
        mut schedule_message: S,
        effects: &E,
    ) {
        if self.phase != Phase::Answering || self.active_lifeline.is_some() || self.pending_advance
        {
            log::debug!("ignoring answer {answer:?} in {:?}", self.phase);
            return;
        }
        if !self.answer_set.contains(answer) || self.double_dipped_answer.as_deref() == Some(answer)
        {
            log::debug!("ignoring unavailable answer {answer:?}");
            return;
        }

        if self.correct_answer() == Some(answer) {
            effects.play(Sound::Correct);
            self.money = ladder::value_at(self.question_index).unwrap_or(self.money);

            let delay = self.options.advance_delay;
            if delay.is_zero() {
                self.advance(effects);
            } else {
                self.pending_advance = true;
                schedule_message(
                    AlarmMessage::Advance {
                        epoch: self.epoch,
                        index: self.question_index,
                    },
                    delay,
                );
            }
        } else if self.double_dip_protection {
            effects.play(Sound::Incorrect);
            self.double_dip_protection = false;
            self.double_dipped_answer = Some(answer.to_owned());
            effects.present(&Dialog::DoubleDipRetry);
        } else {
            effects.play(Sound::Incorrect);
            log::info!(
                "session failed on question {} with {}",
                self.question_index,
                self.money
            );
            self.phase = Phase::Failed;
        }

        effects.send_state(&self.state_message());
    }

    fn dismiss<E: Effects>(&mut self, effects: &E) {
        match self.active_lifeline {
            Some(ActiveLifeline {
                kind,
                stage: Stage::AwaitingDismissal,
            }) => {
                log::debug!("{} resolved", kind.name());
                self.active_lifeline = None;
                if self.phase == Phase::UsingLifeline {
                    self.phase = Phase::Answering;
                }
                effects.send_state(&self.state_message());
            }
            _ => log::debug!("nothing to dismiss"),
        }
    }

    fn play_again<E: Effects>(&mut self, effects: &E) {
        if !self.phase.is_terminal() {
            log::debug!("ignoring replay in {:?}", self.phase);
            return;
        }

        self.epoch += 1;
        self.phase = Phase::Answering;
        self.question_index = 0;
        self.money = Money::ZERO;
        self.used_lifelines.clear();
        self.active_lifeline = None;
        self.double_dip_protection = false;
        self.double_dipped_answer = None;
        self.pending_advance = false;
        self.enter_question();

        log::info!("starting session epoch {}", self.epoch);
        effects.send_state(&self.state_message());
    }

    fn reveal_poll<E: Effects>(&mut self, effects: &E) {
        let correct = self
            .pool
            .correct_answer(self.question_index)
            .unwrap_or_default();
        let poll = Poll::simulate(&mut self.rng, &self.answer_set, correct);

        self.active_lifeline = Some(ActiveLifeline {
            kind: Lifeline::AskTheAudience,
            stage: Stage::AwaitingDismissal,
        });
        effects.present(&Dialog::AudienceResults(poll));
    }

    /// Moves to the next question, or finishes when none are left
    fn advance<E: Effects>(&mut self, effects: &E) {
        self.question_index += 1;
        self.pending_advance = false;
        self.double_dip_protection = false;
        self.double_dipped_answer = None;

        if self.enter_question() {
            log::info!("session finished with {}", self.money);
            effects.play(Sound::SessionWon);
        }
    }

    /// Builds the answer set for the current question, returning `true` if
    /// the session has run out of questions instead
    fn enter_question(&mut self) -> bool {
        if self.question_index < self.session_length() {
            self.answer_set =
                AnswerSet::build(&mut self.rng, self.question_index, self.pool.answers())
                    .unwrap_or_default();
            false
        } else {
            self.phase = Phase::Finished;
            true
        }
    }
}
