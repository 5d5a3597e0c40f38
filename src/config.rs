//! Session configuration
//!
//! The options a session is started with: which question source to load,
//! how many questions to ask, how long the timed transitions last, and an
//! optional seed that makes every random draw of the session reproducible.

use web_time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use url::form_urlencoded;

use crate::constants::{
    self,
    timing::{MAX_ADVANCE_DELAY, MAX_POLL_DURATION},
};

/// Name of the query parameter identifying the question source
pub const SOURCE_PARAMETER: &str = "quizscript";
/// Name of the query parameter carrying the random seed
pub const SEED_PARAMETER: &str = "seed";

/// Errors raised while reading session options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No question source identifier was supplied
    #[error("a source script must be provided in the '{SOURCE_PARAMETER}' parameter")]
    MissingSource,
    /// The options failed validation
    #[error("invalid options: {0}")]
    Invalid(String),
}

/// Validates that a duration in milliseconds does not exceed `MAX_MILLIS`.
///
/// Custom validation function for use with the `garde` crate.
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is longer than allowed.
fn validate_duration<const MAX_MILLIS: u64>(val: &Duration, _ctx: &()) -> garde::Result {
    if val.as_millis() <= u128::from(MAX_MILLIS) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "longer than the maximum of {MAX_MILLIS}ms",
        )))
    }
}

/// Options a game session is started with
#[serde_with::serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Identifier of the question source to load
    #[garde(length(min = 1))]
    pub source: Option<String>,
    /// Number of questions in a session when the pool is large enough
    #[garde(range(min = 1, max = constants::ladder::MAX_QUESTIONS_LIMIT))]
    pub max_questions: usize,
    /// Pause between a correct answer and the next question
    #[garde(custom(validate_duration::<MAX_ADVANCE_DELAY>))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub advance_delay: Duration,
    /// Time the audience spends voting before the results are shown
    #[garde(custom(validate_duration::<MAX_POLL_DURATION>))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub poll_duration: Duration,
    /// Seed for the session's random number generator
    #[garde(skip)]
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: None,
            max_questions: constants::ladder::MAX_QUESTIONS,
            advance_delay: Duration::from_millis(constants::timing::ADVANCE_DELAY),
            poll_duration: Duration::from_millis(constants::timing::POLL_DURATION),
            seed: None,
        }
    }
}

impl Options {
    /// Creates default options pointing at the given question source
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Reads options from a URL query string such as `?quizscript=capitals.js&seed=7`
    ///
    /// Unknown parameters are ignored, as is a `seed` that is not a number.
    /// A missing source is not an error here; it is reported by [`Options::source_id`].
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();

        let query = query
            .split_once('?')
            .map_or(query, |(_, rest)| rest)
            .split('#')
            .next()
            .unwrap_or_default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SOURCE_PARAMETER => {
                    options.source = (!value.is_empty()).then(|| value.into_owned());
                }
                SEED_PARAMETER => options.seed = value.parse().ok(),
                _ => (),
            }
        }

        options
    }

    /// Returns the question source identifier
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSource`] if no identifier was supplied.
    pub fn source_id(&self) -> Result<&str, Error> {
        self.source
            .as_deref()
            .filter(|source| !source.is_empty())
            .ok_or(Error::MissingSource)
    }

    /// Validates the options and checks that a source is present
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSource`] or [`Error::Invalid`] with the
    /// validation report.
    pub fn check(&self) -> Result<(), Error> {
        self.source_id()?;
        self.validate()
            .map_err(|report| Error::Invalid(report.to_string()))
    }

    /// Creates the random number generator for a session
    pub fn rng(&self) -> fastrand::Rng {
        self.seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }
}
