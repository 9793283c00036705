use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Matching,
    Arithmetic,
}

impl GameKind {
    /// Name used in the score log.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Matching => "Matching Game",
            Self::Arithmetic => "Math Game",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        [Self::Matching, Self::Arithmetic]
            .into_iter()
            .find(|kind| kind.title() == title)
    }
}

/// Terminal event of a round, handed to the [`OutcomeReporter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    MatchingWon { tier: Tier, remaining_attempts: u8 },
    MatchingLost { tier: Tier },
    ArithmeticCompleted { tier: Tier, correct: u8, total: u8 },
}

impl OutcomeEvent {
    pub const fn game(&self) -> GameKind {
        match self {
            Self::MatchingWon { .. } | Self::MatchingLost { .. } => GameKind::Matching,
            Self::ArithmeticCompleted { .. } => GameKind::Arithmetic,
        }
    }

    pub const fn tier(&self) -> Tier {
        match *self {
            Self::MatchingWon { tier, .. }
            | Self::MatchingLost { tier }
            | Self::ArithmeticCompleted { tier, .. } => tier,
        }
    }
}

impl fmt::Display for OutcomeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchingWon {
                tier,
                remaining_attempts,
            } => write!(
                f,
                "matching level {} won with {} attempts left",
                tier, remaining_attempts
            ),
            Self::MatchingLost { tier } => write!(f, "matching level {} lost", tier),
            Self::ArithmeticCompleted {
                tier,
                correct,
                total,
            } => write!(f, "math level {} finished with {}/{}", tier, correct, total),
        }
    }
}

/// Recoverable failure at the reporter boundary, never fatal to gameplay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Outcome store unavailable: {0}")]
    Unavailable(String),
    #[error("Outcome could not be encoded: {0}")]
    Encoding(String),
}

pub type ReportResult<T = ()> = core::result::Result<T, ReportError>;

/// Durable sink for round outcomes.
pub trait OutcomeReporter {
    /// Records one line for `event`: game, tier, outcome metric and timestamp.
    fn record(&mut self, event: &OutcomeEvent) -> ReportResult;

    /// Every line recorded so far, oldest first.
    fn history(&self) -> ReportResult<Vec<String>>;
}

impl<R: OutcomeReporter + ?Sized> OutcomeReporter for &mut R {
    fn record(&mut self, event: &OutcomeEvent) -> ReportResult {
        (**self).record(event)
    }

    fn history(&self) -> ReportResult<Vec<String>> {
        (**self).history()
    }
}

/// Reporter that keeps nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullReporter;

impl OutcomeReporter for NullReporter {
    fn record(&mut self, _event: &OutcomeEvent) -> ReportResult {
        Ok(())
    }

    fn history(&self) -> ReportResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Sends `event` to `reporter`, logging instead of propagating a failure.
pub(crate) fn report(reporter: &mut impl OutcomeReporter, event: OutcomeEvent) {
    match reporter.record(&event) {
        Ok(()) => log::debug!("Recorded {}", event),
        Err(err) => log::warn!("Could not record {}: {}", event, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_round_trip() {
        assert_eq!(GameKind::from_title("Math Game"), Some(GameKind::Arithmetic));
        assert_eq!(GameKind::from_title("Matching Game"), Some(GameKind::Matching));
        assert_eq!(GameKind::from_title("Memory"), None);
    }

    #[test]
    fn events_know_their_game_and_tier() {
        let event = OutcomeEvent::ArithmeticCompleted {
            tier: Tier::Three,
            correct: 4,
            total: 5,
        };

        assert_eq!(event.game(), GameKind::Arithmetic);
        assert_eq!(event.tier(), Tier::Three);
        assert_eq!(
            OutcomeEvent::MatchingLost { tier: Tier::Two }.game(),
            GameKind::Matching
        );
    }
}
