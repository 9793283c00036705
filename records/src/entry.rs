use core::str::FromStr;
use pairup_core::{GameKind, OutcomeEvent, Tier};
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::*;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// What a finished round scored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Matching round won with attempts to spare
    Completed { remaining_attempts: u8 },
    /// Matching round lost, no attempts left
    Failed,
    /// Arithmetic level finished
    Answered { correct: u8, total: u8 },
}

impl Metric {
    fn from_event(event: &OutcomeEvent) -> Self {
        match *event {
            OutcomeEvent::MatchingWon {
                remaining_attempts, ..
            } => Self::Completed { remaining_attempts },
            OutcomeEvent::MatchingLost { .. } => Self::Failed,
            OutcomeEvent::ArithmeticCompleted { correct, total, .. } => {
                Self::Answered { correct, total }
            }
        }
    }
}

/// One line of the score log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub game: GameKind,
    pub tier: Tier,
    pub metric: Metric,
    pub recorded_at: PrimitiveDateTime,
}

impl ScoreEntry {
    pub fn from_event(event: &OutcomeEvent, recorded_at: PrimitiveDateTime) -> Self {
        Self {
            game: event.game(),
            tier: event.tier(),
            metric: Metric::from_event(event),
            recorded_at,
        }
    }

    pub fn to_line(&self) -> Result<String> {
        let timestamp = self.recorded_at.format(TIMESTAMP_FORMAT)?;
        let head = format!("{} - Level: {}", self.game.title(), self.tier);
        Ok(match self.metric {
            Metric::Completed { remaining_attempts } => format!(
                "{head}, Remaining Attempts: {remaining_attempts}, Completed: {timestamp}"
            ),
            Metric::Failed => format!("{head}, Remaining Attempts: 0, Failed: {timestamp}"),
            Metric::Answered { correct, total } => {
                format!("{head}, Correct Answers: {correct}/{total}, Completed: {timestamp}")
            }
        })
    }
}

impl FromStr for ScoreEntry {
    type Err = RecordsError;

    fn from_str(line: &str) -> Result<Self> {
        let malformed = || RecordsError::MalformedLine(line.to_owned());

        let mut parts = line.trim_end().splitn(3, ", ");
        let (Some(head), Some(score), Some(stamp)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let (title, level) = head.split_once(" - Level: ").ok_or_else(malformed)?;
        let game = GameKind::from_title(title).ok_or_else(malformed)?;
        let tier = level
            .parse::<u8>()
            .ok()
            .and_then(|level| Tier::try_from(level).ok())
            .ok_or_else(malformed)?;

        let (status, timestamp) = stamp.split_once(": ").ok_or_else(malformed)?;
        let recorded_at =
            PrimitiveDateTime::parse(timestamp, TIMESTAMP_FORMAT).map_err(|_| malformed())?;

        let metric = match (game, status) {
            (GameKind::Matching, "Completed") => Metric::Completed {
                remaining_attempts: parse_field(score, "Remaining Attempts: ")
                    .ok_or_else(malformed)?,
            },
            (GameKind::Matching, "Failed") => Metric::Failed,
            (GameKind::Arithmetic, "Completed") => {
                let (correct, total) = score
                    .strip_prefix("Correct Answers: ")
                    .and_then(|score| score.split_once('/'))
                    .ok_or_else(malformed)?;
                Metric::Answered {
                    correct: correct.parse().map_err(|_| malformed())?,
                    total: total.parse().map_err(|_| malformed())?,
                }
            }
            _ => return Err(malformed()),
        };

        Ok(Self {
            game,
            tier,
            metric,
            recorded_at,
        })
    }
}

fn parse_field(field: &str, prefix: &str) -> Option<u8> {
    field.strip_prefix(prefix)?.parse().ok()
}
