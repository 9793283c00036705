use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;
use core::time::Duration;
use web_time::Instant;

use crate::*;

/// Dealt in pairs: Two Two Three Three Four Four.
pub(crate) const TIER_ONE_LAYOUT: [Face; 6] = [
    Face::Two,
    Face::Two,
    Face::Three,
    Face::Three,
    Face::Four,
    Face::Four,
];

pub(crate) fn tier_one_deck() -> Deck {
    Deck::from_faces(&TIER_ONE_LAYOUT).unwrap()
}

pub(crate) fn tier_one_round(max_attempts: u8) -> Round {
    Round::new(
        0,
        Tier::One,
        tier_one_deck(),
        RoundConfig::new(max_attempts, DEFAULT_HIDE_DELAY),
    )
}

pub(crate) struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    pub(crate) events: Vec<OutcomeEvent>,
    pub(crate) fail: bool,
}

impl RecordingReporter {
    pub(crate) fn failing() -> Self {
        Self {
            events: Vec::new(),
            fail: true,
        }
    }
}

impl OutcomeReporter for RecordingReporter {
    fn record(&mut self, event: &OutcomeEvent) -> ReportResult {
        if self.fail {
            return Err(ReportError::Unavailable(String::from("disk full")));
        }
        self.events.push(*event);
        Ok(())
    }

    fn history(&self) -> ReportResult<Vec<String>> {
        Ok(self.events.iter().map(|event| event.to_string()).collect())
    }
}
