#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

use alloc::vec::Vec;
use core::ops::Index;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use arithmetic::*;
pub use card::*;
pub use clock::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use outcome::*;
pub use round::*;
pub use types::*;

mod arithmetic;
mod card;
mod clock;
mod error;
mod game;
mod generator;
mod outcome;
mod round;
mod types;

#[cfg(test)]
mod test_support;

/// Attempts granted to a fresh round.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 5;

/// Attempts granted by the first release of the game.
pub const CLASSIC_MAX_ATTEMPTS: u8 = 3;

/// How long a mismatched pair stays face up before flipping back.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub max_attempts: u8,
    pub hide_delay: Duration,
}

impl RoundConfig {
    pub const fn new_unchecked(max_attempts: u8, hide_delay: Duration) -> Self {
        Self {
            max_attempts,
            hide_delay,
        }
    }

    /// A round needs at least one attempt, otherwise it would be lost before the first tap.
    pub fn new(max_attempts: u8, hide_delay: Duration) -> Self {
        Self::new_unchecked(max_attempts.max(1), hide_delay)
    }

    pub const fn classic() -> Self {
        Self::new_unchecked(CLASSIC_MAX_ATTEMPTS, DEFAULT_HIDE_DELAY)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_MAX_ATTEMPTS, DEFAULT_HIDE_DELAY)
    }
}

/// Ordered set of cards for one round, two cards per face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds a deck laid out exactly as `faces`, with fresh card ids.
    ///
    /// Fails with [`GameError::InvalidDeck`] unless every face appears exactly twice.
    pub fn from_faces(faces: &[Face]) -> Result<Self> {
        for face in faces {
            if faces.iter().filter(|&other| other == face).count() != 2 {
                return Err(GameError::InvalidDeck);
            }
        }
        Ok(Self::from_cards_unchecked(
            faces.iter().copied().map(Card::new).collect(),
        ))
    }

    pub(crate) fn from_cards_unchecked(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|card| card.id())
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| card.is_matched())
    }

    pub(crate) fn update(&mut self, id: CardId, f: impl FnOnce(Card) -> Card) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id() == id) {
            *card = f(*card);
        }
    }
}

impl Index<usize> for Deck {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = core::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Stale or ineligible tap, nothing changed
    Ignored,
    /// First card of the pair turned face up
    Revealed,
    /// Second card matched the first one
    Matched,
    /// Second card did not match, both flip back once the ticket is due
    Mismatched(HideTicket),
    /// Last pair matched
    Won { remaining_attempts: u8 },
    /// Last attempt spent on a mismatch
    Lost,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            Revealed => true,
            Matched => true,
            Mismatched(_) => true,
            Won { .. } => true,
            Lost => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost)
    }

    pub const fn hide_ticket(self) -> Option<HideTicket> {
        match self {
            Self::Mismatched(ticket) => Some(ticket),
            _ => None,
        }
    }
}
