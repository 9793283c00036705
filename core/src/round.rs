use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Playing,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Pending flip-back of a mismatched pair, valid only for the round that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HideTicket {
    generation: u64,
    due: Instant,
}

impl HideTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Snapshot of a matching round. Every transition returns a new snapshot and leaves the old one untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    generation: u64,
    tier: Tier,
    config: RoundConfig,
    deck: Deck,
    selection: SmallVec<[CardId; 2]>,
    remaining_attempts: u8,
    state: RoundState,
    pending_hide: Option<HideTicket>,
}

impl Round {
    pub fn new(generation: u64, tier: Tier, deck: Deck, config: RoundConfig) -> Self {
        Self {
            generation,
            tier,
            config,
            deck,
            selection: SmallVec::new(),
            remaining_attempts: config.max_attempts,
            state: Default::default(),
            pending_hide: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.card(id)
    }

    /// Cards face up this turn, in selection order.
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.remaining_attempts
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_complete(&self) -> bool {
        self.deck.is_complete()
    }

    pub fn is_failed(&self) -> bool {
        self.remaining_attempts == 0 && !self.is_complete()
    }

    pub fn matched_pairs(&self) -> usize {
        self.deck.iter().filter(|card| card.is_matched()).count() / 2
    }

    pub fn pending_hide(&self) -> Option<HideTicket> {
        self.pending_hide
    }

    pub fn can_select(&self, id: CardId) -> bool {
        !self.state.is_finished()
            && self.selection.len() < 2
            && self.card(id).is_some_and(|card| card.is_selectable())
    }

    /// Selects `id` at `now`. A hide that came due before `now` is applied first.
    pub fn select_card(&self, id: CardId, now: Instant) -> (Self, SelectOutcome) {
        let hidden = self.poll(now);
        let current = hidden.as_ref().unwrap_or(self);

        if !current.can_select(id) {
            log::trace!(
                "Ignored selection of {} (state {:?}, {} selected)",
                id,
                current.state,
                current.selection.len()
            );
            return (current.clone(), SelectOutcome::Ignored);
        }

        let mut next = current.clone();
        next.deck.update(id, Card::reveal);
        next.selection.push(id);
        log::trace!("Revealed {}", id);

        let outcome = if next.selection.len() == 2 {
            next.resolve(now)
        } else {
            SelectOutcome::Revealed
        };
        (next, outcome)
    }

    /// Flips the pair behind `ticket` face down, `None` when the ticket is not the one pending on this round.
    pub fn apply_hide(&self, ticket: HideTicket) -> Option<Self> {
        if self.pending_hide != Some(ticket) {
            log::trace!(
                "Dropped stale hide for generation {}, round is {}",
                ticket.generation,
                self.generation
            );
            return None;
        }

        let mut next = self.clone();
        for id in core::mem::take(&mut next.selection) {
            next.deck.update(id, |card| {
                if card.is_matched() {
                    card
                } else {
                    card.hide()
                }
            });
        }
        next.pending_hide = None;
        Some(next)
    }

    /// Applies the pending hide once `now` reaches its deadline.
    pub fn poll(&self, now: Instant) -> Option<Self> {
        match self.pending_hide {
            Some(ticket) if ticket.is_due(now) => self.apply_hide(ticket),
            _ => None,
        }
    }

    fn resolve(&mut self, now: Instant) -> SelectOutcome {
        let faces: SmallVec<[Face; 2]> = self
            .selection
            .iter()
            .filter_map(|&id| self.deck.card(id).map(|card| card.face()))
            .collect();

        if faces[0] == faces[1] {
            for id in core::mem::take(&mut self.selection) {
                self.deck.update(id, Card::mark_matched);
            }
            log::debug!("Matched pair of {}", faces[0]);

            if self.deck.is_complete() {
                self.state = RoundState::Won;
                log::debug!(
                    "Tier {} won with {} attempts left",
                    self.tier,
                    self.remaining_attempts
                );
                SelectOutcome::Won {
                    remaining_attempts: self.remaining_attempts,
                }
            } else {
                SelectOutcome::Matched
            }
        } else {
            self.remaining_attempts = self.remaining_attempts.saturating_sub(1);
            log::debug!(
                "Mismatched {} and {}, {} attempts left",
                faces[0],
                faces[1],
                self.remaining_attempts
            );

            if self.remaining_attempts == 0 {
                self.state = RoundState::Lost;
                SelectOutcome::Lost
            } else {
                let ticket = HideTicket {
                    generation: self.generation,
                    due: now + self.config.hide_delay,
                };
                self.pending_hide = Some(ticket);
                SelectOutcome::Mismatched(ticket)
            }
        }
    }
}
