use crate::outcome::report;
use crate::*;

/// Drives matching rounds one after another: deals decks, forwards taps, fires the delayed hide and reports outcomes.
///
/// Every round gets a new generation number, so a [`HideTicket`] issued by a retried or abandoned round never
/// touches the cards of the round that replaced it.
#[derive(Debug)]
pub struct MatchingGame<C, R, G = ShuffledDeckGenerator> {
    clock: C,
    reporter: R,
    generator: G,
    config: RoundConfig,
    generation: u64,
    round: Option<Round>,
}

impl<C: Clock, R: OutcomeReporter, G: DeckGenerator> MatchingGame<C, R, G> {
    pub fn new(clock: C, reporter: R, generator: G, config: RoundConfig) -> Self {
        Self {
            clock,
            reporter,
            generator,
            config,
            generation: 0,
            round: None,
        }
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn pending_hide(&self) -> Option<HideTicket> {
        self.round.as_ref().and_then(Round::pending_hide)
    }

    /// Deals a new deck for `tier`, discarding whatever round was in progress.
    pub fn start_round(&mut self, tier: Tier) -> &Round {
        self.generation = self.generation.wrapping_add(1);
        let deck = self.generator.generate(tier);
        log::debug!(
            "Starting tier {} round, generation {}, {} attempts",
            tier,
            self.generation,
            self.config.max_attempts
        );
        self.round
            .insert(Round::new(self.generation, tier, deck, self.config))
    }

    /// Restarts the current tier with a fresh deck. `None` when no round was started.
    pub fn retry_round(&mut self) -> Option<&Round> {
        let tier = self.round.as_ref()?.tier();
        Some(self.start_round(tier))
    }

    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        let Some(round) = self.round.as_ref() else {
            log::trace!("Ignored selection of {} without a round", id);
            return SelectOutcome::Ignored;
        };

        let (next, outcome) = round.select_card(id, self.clock.now());
        let tier = next.tier();
        self.round = Some(next);

        match outcome {
            SelectOutcome::Won { remaining_attempts } => report(
                &mut self.reporter,
                OutcomeEvent::MatchingWon {
                    tier,
                    remaining_attempts,
                },
            ),
            SelectOutcome::Lost => report(&mut self.reporter, OutcomeEvent::MatchingLost { tier }),
            _ => {}
        }
        outcome
    }

    /// Applies the pending hide if its deadline passed. Returns whether cards flipped back.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.replace_round(|round| round.poll(now))
    }

    /// Applies `ticket` right away, for hosts that run their own timer. Stale tickets are ignored.
    pub fn fire_hide(&mut self, ticket: HideTicket) -> bool {
        if ticket.generation() != self.generation {
            log::trace!(
                "Dropped hide for generation {}, current is {}",
                ticket.generation(),
                self.generation
            );
            return false;
        }
        self.replace_round(|round| round.apply_hide(ticket))
    }

    /// Leaves the current round, cancelling its pending hide.
    pub fn exit(&mut self) -> Option<Round> {
        self.generation = self.generation.wrapping_add(1);
        let round = self.round.take();
        if let Some(round) = &round {
            log::debug!(
                "Left tier {} round in state {:?}",
                round.tier(),
                round.state()
            );
        }
        round
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    fn replace_round(&mut self, f: impl FnOnce(&Round) -> Option<Round>) -> bool {
        match self.round.as_ref().and_then(f) {
            Some(next) => {
                self.round = Some(next);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use alloc::collections::BTreeSet;
    use core::time::Duration;
    use proptest::prelude::*;

    type TestGame<'a> = MatchingGame<&'a ManualClock, RecordingReporter, FixedDeckGenerator>;

    fn game(clock: &ManualClock, config: RoundConfig) -> TestGame<'_> {
        game_with_reporter(clock, config, RecordingReporter::default())
    }

    fn game_with_reporter(
        clock: &ManualClock,
        config: RoundConfig,
        reporter: RecordingReporter,
    ) -> TestGame<'_> {
        let generator = FixedDeckGenerator::new(&TIER_ONE_LAYOUT).unwrap();
        MatchingGame::new(clock, reporter, generator, config)
    }

    fn select(game: &mut TestGame<'_>, index: usize) -> SelectOutcome {
        let id = game.round().unwrap().deck()[index].id();
        game.select_card(id)
    }

    #[test]
    fn tier_one_scenario_runs_out_of_attempts() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);

        assert_eq!(select(&mut game, 0), SelectOutcome::Revealed);
        assert_eq!(select(&mut game, 1), SelectOutcome::Matched);
        assert_eq!(game.round().unwrap().remaining_attempts(), 5);
        assert!(game.round().unwrap().selection().is_empty());

        select(&mut game, 2);
        assert!(select(&mut game, 4).hide_ticket().is_some());
        assert_eq!(game.round().unwrap().remaining_attempts(), 4);

        clock.advance(DEFAULT_HIDE_DELAY);
        assert!(game.poll());
        let round = game.round().unwrap();
        assert!(!round.deck()[2].is_revealed() && !round.deck()[4].is_revealed());

        let mut last = SelectOutcome::Ignored;
        for _ in 0..4 {
            select(&mut game, 2);
            last = select(&mut game, 4);
            clock.advance(DEFAULT_HIDE_DELAY);
            game.poll();
        }

        assert_eq!(last, SelectOutcome::Lost);
        assert_eq!(game.round().unwrap().state(), RoundState::Lost);
        assert_eq!(game.round().unwrap().remaining_attempts(), 0);
        assert_eq!(select(&mut game, 5), SelectOutcome::Ignored);
        assert_eq!(
            game.reporter().events,
            [OutcomeEvent::MatchingLost { tier: Tier::One }]
        );
    }

    #[test]
    fn attempts_never_increase_and_stop_at_zero() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::classic());
        game.start_round(Tier::One);
        let mut previous = game.round().unwrap().remaining_attempts();

        for _ in 0..10 {
            select(&mut game, 2);
            select(&mut game, 4);
            clock.advance(DEFAULT_HIDE_DELAY);
            game.poll();

            let remaining = game.round().unwrap().remaining_attempts();
            assert!(remaining <= previous);
            previous = remaining;
        }

        assert_eq!(previous, 0);
        assert!(game.round().unwrap().is_failed());
    }

    #[test]
    fn winning_reports_remaining_attempts_once() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);

        select(&mut game, 2);
        select(&mut game, 4);
        clock.advance(DEFAULT_HIDE_DELAY);
        game.poll();
        for index in 0..6 {
            select(&mut game, index);
        }
        select(&mut game, 0);

        assert_eq!(game.round().unwrap().state(), RoundState::Won);
        assert_eq!(
            game.reporter().events,
            [OutcomeEvent::MatchingWon {
                tier: Tier::One,
                remaining_attempts: 4
            }]
        );
    }

    #[test]
    fn poll_waits_for_the_deadline() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);
        select(&mut game, 2);
        select(&mut game, 4);

        clock.advance(Duration::from_millis(500));
        assert!(!game.poll());
        assert_eq!(select(&mut game, 0), SelectOutcome::Ignored);

        clock.advance(Duration::from_millis(500));
        assert!(game.poll());
        assert_eq!(game.pending_hide(), None);
        assert_eq!(select(&mut game, 0), SelectOutcome::Revealed);
    }

    #[test]
    fn tap_after_the_deadline_flips_the_pair_back_first() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);
        select(&mut game, 2);
        select(&mut game, 4);

        clock.advance(Duration::from_millis(1500));

        assert_eq!(select(&mut game, 0), SelectOutcome::Revealed);
        let round = game.round().unwrap();
        assert!(!round.deck()[2].is_revealed() && !round.deck()[4].is_revealed());
        assert_eq!(game.pending_hide(), None);
        assert!(!game.poll());
    }

    #[test]
    fn retry_deals_fresh_deck_and_drops_pending_hide() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);
        select(&mut game, 2);
        let ticket = select(&mut game, 4).hide_ticket().unwrap();
        let old_ids: BTreeSet<CardId> = game.round().unwrap().deck().ids().collect();

        let round = game.retry_round().unwrap();
        let new_ids: BTreeSet<CardId> = round.deck().ids().collect();

        assert!(old_ids.is_disjoint(&new_ids));
        assert_eq!(round.remaining_attempts(), 5);
        assert_eq!(round.pending_hide(), None);

        select(&mut game, 2);
        select(&mut game, 4);
        let before = game.round().unwrap().clone();
        assert!(!game.fire_hide(ticket));
        assert_eq!(game.round(), Some(&before));
    }

    #[test]
    fn exit_cancels_pending_hide() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);
        select(&mut game, 2);
        let ticket = select(&mut game, 4).hide_ticket().unwrap();

        let left = game.exit().unwrap();
        clock.advance(DEFAULT_HIDE_DELAY);

        assert_eq!(left.pending_hide(), Some(ticket));
        assert_eq!(game.pending_hide(), None);
        assert!(!game.poll());
        assert!(!game.fire_hide(ticket));
        assert_eq!(select_without_round(&mut game), SelectOutcome::Ignored);
    }

    fn select_without_round(game: &mut TestGame<'_>) -> SelectOutcome {
        let stray = tier_one_deck()[0].id();
        game.select_card(stray)
    }

    #[test]
    fn fire_hide_applies_current_ticket_immediately() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());
        game.start_round(Tier::One);
        select(&mut game, 2);
        let ticket = select(&mut game, 4).hide_ticket().unwrap();

        assert!(game.fire_hide(ticket));
        assert!(!game.fire_hide(ticket));
        assert!(game.round().unwrap().selection().is_empty());
    }

    #[test]
    fn reporter_failure_does_not_block_the_round() {
        let clock = ManualClock::new();
        let mut game =
            game_with_reporter(&clock, RoundConfig::default(), RecordingReporter::failing());
        game.start_round(Tier::One);

        for index in 0..6 {
            select(&mut game, index);
        }

        assert_eq!(game.round().unwrap().state(), RoundState::Won);
        assert!(game.reporter().events.is_empty());
    }

    #[test]
    fn retry_without_round_does_nothing() {
        let clock = ManualClock::new();
        let mut game = game(&clock, RoundConfig::default());

        assert!(game.retry_round().is_none());
    }

    #[test]
    fn shuffled_generator_plays_every_tier() {
        let clock = ManualClock::new();
        let mut game = MatchingGame::new(
            &clock,
            RecordingReporter::default(),
            ShuffledDeckGenerator::new(42),
            RoundConfig::default(),
        );

        for tier in Tier::ALL {
            let deck = game.start_round(tier).deck().clone();
            for face in tier.faces() {
                for card in deck.iter().filter(|card| card.face() == *face) {
                    game.select_card(card.id());
                }
            }
        }

        assert_eq!(
            game.into_reporter().events,
            Tier::ALL.map(|tier| OutcomeEvent::MatchingWon {
                tier,
                remaining_attempts: 5
            })
        );
    }

    proptest! {
        #[test]
        fn random_taps_keep_the_round_consistent(
            steps in proptest::collection::vec((0usize..6, 0u64..1500, any::<bool>()), 1..60),
        ) {
            let clock = ManualClock::new();
            let mut game = game(&clock, RoundConfig::default());
            game.start_round(Tier::One);
            let mut previous = DEFAULT_MAX_ATTEMPTS;

            for (index, advance_ms, poll) in steps {
                select(&mut game, index);
                clock.advance(Duration::from_millis(advance_ms));
                if poll {
                    game.poll();
                }

                let round = game.round().unwrap();
                prop_assert!(round.selection().len() <= 2);
                prop_assert!(round
                    .selection()
                    .iter()
                    .all(|&id| round.card(id).is_some_and(|card| !card.is_matched())));
                prop_assert!(round.remaining_attempts() <= previous);
                prop_assert!(game.reporter().events.len() <= 1);
                prop_assert_eq!(round.is_finished(), game.reporter().events.len() == 1);
                previous = round.remaining_attempts();
            }
        }
    }
}
