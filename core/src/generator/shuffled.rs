use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Deals every face of the tier twice, then applies a uniform shuffle.
#[derive(Clone, Debug)]
pub struct ShuffledDeckGenerator {
    rng: SmallRng,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(&mut self, tier: Tier) -> Deck {
        let mut cards: Vec<Card> = tier
            .faces()
            .iter()
            .flat_map(|&face| [Card::new(face), Card::new(face)])
            .collect();
        cards.shuffle(&mut self.rng);

        log::debug!("Dealt {} cards for tier {}", cards.len(), tier);
        Deck::from_cards_unchecked(cards)
    }
}

/// Deals a single deck for `tier` from `seed`.
pub fn generate_deck(tier: Tier, seed: u64) -> Deck {
    ShuffledDeckGenerator::new(seed).generate(tier)
}
