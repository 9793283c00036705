use crate::*;
pub use fixed::*;
pub use shuffled::*;

mod fixed;
mod shuffled;

pub trait DeckGenerator {
    /// Deals a fresh deck, new card ids included, for `tier`.
    fn generate(&mut self, tier: Tier) -> Deck;
}

impl<G: DeckGenerator + ?Sized> DeckGenerator for &mut G {
    fn generate(&mut self, tier: Tier) -> Deck {
        (**self).generate(tier)
    }
}
