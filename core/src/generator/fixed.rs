use alloc::vec::Vec;

use super::*;

/// Deals the same layout every time, ignoring the tier. Card ids are still fresh per deal.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedDeckGenerator {
    faces: Vec<Face>,
}

impl FixedDeckGenerator {
    pub fn new(faces: &[Face]) -> Result<Self> {
        Deck::from_faces(faces)?;
        Ok(Self {
            faces: faces.to_vec(),
        })
    }
}

impl DeckGenerator for FixedDeckGenerator {
    fn generate(&mut self, tier: Tier) -> Deck {
        if self.faces.len() != tier.pair_count() * 2 {
            log::debug!(
                "Fixed layout has {} cards, tier {} would deal {}",
                self.faces.len(),
                tier,
                tier.pair_count() * 2
            );
        }
        Deck::from_cards_unchecked(self.faces.iter().copied().map(Card::new).collect())
    }
}
