use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of one card in a deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    face: Face,
    revealed: bool,
    matched: bool,
}

impl Card {
    pub(crate) fn new(face: Face) -> Self {
        Self {
            id: CardId::fresh(),
            face,
            revealed: false,
            matched: false,
        }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub const fn face(&self) -> Face {
        self.face
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Matched cards stay face up even if nothing revealed them this turn.
    pub const fn is_face_up(&self) -> bool {
        self.revealed || self.matched
    }

    pub const fn is_selectable(&self) -> bool {
        !self.revealed && !self.matched
    }

    pub(crate) const fn reveal(self) -> Self {
        Self {
            revealed: true,
            ..self
        }
    }

    pub(crate) const fn hide(self) -> Self {
        Self {
            revealed: false,
            ..self
        }
    }

    pub(crate) const fn mark_matched(self) -> Self {
        Self {
            revealed: true,
            matched: true,
            ..self
        }
    }
}
