use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};

use crate::*;

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

static DEAL_ORDER: [Face; 5] = Face::ALL;

/// Opaque card identity, unique for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u64);

impl CardId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pair-matching key, one per card artwork.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    #[serde(rename = "2_of_clubs")]
    Two,
    #[serde(rename = "3_of_clubs")]
    Three,
    #[serde(rename = "4_of_clubs")]
    Four,
    #[serde(rename = "5_of_clubs")]
    Five,
    #[serde(rename = "6_of_clubs")]
    Six,
}

impl Face {
    pub const ALL: [Face; 5] = [
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    pub const fn asset_name(self) -> &'static str {
        use Face::*;
        match self {
            Two => "2_of_clubs",
            Three => "3_of_clubs",
            Four => "4_of_clubs",
            Five => "5_of_clubs",
            Six => "6_of_clubs",
        }
    }

    /// Card rank, as printed on the artwork.
    pub const fn rank(self) -> u8 {
        use Face::*;
        match self {
            Two => 2,
            Three => 3,
            Four => 4,
            Five => 5,
            Six => 6,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}

/// Difficulty level shared by both games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Faces dealt at this tier, in deal order before shuffling.
    pub fn faces(self) -> &'static [Face] {
        match self {
            Self::One => &DEAL_ORDER[..3],
            Self::Two => &DEAL_ORDER[..4],
            Self::Three => &DEAL_ORDER[..],
        }
    }

    pub fn pair_count(self) -> usize {
        self.faces().len()
    }

    /// Presentation hint, one row per column count of cards.
    pub const fn grid_columns(self) -> usize {
        match self {
            Self::One => 3,
            Self::Two => 4,
            Self::Three => 5,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::One
    }
}

impl TryFrom<u8> for Tier {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(GameError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
