use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty tier {0}, expected 1 to 3")]
    InvalidTier(u8),
    #[error("Deck must hold exactly two cards per face")]
    InvalidDeck,
}

pub type Result<T> = core::result::Result<T, GameError>;
