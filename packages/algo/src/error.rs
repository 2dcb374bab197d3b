use thiserror::Error;

/// Errors raised by the study core.
///
/// Scheduling itself is total over well-formed input; these only surface for
/// malformed data or references to decks/cards that do not exist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("card {card_id} not found in deck {deck}")]
    CardNotFound { deck: String, card_id: u64 },
}

pub type AlgoResult<T> = Result<T, AlgoError>;

impl AlgoError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
