//! Errors surfaced by the engine.

use thiserror::Error;

/// Failure to produce a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The position handed to the engine has no legal moves; the game is already over.
    #[error("position has no legal moves (hash {hash:#018x})")]
    NoLegalMoves { hash: u64 },
}
