//! Errors raised while building positions from text.

/// Errors that occur when parsing or transforming a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer than the four mandatory fields (placement, side, castling, en passant).
    #[error("expected at least 4 FEN fields, found {found}")]
    MissingFields {
        /// Number of fields found.
        found: usize,
    },

    /// The piece placement does not describe 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },

    /// The active colour field is not `w` or `b`.
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The offending field.
        found: String,
    },

    /// The en passant field is neither `-` nor a square on rank 3 or 6.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The offending field.
        found: String,
    },

    /// The board library refused the position.
    #[error("rejected FEN \"{fen}\": {reason}")]
    Rejected {
        /// The FEN that was refused.
        fen: String,
        /// Reason reported by the board library.
        reason: String,
    },
}
