//! Moves as handed between the host position and the engine.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A legal move together with what it moves, captures, and promotes to.
///
/// Moves are produced by [`Position::legal_moves`](crate::Position::legal_moves),
/// so the captured piece is already resolved (en passant reports a pawn).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    dest: Square,
    piece: PieceKind,
    captured: Option<PieceKind>,
    promotion: Option<PieceKind>,
}

impl Move {
    /// A quiet move of `piece` from `source` to `dest`.
    pub const fn new(source: Square, dest: Square, piece: PieceKind) -> Move {
        Move {
            source,
            dest,
            piece,
            captured: None,
            promotion: None,
        }
    }

    /// The same move, capturing a piece of kind `victim`.
    pub const fn with_capture(self, victim: PieceKind) -> Move {
        Move {
            captured: Some(victim),
            ..self
        }
    }

    /// The same move, promoting to `kind`.
    pub const fn with_promotion(self, kind: PieceKind) -> Move {
        Move {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub const fn source(self) -> Square {
        self.source
    }

    #[inline]
    pub const fn dest(self) -> Square {
        self.dest
    }

    /// Kind of the piece being moved.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        self.captured
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Long algebraic (UCI) notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(kind) => write!(f, "{}{}{}", self.source, self.dest, kind.fen_char()),
            None => write!(f, "{}{}", self.source, self.dest),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {}", self.piece)?;
        if let Some(victim) = self.captured {
            write!(f, "x{victim}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::{PieceKind, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn quiet_move_has_no_flags() {
        let mv = Move::new(sq("e2"), sq("e4"), PieceKind::Pawn);
        assert!(!mv.is_capture());
        assert!(!mv.is_promotion());
        assert_eq!(mv.to_uci(), "e2e4");
    }

    #[test]
    fn capture_promotion_formats_suffix() {
        let mv = Move::new(sq("b7"), sq("a8"), PieceKind::Pawn)
            .with_capture(PieceKind::Rook)
            .with_promotion(PieceKind::Queen);
        assert!(mv.is_capture());
        assert!(mv.is_promotion());
        assert_eq!(mv.captured(), Some(PieceKind::Rook));
        assert_eq!(mv.to_uci(), "b7a8q");
    }

    #[test]
    fn debug_mentions_victim() {
        let mv = Move::new(sq("d4"), sq("e5"), PieceKind::Queen).with_capture(PieceKind::Pawn);
        assert_eq!(format!("{mv:?}"), "Move(d4e5 qxp)");
    }
}
