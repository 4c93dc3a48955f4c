//! The contract a host position must satisfy for the engine to search it.

use std::ops::{Deref, DerefMut};

use arrayvec::ArrayVec;

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// Upper bound on legal moves in any chess position (218), rounded up.
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity move list; never allocates.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// A mutable game position with reversible moves.
///
/// `make_move` and `unmake_move` nest LIFO: every `unmake_move` reverts the
/// most recent `make_move` that has not been reverted yet. Prefer
/// [`apply`](Position::apply), which pairs the two through a guard.
pub trait Position {
    /// Side to move.
    fn side_to_move(&self) -> Color;

    /// All legal moves, in generation order.
    fn legal_moves(&self) -> MoveList;

    /// Legal moves that capture a piece (en passant included).
    fn capture_moves(&self) -> MoveList {
        self.legal_moves().into_iter().filter(|mv| mv.is_capture()).collect()
    }

    /// Play `mv`, which must be legal in the current position.
    fn make_move(&mut self, mv: Move);

    /// Revert the most recently played move.
    fn unmake_move(&mut self);

    /// Whether the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Whether the side to move is checkmated.
    fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Whether the side to move has no legal move and is not in check.
    fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// 64-bit identity of the position (placement, side, castling, en passant).
    fn hash(&self) -> u64;

    /// Piece standing on `sq`, if any.
    fn piece_on(&self, sq: Square) -> Option<Piece>;

    /// Whether a pawn of the side not to move attacks `sq`.
    fn attacked_by_enemy_pawn(&self, sq: Square) -> bool;

    /// Play `mv` and return a guard that reverts it when dropped.
    ///
    /// The guard dereferences to the position, so the child position can be
    /// searched through it and is restored on every exit path.
    fn apply(&mut self, mv: Move) -> MoveGuard<'_, Self> {
        self.make_move(mv);
        MoveGuard { position: self }
    }
}

/// Scope guard for one applied move. See [`Position::apply`].
pub struct MoveGuard<'a, P: Position + ?Sized> {
    position: &'a mut P,
}

impl<P: Position + ?Sized> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position + ?Sized> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position + ?Sized> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        self.position.unmake_move();
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChessBoard, Position};

    #[test]
    fn guard_reverts_on_drop() {
        let mut board = ChessBoard::starting_position();
        let before = board.hash();
        let mv = board.find_move("e2e4").unwrap();
        {
            let child = board.apply(mv);
            assert_ne!(child.hash(), before);
        }
        assert_eq!(board.hash(), before);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut board = ChessBoard::starting_position();
        let fen = board.fen();
        let e4 = board.find_move("e2e4").unwrap();
        {
            let mut child = board.apply(e4);
            let after_e4 = child.fen();
            let e5 = child.find_move("e7e5").unwrap();
            {
                let grandchild = child.apply(e5);
                assert!(grandchild.fen().starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3"));
            }
            assert_eq!(child.fen(), after_e4);
        }
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn default_capture_filter_matches_flags() {
        let board: ChessBoard = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let captures = board.capture_moves();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to_uci(), "e4d5");
    }
}
