//! Move ordering by MVV-LVA with a pawn-attack penalty.

use kestrel_core::{MAX_MOVES, Move, MoveList, Position};

use crate::eval::material::piece_value;

/// Ordering score for the principal-variation move.
const PV_SCORE: i32 = i32::MAX;

/// Score a move for ordering; higher is searched first.
///
/// - capture: `10 × value(victim) − value(mover)`
/// - promotion: `+ value(promoted piece)`
/// - destination attacked by an enemy pawn: `− value(mover)`
pub fn score_move<P: Position + ?Sized>(pos: &P, mv: Move) -> i32 {
    let mover = piece_value(mv.piece());
    let mut score = 0;

    if let Some(victim) = mv.captured() {
        score += 10 * piece_value(victim) - mover;
    }
    if let Some(promotion) = mv.promotion() {
        score += piece_value(promotion);
    }
    if pos.attacked_by_enemy_pawn(mv.dest()) {
        score -= mover;
    }

    score
}

/// Yields moves best-first.
///
/// Selection sort over the remaining moves; the selected move is rotated
/// into place so equal scores come out in generation order.
pub struct MovePicker {
    moves: MoveList,
    scores: [i32; MAX_MOVES],
    cursor: usize,
}

impl MovePicker {
    /// Score `moves` in `pos`. A `pv_move` present in the list is yielded first.
    pub fn new<P: Position + ?Sized>(pos: &P, moves: MoveList, pv_move: Option<Move>) -> Self {
        let mut scores = [0; MAX_MOVES];
        for (slot, &mv) in scores.iter_mut().zip(moves.iter()) {
            *slot = if Some(mv) == pv_move {
                PV_SCORE
            } else {
                score_move(pos, mv)
            };
        }
        Self {
            moves,
            scores,
            cursor: 0,
        }
    }

    /// Number of moves not yet yielded.
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.cursor
    }

    pub fn pick_next(&mut self) -> Option<Move> {
        let len = self.moves.len();
        if self.cursor >= len {
            return None;
        }

        let mut best = self.cursor;
        for i in (self.cursor + 1)..len {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }

        self.moves[self.cursor..=best].rotate_right(1);
        self.scores[self.cursor..=best].rotate_right(1);

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}

impl Iterator for MovePicker {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        self.pick_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// Sort `moves` best-first (stable), with `pv_move` at the front if present.
pub fn order_moves<P: Position + ?Sized>(pos: &P, moves: MoveList, pv_move: Option<Move>) -> MoveList {
    MovePicker::new(pos, moves, pv_move).collect()
}
