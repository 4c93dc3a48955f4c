//! Static evaluation.
//!
//! Material plus piece-square bonuses per side. The king term is blended
//! between its middlegame and endgame tables by how much non-pawn material
//! the opponent has left.

pub mod material;
pub mod phase;
pub mod pst;

use kestrel_core::{Color, PieceKind, Position, Square};

use crate::eval::material::piece_value;
use crate::eval::phase::{endgame_weight, taper};
use crate::eval::pst::{king_value, pst_value};
use crate::search::negamax::MATE_SCORE;

/// Per-colour accumulators, indexed by [`Color::index()`].
#[derive(Default)]
struct SideTotals {
    material: [i32; 2],
    non_pawn: [i32; 2],
    positional: [i32; 2],
    king: [Option<Square>; 2],
}

/// Evaluate from the side to move's perspective.
///
/// A checkmated side to move scores `-MATE_SCORE`.
pub fn evaluate<P: Position + ?Sized>(pos: &P) -> i32 {
    if pos.is_checkmate() {
        return -MATE_SCORE;
    }
    evaluate_white(pos) * pos.side_to_move().sign()
}

/// Evaluate from White's perspective (positive = White is better).
pub fn evaluate_white<P: Position + ?Sized>(pos: &P) -> i32 {
    let mut totals = SideTotals::default();

    for sq in Square::all() {
        let Some(piece) = pos.piece_on(sq) else {
            continue;
        };
        let side = piece.color.index();
        if piece.kind == PieceKind::King {
            totals.king[side] = Some(sq);
            continue;
        }
        let value = piece_value(piece.kind);
        totals.material[side] += value;
        if piece.kind != PieceKind::Pawn {
            totals.non_pawn[side] += value;
        }
        totals.positional[side] += pst_value(piece.kind, piece.color, sq);
    }

    let side_score = |color: Color| {
        let side = color.index();
        let mut score = totals.material[side] + totals.positional[side];
        if let Some(king_sq) = totals.king[side] {
            let weight = endgame_weight(totals.non_pawn[color.flip().index()]);
            let (mg, eg) = king_value(color, king_sq);
            score += taper(mg, eg, weight);
        }
        score
    };

    side_score(Color::White) - side_score(Color::Black)
}
