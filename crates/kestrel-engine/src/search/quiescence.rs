//! Capture-only search at the horizon.

use kestrel_core::Position;

use crate::eval::evaluate;
use crate::search::negamax::SearchContext;
use crate::search::ordering::MovePicker;

/// Resolve captures until the position is quiet, then trust the static eval.
///
/// The side to move may stand pat instead of capturing. Fail-hard: the
/// result is clamped to `[alpha, beta]`. Every capture removes material,
/// so the recursion always terminates.
pub(crate) fn quiescence<P: Position + ?Sized>(
    pos: &mut P,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    ctx.seldepth = ctx.seldepth.max(ply);

    let stand_pat = evaluate(&*pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let captures = pos.capture_moves();
    let mut picker = MovePicker::new(&*pos, captures, None);

    while let Some(mv) = picker.pick_next() {
        let score = {
            let mut child = pos.apply(mv);
            -quiescence(&mut *child, ply + 1, -beta, -alpha, ctx)
        };

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use kestrel_core::{ChessBoard, FrozenClock};

    use super::*;
    use crate::SearchConfig;
    use crate::eval::evaluate;
    use crate::search::negamax::INF;
    use crate::search::repetition::RepetitionTracker;

    fn run(fen: &str) -> (i32, usize, ChessBoard) {
        let mut pos: ChessBoard = fen.parse().unwrap();
        let clock = FrozenClock::unlimited();
        let mut ctx = SearchContext::new(&clock, SearchConfig::default(), RepetitionTracker::new());
        let score = quiescence(&mut pos, 0, -INF, INF, &mut ctx);
        (score, ctx.seldepth, pos)
    }

    #[test]
    fn quiet_position_stands_pat() {
        let fen = "r1bqkbnr/pppppppp/2n5/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2";
        let (score, seldepth, pos) = run(fen);
        assert_eq!(score, evaluate(&pos));
        assert_eq!(seldepth, 0);
    }

    #[test]
    fn wins_hanging_queen() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let (score, _, pos) = run(fen);
        assert!(score > evaluate(&pos) + 800, "got {score}");
    }

    #[test]
    fn seldepth_bounded_by_capturable_pieces() {
        // after exd5 black has nothing left to capture with
        let (_, seldepth, _) = run("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(seldepth, 1);

        // a long exchange on d5: at most one ply per non-king piece
        let fen = "3rk3/3r4/2n5/3p4/4P3/2N5/3R4/3RK3 w - - 0 1";
        let (_, seldepth, _) = run(fen);
        assert!(seldepth >= 2);
        assert!(seldepth <= 8, "seldepth {seldepth}");
    }

    #[test]
    fn position_is_restored() {
        let fen = "3rk3/3r4/2n5/3p4/4P3/2N5/3R4/3RK3 w - - 0 1";
        let before: ChessBoard = fen.parse().unwrap();
        let (_, _, after) = run(fen);
        assert_eq!(after.fen(), before.fen());
        assert_eq!(after.hash(), before.hash());
        assert_eq!(after.undo_depth(), 0);
    }
}
