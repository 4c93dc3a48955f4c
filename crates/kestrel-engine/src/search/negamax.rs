//! Negamax alpha-beta search.

use kestrel_core::{Clock, Move, PieceKind, Position};
use tracing::trace;

use crate::config::SearchConfig;
use crate::search::control::TimeBudget;
use crate::search::ordering::MovePicker;
use crate::search::quiescence::quiescence;
use crate::search::repetition::RepetitionTracker;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 100_000;

/// Scores beyond this magnitude indicate a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Mutable state shared by every node of one search call.
pub(crate) struct SearchContext<'a> {
    pub nodes: u64,
    /// Deepest ply reached, quiescence included.
    pub seldepth: usize,
    /// Game history plus the hashes of the interior nodes on the current path.
    pub repetitions: RepetitionTracker,
    pub budget: TimeBudget<'a>,
    pub config: SearchConfig,
    /// Set once the time budget runs out; every frame then unwinds with 0.
    pub aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(clock: &'a dyn Clock, config: SearchConfig, repetitions: RepetitionTracker) -> Self {
        Self {
            nodes: 0,
            seldepth: 0,
            repetitions,
            budget: TimeBudget::start(clock, config.time_restriction),
            config,
            aborted: false,
        }
    }
}

/// Where a node sits in the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub ply: usize,
    /// Remaining depth before quiescence.
    pub depth: u8,
    /// Extension plies already spent along this line.
    pub extensions: u8,
}

impl Node {
    pub fn root(depth: u8) -> Self {
        Self {
            ply: 0,
            depth,
            extensions: 0,
        }
    }
}

/// Outcome of one root iteration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RootOutcome {
    pub score: i32,
    /// `None` when the root has no legal move or the iteration was aborted.
    pub best_move: Option<Move>,
}

/// Search the root to `depth` with a full window.
///
/// `pv_move`, the previous iteration's best, is searched first.
pub(crate) fn search_root<P: Position + ?Sized>(
    pos: &mut P,
    depth: u8,
    pv_move: Option<Move>,
    ctx: &mut SearchContext<'_>,
) -> RootOutcome {
    if let Some(mv) = pv_move {
        trace!(depth, pv = %mv, "seeding root with previous best move");
    }
    ctx.nodes += 1;
    let (score, best_move) = search_moves(pos, Node::root(depth), -INF, INF, pv_move, ctx);
    RootOutcome { score, best_move }
}

/// Negamax with fail-hard alpha-beta, from the side to move's perspective.
pub(crate) fn negamax<P: Position + ?Sized>(
    pos: &mut P,
    node: Node,
    alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    if node.ply > 0 && ctx.repetitions.contains(pos.hash()) {
        return 0;
    }

    if node.depth == 0 {
        let (alpha, beta) = clamp_mate_window(node.ply, alpha, beta);
        if alpha >= beta {
            return alpha;
        }
        return quiescence(pos, node.ply, alpha, beta, ctx);
    }

    search_moves(pos, node, alpha, beta, None, ctx).0
}

/// No line from `ply` can beat mating now or lose slower than being mated now.
fn clamp_mate_window(ply: usize, alpha: i32, beta: i32) -> (i32, i32) {
    let mate_here = MATE_SCORE - ply as i32;
    (alpha.max(-mate_here), beta.min(mate_here))
}

/// Interior node body shared by the root and [`negamax`].
fn search_moves<P: Position + ?Sized>(
    pos: &mut P,
    node: Node,
    alpha: i32,
    beta: i32,
    pv_move: Option<Move>,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    let (alpha, beta) = clamp_mate_window(node.ply, alpha, beta);
    if alpha >= beta {
        return (alpha, None);
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        let score = if pos.is_in_check() {
            -(MATE_SCORE - node.ply as i32)
        } else {
            0
        };
        return (score, None);
    }

    // The node stays in the repetition set only while its children are searched.
    let hash = pos.hash();
    let inserted = ctx.repetitions.insert(hash);
    let picker = MovePicker::new(&*pos, moves, pv_move);
    let result = search_children(pos, node, alpha, beta, picker, ctx);
    if inserted {
        ctx.repetitions.remove(hash);
    }
    result
}

fn search_children<P: Position + ?Sized>(
    pos: &mut P,
    node: Node,
    mut alpha: i32,
    beta: i32,
    mut picker: MovePicker,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    let mut best_move = None;

    while let Some(mv) = picker.pick_next() {
        let score = {
            let mut child = pos.apply(mv);
            let extension = extension(&*child, mv, node.extensions, &ctx.config);
            let child_node = Node {
                ply: node.ply + 1,
                depth: node.depth.saturating_sub(1) + extension,
                extensions: node.extensions + extension,
            };
            -negamax(&mut *child, child_node, -beta, -alpha, ctx)
        };

        if ctx.aborted {
            return (0, None);
        }
        if node.depth > ctx.config.time_check_depth && ctx.budget.exceeded() {
            ctx.aborted = true;
            return (0, None);
        }

        if score >= beta {
            return (beta, Some(mv));
        }
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    (alpha, best_move)
}

/// Extra plies to search after `mv`, which produced `child`.
///
/// One ply for a move that gives check or pushes a pawn to its penultimate
/// rank, while the line's extension budget lasts.
pub(crate) fn extension<P: Position + ?Sized>(
    child: &P,
    mv: Move,
    used: u8,
    config: &SearchConfig,
) -> u8 {
    if !config.extensions || used >= config.max_extensions {
        return 0;
    }
    let mover = child.side_to_move().flip();
    let pawn_near_promotion =
        mv.piece() == PieceKind::Pawn && mv.dest().rank() == mover.penultimate_rank();
    u8::from(child.is_in_check() || pawn_near_promotion)
}
