//! Iterative-deepening search driver.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod quiescence;
pub mod repetition;

use std::time::Duration;

use kestrel_core::{Clock, Move, Position};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::SearchError;
use negamax::{MATE_THRESHOLD, SearchContext, search_root};
use repetition::RepetitionTracker;

/// Result of one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move of the deepest completed iteration, or the fallback move.
    pub best_move: Move,
    /// Score of `best_move` from the mover's perspective; 0 for a fallback.
    pub score: i32,
    /// Deepest completed iteration; 0 if none completed.
    pub depth: u8,
    /// Deepest ply reached, quiescence included.
    pub seldepth: usize,
    /// Nodes visited across all iterations.
    pub nodes: u64,
    /// Time spent this turn when the search returned.
    pub elapsed: Duration,
}

/// Report for one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationInfo {
    pub depth: u8,
    pub seldepth: usize,
    pub score: i32,
    pub nodes: u64,
    pub best_move: Move,
    pub elapsed: Duration,
}

/// The engine: configuration plus the positions seen so far this game.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: SearchConfig,
    history: RepetitionTracker,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            history: RepetitionTracker::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Positions recorded at the start of each of our turns this game.
    pub fn history(&self) -> &RepetitionTracker {
        &self.history
    }

    /// Forget the previous game's positions.
    pub fn new_game(&mut self) {
        self.history.clear();
    }

    /// Pick a move for the side to move in `pos`.
    ///
    /// `pos` is searched in place and handed back unchanged.
    pub fn think<P: Position + ?Sized>(
        &mut self,
        pos: &mut P,
        clock: &dyn Clock,
    ) -> Result<Move, SearchError> {
        self.search(pos, clock, |_| {}).map(|result| result.best_move)
    }

    /// Iterative deepening until the time budget runs out, a mate is
    /// found, or `max_depth` is reached.
    ///
    /// Calls `on_iter` after each completed iteration. An iteration cut
    /// short by the clock is discarded.
    pub fn search<P, F>(
        &mut self,
        pos: &mut P,
        clock: &dyn Clock,
        mut on_iter: F,
    ) -> Result<SearchResult, SearchError>
    where
        P: Position + ?Sized,
        F: FnMut(&IterationInfo),
    {
        let root_hash = pos.hash();
        self.history.insert(root_hash);

        let Some(&fallback) = pos.legal_moves().first() else {
            return Err(SearchError::NoLegalMoves { hash: root_hash });
        };

        let mut ctx = SearchContext::new(clock, self.config, self.history.copy());
        let mut committed: Option<(Move, i32)> = None;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            let pv_move = committed.map(|(mv, _)| mv);
            let outcome = search_root(pos, depth, pv_move, &mut ctx);

            if ctx.aborted {
                debug!(depth, nodes = ctx.nodes, "iteration discarded: time budget exceeded");
                break;
            }
            let Some(best_move) = outcome.best_move else {
                break;
            };

            committed = Some((best_move, outcome.score));
            completed_depth = depth;

            let info = IterationInfo {
                depth,
                seldepth: ctx.seldepth,
                score: outcome.score,
                nodes: ctx.nodes,
                best_move,
                elapsed: ctx.budget.elapsed(),
            };
            debug!(
                depth,
                seldepth = info.seldepth,
                score = info.score,
                nodes = info.nodes,
                best = %best_move,
                "iteration complete"
            );
            on_iter(&info);

            if ctx.budget.exceeded() || outcome.score.abs() > MATE_THRESHOLD {
                break;
            }
        }

        let (best_move, score) = committed.unwrap_or_else(|| {
            warn!(fallback = %fallback, "no iteration completed, playing first legal move");
            (fallback, 0)
        });

        Ok(SearchResult {
            best_move,
            score,
            depth: completed_depth,
            seldepth: ctx.seldepth,
            nodes: ctx.nodes,
            elapsed: ctx.budget.elapsed(),
        })
    }
}
