use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use kestrel_core::{ChessBoard, Clock, Color, Position, STARTING_FEN, TurnClock};
use kestrel_engine::{Engine, SearchConfig};
use tracing::info;

/// Play kestrel against itself.
#[derive(Parser, Debug)]
#[command(name = "kestrel", version)]
struct Args {
    /// Starting position.
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Clock time per side, in milliseconds.
    #[arg(long, default_value_t = 60_000)]
    time_ms: u64,

    /// Cap the iterative-deepening depth.
    #[arg(long)]
    max_depth: Option<u8>,

    /// Disable check and pawn-push extensions.
    #[arg(long)]
    no_extensions: bool,

    /// Stop the game after this many plies.
    #[arg(long, default_value_t = 300)]
    max_plies: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Timeout { loser: Color },
    PlyLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::Stalemate => write!(f, "draw by stalemate"),
            Outcome::Timeout { loser } => write!(f, "{} wins on time", loser.flip()),
            Outcome::PlyLimit => write!(f, "ply limit reached"),
        }
    }
}

fn play(
    pos: &mut ChessBoard,
    config: SearchConfig,
    time_per_side: Duration,
    max_plies: u32,
) -> Result<Outcome> {
    // one engine per side, so each remembers only its own turns
    let mut engines = [Engine::new(config), Engine::new(config)];
    let mut remaining = [time_per_side; 2];

    for ply in 0..max_plies {
        let side = pos.side_to_move();
        if pos.is_checkmate() {
            return Ok(Outcome::Checkmate { winner: side.flip() });
        }
        if pos.is_stalemate() {
            return Ok(Outcome::Stalemate);
        }

        let clock = TurnClock::start(remaining[side.index()]);
        let result = engines[side.index()]
            .search(pos, &clock, |_| {})
            .with_context(|| format!("{side} failed to move in {pos}"))?;

        let spent = clock.elapsed_this_turn();
        remaining[side.index()] = remaining[side.index()].saturating_sub(spent);
        info!(
            ply,
            %side,
            mv = %result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            spent_ms = spent.as_millis() as u64,
            "move played"
        );
        if remaining[side.index()].is_zero() {
            return Ok(Outcome::Timeout { loser: side });
        }

        pos.make_move(result.best_move);
    }

    Ok(Outcome::PlyLimit)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut pos: ChessBoard = args
        .fen
        .parse()
        .with_context(|| format!("invalid --fen {:?}", args.fen))?;

    let mut config = SearchConfig::default().with_extensions(!args.no_extensions);
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }

    info!(fen = %pos, time_ms = args.time_ms, ?config, "kestrel self-play starting");
    let outcome = play(
        &mut pos,
        config,
        Duration::from_millis(args.time_ms),
        args.max_plies,
    )?;
    info!(%outcome, final_fen = %pos, "game over");

    Ok(())
}
