//! Core chess types and the host-side position contract used by the engine.

mod board;
mod chess_move;
mod clock;
mod color;
mod error;
mod piece;
mod piece_kind;
mod position;
mod square;

pub use board::{ChessBoard, STARTING_FEN, mirror_fen};
pub use chess_move::Move;
pub use clock::{Clock, FrozenClock, TurnClock};
pub use color::Color;
pub use error::FenError;
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{MAX_MOVES, MoveGuard, MoveList, Position};
pub use square::Square;
