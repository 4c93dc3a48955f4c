//! [`Position`] implementation backed by the `chess` crate.

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, ChessMove, EMPTY, MoveGen};
use tracing::warn;

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::{MoveList, Position};
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A game position with an undo stack.
///
/// `chess::Board` is a small copyable value, so `make_move` pushes the
/// current board and `unmake_move` pops it back; reverting is exact.
#[derive(Clone)]
pub struct ChessBoard {
    board: Board,
    undo: Vec<Board>,
}

impl ChessBoard {
    /// The standard starting position.
    pub fn starting_position() -> Self {
        Self::from_board(Board::default())
    }

    /// Parse a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields = fen.split_whitespace().count();
        if fields < 4 {
            return Err(FenError::MissingFields { found: fields });
        }
        Board::from_str(fen)
            .map(Self::from_board)
            .map_err(|err| FenError::Rejected {
                fen: fen.to_string(),
                reason: err.to_string(),
            })
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            undo: Vec::new(),
        }
    }

    /// FEN of the current position.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// The colour-reversed position: ranks mirrored, colours and side to move swapped.
    pub fn mirrored(&self) -> Result<Self, FenError> {
        Self::from_fen(&mirror_fen(&self.fen())?)
    }

    /// Look up a legal move by its UCI text (`e2e4`, `e7e8q`).
    pub fn find_move(&self, uci: &str) -> Option<Move> {
        self.legal_moves().into_iter().find(|mv| mv.to_uci() == uci)
    }

    /// Number of moves that can currently be reverted.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    fn describe(&self, raw: ChessMove) -> Option<Move> {
        let from = raw.get_source();
        let to = raw.get_dest();
        let piece = PieceKind::from_chess(self.board.piece_on(from)?);
        let mut mv = Move::new(Square::from_chess(from), Square::from_chess(to), piece);

        if let Some(victim) = self.board.piece_on(to) {
            mv = mv.with_capture(PieceKind::from_chess(victim));
        } else if piece == PieceKind::Pawn && from.get_file() != to.get_file() {
            // en passant: the destination is empty
            mv = mv.with_capture(PieceKind::Pawn);
        }

        if let Some(promotion) = raw.get_promotion() {
            mv = mv.with_promotion(PieceKind::from_chess(promotion));
        }
        Some(mv)
    }
}

fn color_from_chess(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

impl Position for ChessBoard {
    fn side_to_move(&self) -> Color {
        color_from_chess(self.board.side_to_move())
    }

    fn legal_moves(&self) -> MoveList {
        MoveGen::new_legal(&self.board)
            .filter_map(|raw| self.describe(raw))
            .collect()
    }

    fn capture_moves(&self) -> MoveList {
        let mut targets = *self.board.combined();
        if let Some(ep) = self.board.en_passant() {
            // the double-pushed pawn's square and the square behind it
            targets = targets
                | BitBoard::from_square(ep)
                | BitBoard::from_square(ep.uforward(self.board.side_to_move()));
        }
        let mut moves = MoveGen::new_legal(&self.board);
        moves.set_iterator_mask(targets);
        moves
            .filter_map(|raw| self.describe(raw))
            .filter(|mv| mv.is_capture())
            .collect()
    }

    fn make_move(&mut self, mv: Move) {
        let raw = ChessMove::new(
            mv.source().to_chess(),
            mv.dest().to_chess(),
            mv.promotion().map(PieceKind::to_chess),
        );
        let next = self.board.make_move_new(raw);
        self.undo.push(std::mem::replace(&mut self.board, next));
    }

    fn unmake_move(&mut self) {
        debug_assert!(!self.undo.is_empty(), "unmake_move without a matching make_move");
        match self.undo.pop() {
            Some(previous) => self.board = previous,
            None => warn!("unmake_move called on a position with nothing to revert"),
        }
    }

    fn is_in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_checkmate(&self) -> bool {
        self.is_in_check() && MoveGen::new_legal(&self.board).len() == 0
    }

    fn is_stalemate(&self) -> bool {
        !self.is_in_check() && MoveGen::new_legal(&self.board).len() == 0
    }

    fn hash(&self) -> u64 {
        self.board.get_hash()
    }

    fn piece_on(&self, sq: Square) -> Option<Piece> {
        let raw = sq.to_chess();
        let kind = PieceKind::from_chess(self.board.piece_on(raw)?);
        let color = color_from_chess(self.board.color_on(raw)?);
        Some(Piece::new(kind, color))
    }

    fn attacked_by_enemy_pawn(&self, sq: Square) -> bool {
        let us = self.board.side_to_move();
        let enemy_pawns = *self.board.pieces(chess::Piece::Pawn) & *self.board.color_combined(!us);
        // a pawn of our colour on `sq` would attack exactly the squares
        // from which enemy pawns attack `sq`
        chess::get_pawn_attacks(sq.to_chess(), us, enemy_pawns) != EMPTY
    }
}

impl FromStr for ChessBoard {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessBoard")
            .field("fen", &self.fen())
            .field("undo_depth", &self.undo.len())
            .finish()
    }
}

/// Colour-reverse a FEN: the rank order is flipped, piece case swapped, and
/// side to move, castling rights, and en passant square mirrored.
///
/// Move counters, when present, are kept as they are.
pub fn mirror_fen(fen: &str) -> Result<String, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::MissingFields { found: fields.len() });
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    let placement = ranks
        .iter()
        .rev()
        .map(|rank| swap_case(rank))
        .collect::<Vec<_>>()
        .join("/");

    let side = match fields[1] {
        "w" => "b",
        "b" => "w",
        other => {
            return Err(FenError::InvalidColor {
                found: other.to_string(),
            });
        }
    };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        "KQkq".chars().filter(|c| swapped.contains(*c)).collect()
    };

    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        text => Square::from_algebraic(text)
            .filter(|sq| sq.rank() == 2 || sq.rank() == 5)
            .map(|sq| sq.flip_rank().to_string())
            .ok_or_else(|| FenError::InvalidEnPassant {
                found: text.to_string(),
            })?,
    };

    let mut out = vec![placement, side.to_string(), castling, en_passant];
    out.extend(fields[4..].iter().map(|field| field.to_string()));
    Ok(out.join(" "))
}

fn swap_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = ChessBoard::starting_position();
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.side_to_move(), Color::White);
        assert!(board.capture_moves().is_empty());
    }

    #[test]
    fn parses_starting_fen() {
        let parsed: ChessBoard = STARTING_FEN.parse().unwrap();
        assert_eq!(parsed.hash(), ChessBoard::starting_position().hash());
    }

    #[test]
    fn rejects_short_and_invalid_fen() {
        assert_eq!(
            ChessBoard::from_fen("8/8/8 w").unwrap_err(),
            FenError::MissingFields { found: 2 }
        );
        assert!(matches!(
            ChessBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::Rejected { .. })
        ));
    }

    #[test]
    fn make_unmake_restores_hash_and_fen() {
        let mut board = ChessBoard::starting_position();
        let hash = board.hash();
        let fen = board.fen();
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = board.find_move(uci).unwrap();
            board.make_move(mv);
        }
        // the knights went out and came back
        assert_eq!(board.hash(), hash);
        assert_eq!(board.undo_depth(), 4);
        for _ in 0..4 {
            board.unmake_move();
        }
        assert_eq!(board.fen(), fen);
        assert_eq!(board.undo_depth(), 0);
    }

    #[test]
    fn describes_captures_and_moving_piece() {
        let board: ChessBoard = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = board.find_move("e4d5").unwrap();
        assert_eq!(mv.piece(), PieceKind::Pawn);
        assert_eq!(mv.captured(), Some(PieceKind::Queen));
        assert_eq!(board.capture_moves().len(), 1);
    }

    #[test]
    fn en_passant_reports_pawn_capture() {
        let board: ChessBoard = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
            .parse()
            .unwrap();
        let mv = board.find_move("e5d6").unwrap();
        assert_eq!(mv.captured(), Some(PieceKind::Pawn));
        assert!(board.capture_moves().contains(&mv));
    }

    #[test]
    fn capture_generation_matches_filtered_legal_moves() {
        for fen in [
            STARTING_FEN,
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            "3rk3/3r4/2n5/3p4/4P3/2N5/3R4/3RK3 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 3",
        ] {
            let board: ChessBoard = fen.parse().unwrap();
            let filtered: Vec<Move> = board
                .legal_moves()
                .into_iter()
                .filter(|mv| mv.is_capture())
                .collect();
            let generated: Vec<Move> = board.capture_moves().into_iter().collect();
            assert_eq!(generated.len(), filtered.len(), "{fen}");
            for mv in &filtered {
                assert!(generated.contains(mv), "{fen}: missing {mv}");
            }
        }
    }

    #[test]
    fn promotions_are_described() {
        let board: ChessBoard = "7k/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promotions: Vec<Move> = board
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.is_promotion())
            .collect();
        assert_eq!(promotions.len(), 4);
        assert!(board.find_move("e7e8q").is_some());
    }

    #[test]
    fn castling_is_not_a_capture() {
        let board: ChessBoard = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let castle = board.find_move("e1g1").unwrap();
        assert_eq!(castle.piece(), PieceKind::King);
        assert!(!castle.is_capture());
    }

    #[test]
    fn pawn_attack_query_uses_enemy_pawns() {
        let board: ChessBoard = "4k3/8/8/3p4/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(board.attacked_by_enemy_pawn(sq("e4")));
        assert!(board.attacked_by_enemy_pawn(sq("c4")));
        assert!(!board.attacked_by_enemy_pawn(sq("d4")));
        assert!(!board.attacked_by_enemy_pawn(sq("e6")));
    }

    #[test]
    fn piece_on_reports_color() {
        let board = ChessBoard::starting_position();
        assert_eq!(
            board.piece_on(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(board.piece_on(sq("e4")), None);
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        let mated: ChessBoard = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(mated.is_in_check());
        assert!(mated.is_checkmate());
        assert!(!mated.is_stalemate());

        let stalemate: ChessBoard = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(!stalemate.is_in_check());
        assert!(stalemate.is_stalemate());
        assert!(stalemate.legal_moves().is_empty());
    }

    #[test]
    fn mirror_of_start_swaps_side_only() {
        let mirrored = mirror_fen(STARTING_FEN).unwrap();
        assert_eq!(
            mirrored,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn mirror_handles_castling_and_en_passant() {
        let fen = "r3k2r/8/8/3pP3/8/8/8/4K2R w Kq d6 0 1";
        let mirrored = mirror_fen(fen).unwrap();
        assert_eq!(mirrored, "4k2r/8/8/8/3Pp3/8/8/R3K2R b Qk d3 0 1");
        assert_eq!(mirror_fen(&mirrored).unwrap(), fen);
    }

    #[test]
    fn mirror_rejects_bad_fields() {
        assert!(matches!(
            mirror_fen("8/8/8/8/8/8/8 w - -"),
            Err(FenError::WrongRankCount { found: 7 })
        ));
        assert!(matches!(
            mirror_fen("8/8/8/8/8/8/8/8 x - -"),
            Err(FenError::InvalidColor { .. })
        ));
        assert!(matches!(
            mirror_fen("8/8/8/8/8/8/8/8 w - e4"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn mirrored_board_swaps_sides() {
        let board: ChessBoard = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mirrored = board.mirrored().unwrap();
        assert_eq!(mirrored.side_to_move(), Color::Black);
        assert_eq!(
            mirrored.piece_on(sq("d4")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            mirrored.piece_on(sq("e5")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }
}
