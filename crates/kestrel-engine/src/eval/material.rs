//! Piece values.

use kestrel_core::PieceKind;

/// Centipawn value of each piece kind, indexed by [`PieceKind::index()`].
///
/// The king's value only matters to move ordering (a king never gets
/// captured); material counting skips it.
pub const PIECE_VALUES: [i32; PieceKind::COUNT] = [
    100,    // Pawn
    320,    // Knight
    330,    // Bishop
    500,    // Rook
    900,    // Queen
    20_000, // King
];

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}
