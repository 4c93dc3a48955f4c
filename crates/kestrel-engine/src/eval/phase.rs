//! Endgame weight from the opponent's remaining non-pawn material.

use kestrel_core::PieceKind;

use crate::eval::material::piece_value;

/// Non-pawn material at or above which a side is still fully in the middlegame:
/// two pawns' worth plus a bishop and a knight (850).
pub const ENDGAME_MATERIAL_START: i32 = piece_value(PieceKind::Pawn) * 2
    + piece_value(PieceKind::Bishop)
    + piece_value(PieceKind::Knight);

/// Endgame weight in `0..=ENDGAME_MATERIAL_START`.
///
/// 0 means pure middlegame, [`ENDGAME_MATERIAL_START`] means pure endgame.
/// This is `1 − min(1, material / 850)` in fixed point.
pub fn endgame_weight(opponent_non_pawn_material: i32) -> i32 {
    ENDGAME_MATERIAL_START - opponent_non_pawn_material.clamp(0, ENDGAME_MATERIAL_START)
}

/// Blend a middlegame and an endgame term by `weight`.
///
/// Truncates toward zero, so equal inputs for both colours give equal outputs.
pub fn taper(mg: i32, eg: i32, weight: i32) -> i32 {
    (mg * (ENDGAME_MATERIAL_START - weight) + eg * weight) / ENDGAME_MATERIAL_START
}
