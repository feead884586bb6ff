use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Builds a board from a compact layout (see `BoardState::from_layout`).
pub fn board(active: Side, layout: &str) -> BoardState {
    BoardState::from_layout(active, layout).expect("test layout must be valid")
}

/// Parses a square in move notation, e.g. `"C6"`.
pub fn sq(text: &str) -> Square {
    text.parse().expect("test square must be valid")
}

/// Parses a move in move notation, e.g. `"A6 C4 E2"`.
pub fn mv(text: &str) -> Move {
    text.parse().expect("test move must be valid")
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], text: &str) -> bool {
    let wanted = mv(text);
    moves.iter().any(|m| *m == wanted)
}

/// Sorted string form of a move list, for order-independent comparison.
pub fn move_strings(moves: &[Move]) -> Vec<String> {
    let mut out: Vec<String> = moves.iter().map(Move::to_string).collect();
    out.sort();
    out
}

// ==================== TEST MODULES ====================

mod apply_move;
mod notation;
mod promotion;
