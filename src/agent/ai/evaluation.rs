// Position evaluation function
// Returns an integer score from the point of view of the side to move
// (positive = good for the side to move).
//
// A side with no legal move has lost. Otherwise the score is plain material
// with a small penalty for kings that sit where a single opposing king can
// pin them against the edge.

use crate::game_repr::{BoardKey, BoardState, Piece, Square, BOARD_SIZE, NUM_SQUARES};
use super::transposition_table::TranspositionCache;

/// Score of a won position.
pub const WIN: i32 = 1000;

/// Score of a lost position.
pub const LOSS: i32 = -WIN;

pub const MAN_VALUE: i32 = 2;
pub const KING_VALUE: i32 = 8;

/// Penalty for a king on a trappable edge square (or one that is trapped).
const EDGE_PENALTY: i32 = 2;

/// Penalty for a king one square in from the edge.
const NEAR_EDGE_PENALTY: i32 = 1;

// A full board of kings must still score below a win
const _: () = assert!(WIN > KING_VALUE * NUM_SQUARES as i32);

/// Memoizing evaluator. Safe to share between search threads.
pub struct BoardEvaluator {
    cache: TranspositionCache<BoardKey, i32>,
}

impl BoardEvaluator {
    pub fn new() -> Self {
        Self {
            cache: TranspositionCache::new(),
        }
    }

    /// # Arguments
    /// * `capacity` - Maximum number of cached scores
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: TranspositionCache::with_capacity(capacity),
        }
    }

    /// Score `board` for its side to move, consulting the cache first.
    pub fn evaluate(&self, board: &BoardState) -> i32 {
        let key = board.canonical_hash();
        if let Some(score) = self.cache.get(&key) {
            return score;
        }

        let score = evaluate_board(board);
        self.cache.put(key, score);
        score
    }

    pub fn cache(&self) -> &TranspositionCache<BoardKey, i32> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for BoardEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uncached evaluation. [`LOSS`] if the side to move cannot move (including
/// having no pieces), else the material balance from its point of view.
pub fn evaluate_board(board: &BoardState) -> i32 {
    if !board.has_legal_move() {
        return LOSS;
    }

    let me = board.active_player();
    Square::all()
        .map(|sq| {
            let piece = board.piece_at(sq);
            let value = piece_value(board, sq, piece);
            if piece.is(me) {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Unsigned worth of `piece` standing on `sq`.
fn piece_value(board: &BoardState, sq: Square, piece: Piece) -> i32 {
    if piece.is_empty() {
        0
    } else if !piece.is_king() {
        MAN_VALUE
    } else if is_trapped(board, sq) || is_along_edge(sq) {
        KING_VALUE - EDGE_PENALTY
    } else if is_near_edge(sq) {
        KING_VALUE - NEAR_EDGE_PENALTY
    } else {
        KING_VALUE
    }
}

/// Edge squares where one opposing king can trap a king. The two squares
/// next to the double corners (row + file == 1 from either end) are
/// excluded: a lone king cannot be held there.
pub fn is_along_edge(sq: Square) -> bool {
    let last = BOARD_SIZE - 1;
    let (row, file) = (sq.row(), sq.file());
    let on_edge = row == 0 || file == 0 || row == last || file == last;
    on_edge && row + file != 1 && (last - row) + (last - file) != 1
}

/// Squares one step in from an edge.
pub fn is_near_edge(sq: Square) -> bool {
    let inner = BOARD_SIZE - 2;
    let (row, file) = (sq.row(), sq.file());
    row == 1 || file == 1 || row == inner || file == inner
}

/// Whether the king on `sq` is already boxed in.
///
/// Not modelled yet; always `false`, so only the edge heuristics apply.
pub fn is_trapped(_board: &BoardState, _sq: Square) -> bool {
    false
}
