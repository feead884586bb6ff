//! The capability set the search engine needs from a game.
//!
//! [`GameTreeBuilder`](super::GameTreeBuilder), the negamax evaluator and
//! [`SearchDriver`](super::SearchDriver) only ever talk to a game through
//! [`GameRules`]. Checkers implements it once in [`CheckersRules`].

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::game_repr::{BoardKey, BoardState, Move, Side};
use super::evaluation::BoardEvaluator;
use super::transposition_table::DEFAULT_CAPACITY;

/// Rules of a two-player, zero-sum, perfect-information game.
///
/// Implementations are shared by every search thread, hence `Sync`.
pub trait GameRules: Sync {
    type State: Clone + Send + Sync;
    type Move: Clone + Send + Sync + fmt::Debug;
    /// Identity of a position. Equal keys must mean interchangeable states.
    type Key: Copy + Eq + Hash + Send + Sync + fmt::Debug;

    /// Legal moves for the side to move. Empty means the side to move is stuck.
    fn generate_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// The position after `mv`, with the turn passed to the other side.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Heuristic score from the point of view of the side to move.
    fn evaluate(&self, state: &Self::State) -> i32;

    fn canonical_hash(&self, state: &Self::State) -> Self::Key;

    /// Drop any memoized evaluation state.
    fn clear_caches(&self) {}
}

/// Which outcome the players are playing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleVariant {
    /// The side left without a move loses.
    #[default]
    Normal,
    /// Give-away checkers: the side left without a move wins.
    Suicide,
}

impl RuleVariant {
    /// Multiplier applied to a leaf evaluation to get its value for the
    /// player who moved into it.
    pub fn leaf_sign(&self) -> i32 {
        match self {
            RuleVariant::Normal => -1,
            RuleVariant::Suicide => 1,
        }
    }

    /// Winner of a game in which `stuck` has no legal move on its turn.
    pub fn winner_when_stuck(&self, stuck: Side) -> Side {
        match self {
            RuleVariant::Normal => stuck.opponent(),
            RuleVariant::Suicide => stuck,
        }
    }
}

impl fmt::Display for RuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleVariant::Normal => write!(f, "normal"),
            RuleVariant::Suicide => write!(f, "suicide"),
        }
    }
}

/// Checkers rules backed by the board move generator and a memoizing
/// evaluator.
pub struct CheckersRules {
    evaluator: BoardEvaluator,
}

impl CheckersRules {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            evaluator: BoardEvaluator::with_capacity(capacity),
        }
    }

    pub fn evaluator(&self) -> &BoardEvaluator {
        &self.evaluator
    }
}

impl Default for CheckersRules {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for CheckersRules {
    type State = BoardState;
    type Move = Move;
    type Key = BoardKey;

    fn generate_moves(&self, state: &BoardState) -> Vec<Move> {
        state.legal_moves().into_vec()
    }

    fn apply_move(&self, state: &BoardState, mv: &Move) -> BoardState {
        state.apply_move(mv, true)
    }

    fn evaluate(&self, state: &BoardState) -> i32 {
        self.evaluator.evaluate(state)
    }

    fn canonical_hash(&self, state: &BoardState) -> BoardKey {
        state.canonical_hash()
    }

    fn clear_caches(&self) {
        self.evaluator.clear_cache();
    }
}
