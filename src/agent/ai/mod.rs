// AI Agent - Exhaustive depth-bounded search
//
// The computer player expands every line of play to a fixed depth, shares
// transposed positions between lines, and backs scores up with plain negamax.
//
// Key features:
// - Generic over a small `GameRules` capability set
// - Node arena with hash-based transposition sharing (a DAG, not a tree)
// - Bounded FIFO caches safe to share between threads
// - Parallel expansion and scoring near the leaves on a bounded rayon pool
// - Random tie-breaking between equally good moves

mod evaluation;
mod game_tree;
mod negamax;
mod rules;
mod search;
mod transposition_table;


pub use evaluation::{
    evaluate_board, is_along_edge, is_near_edge, is_trapped, BoardEvaluator, KING_VALUE, LOSS,
    MAN_VALUE, WIN,
};
pub use game_tree::{GameTree, GameTreeBuilder, NodeId, SearchNode};
pub use negamax::Negamax;
pub use rules::{CheckersRules, GameRules, RuleVariant};
pub use search::{
    SearchConfig, SearchDriver, SearchError, SearchResult, DEFAULT_MAX_DEPTH, DEFAULT_THREAD_DEPTH,
};
pub use transposition_table::{TranspositionCache, DEFAULT_CAPACITY};
