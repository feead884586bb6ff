// Negamax over a finished game tree
//
// Every node value is taken from the point of view of the player who moved
// INTO that node (the parent's side to move), so a parent's value is simply
// the negated maximum of its children:
//
//   leaf:     leaf_sign * evaluate(state)
//   interior: -max(value(child) for child in children)
//
// `evaluate` scores a position for the side to move there, so the normal
// leaf sign is -1. Suicide play uses +1, which makes the searching side
// steer towards positions that are bad for it.
//
// There is no pruning: the tree is already bounded by the builder. Values
// are memoized on the nodes, so shared DAG nodes are scored once.

use super::game_tree::{GameTree, NodeId};
use super::rules::GameRules;

/// Scores nodes of one [`GameTree`].
pub struct Negamax<'a, G: GameRules> {
    rules: &'a G,
    tree: &'a GameTree<G::State>,
    leaf_sign: i32,
    thread_depth: u32,
}

impl<'a, G: GameRules> Negamax<'a, G> {
    /// # Arguments
    /// * `rules` - Rules providing the leaf evaluation
    /// * `tree` - Tree built by `GameTreeBuilder`
    /// * `leaf_sign` - `-1` for normal play, `+1` for suicide play
    /// * `thread_depth` - Remaining depth at or below which children are
    ///   scored in parallel
    pub fn new(rules: &'a G, tree: &'a GameTree<G::State>, leaf_sign: i32, thread_depth: u32) -> Self {
        Self {
            rules,
            tree,
            leaf_sign,
            thread_depth,
        }
    }

    /// Value of `id` for the player who moved into it.
    pub fn evaluate_node(&self, id: NodeId) -> i32 {
        let node = self.tree.node(id);
        if let Some(score) = node.score() {
            return score;
        }

        let best_child = if node.remaining_depth() <= self.thread_depth && node.children().len() > 1 {
            self.par_max(node.children())
        } else {
            node.children().iter().map(|&child| self.evaluate_node(child)).max()
        };

        let score = match best_child {
            Some(best) => -best,
            None => self.leaf_sign * self.rules.evaluate(node.state()),
        };

        // Another task may have scored this node first; both values agree
        let _ = node.score.set(score);
        score
    }

    fn par_max(&self, children: &[NodeId]) -> Option<i32> {
        let mut scores = vec![0; children.len()];
        rayon::scope(|scope| {
            for (slot, &child) in scores.iter_mut().zip(children) {
                scope.spawn(move |_| *slot = self.evaluate_node(child));
            }
        });
        scores.into_iter().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::{LOSS, WIN};
    use crate::agent::ai::game_tree::GameTreeBuilder;
    use crate::agent::ai::rules::CheckersRules;
    use crate::game_repr::{BoardState, Side};

    fn score(layout: &str, active: Side, depth: u32, leaf_sign: i32) -> i32 {
        let rules = CheckersRules::new();
        let builder = GameTreeBuilder::new(&rules, 10_000, 0);
        let root = builder.build(BoardState::from_layout(active, layout).unwrap(), depth);
        let tree = builder.finish();
        Negamax::new(&rules, &tree, leaf_sign, 0).evaluate_node(root)
    }

    #[test]
    fn test_leaf_is_scored_for_the_previous_mover() {
        // Player 1 to move with no pieces: a win for player 2, who moved last
        let layout = ".... .... ..R. .... .... .... .... ....";
        assert_eq!(score(layout, Side::One, 0, -1), WIN);
        assert_eq!(score(layout, Side::One, 0, 1), LOSS);
    }

    #[test]
    fn test_stuck_node_is_a_leaf_at_any_depth() {
        let layout = "ooRo ooBb obob rooo booo oboo Booo Rooo";
        assert_eq!(score(layout, Side::Two, 4, -1), WIN);
    }

    #[test]
    fn test_forced_capture_of_last_piece() {
        // Player 1 must jump the last red man; from player 2's side
        // (who moved into the root) that is a loss
        let layout = ".... .... .... .... .r.. .b.. .... ....";
        assert_eq!(score(layout, Side::One, 1, -1), LOSS);
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let rules = CheckersRules::new();
        let builder = GameTreeBuilder::new(&rules, 100_003, 0);
        let root = builder.build(BoardState::starting(), 4);
        let tree = builder.finish();
        let sequential = Negamax::new(&rules, &tree, -1, 0).evaluate_node(root);

        let builder = GameTreeBuilder::new(&rules, 100_003, 0);
        let root = builder.build(BoardState::starting(), 4);
        let tree = builder.finish();
        let parallel = Negamax::new(&rules, &tree, -1, 4).evaluate_node(root);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_scores_are_memoized() {
        let rules = CheckersRules::new();
        let builder = GameTreeBuilder::new(&rules, 1000, 0);
        let root = builder.build(BoardState::starting(), 2);
        let tree = builder.finish();
        let negamax = Negamax::new(&rules, &tree, -1, 0);

        assert_eq!(tree.node(root).score(), None);
        let value = negamax.evaluate_node(root);
        assert_eq!(tree.node(root).score(), Some(value));
        assert!(tree.node(root).children().iter().all(|&c| tree.node(c).score().is_some()));
    }
}
