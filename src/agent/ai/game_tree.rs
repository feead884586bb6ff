// Depth-Bounded Game Tree
//
// The tree is stored as an arena of nodes addressed by `NodeId`. Positions
// are shared through a transposition cache keyed by the canonical hash only,
// so the structure is a DAG: a position reached by two move orders is built
// once and both parents point at the same node. The remaining depth is not
// part of the key, so a node built for a shallow budget may be reused where a
// deeper one was asked for.
//
// Nodes are pushed after their children (post-order), which keeps every edge
// pointing at a lower index and makes cycles impossible.
//
// Near the leaves (remaining depth <= thread_depth) children are expanded as
// rayon tasks. Two tasks may build the same position at the same time; the
// loser's node is simply left unreferenced by the cache.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use super::rules::GameRules;
use super::transposition_table::TranspositionCache;

/// Index of a node in a [`GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One position in the search DAG.
pub struct SearchNode<S> {
    state: S,
    remaining_depth: u32,
    children: Vec<NodeId>,
    /// Negamax value, filled in once per search
    pub(crate) score: OnceCell<i32>,
}

impl<S> SearchNode<S> {
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Depth budget the node was built with.
    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `true` at the depth limit and for positions with no legal move.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The memoized negamax value, if it has been computed.
    pub fn score(&self) -> Option<i32> {
        self.score.get().copied()
    }
}

/// A finished, immutable arena of search nodes.
pub struct GameTree<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> GameTree<S> {
    /// # Panics
    /// Panics if `id` did not come from the builder that produced this tree.
    pub fn node(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct nodes reachable from `root`, counting shared nodes once.
    pub fn reachable_from(&self, root: NodeId) -> usize {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        let mut count = 0;
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            count += 1;
            stack.extend_from_slice(self.node(id).children());
        }
        count
    }
}

/// Expands positions into a shared arena. Used for one search call.
pub struct GameTreeBuilder<'r, G: GameRules> {
    rules: &'r G,
    arena: Mutex<Vec<SearchNode<G::State>>>,
    cache: TranspositionCache<G::Key, NodeId>,
    thread_depth: u32,
}

impl<'r, G: GameRules> GameTreeBuilder<'r, G> {
    /// # Arguments
    /// * `rules` - Game rules used to expand positions
    /// * `cache_capacity` - Maximum number of positions remembered for sharing
    /// * `thread_depth` - Remaining depth at or below which children are
    ///   expanded in parallel
    pub fn new(rules: &'r G, cache_capacity: usize, thread_depth: u32) -> Self {
        Self {
            rules,
            arena: Mutex::new(Vec::new()),
            cache: TranspositionCache::with_capacity(cache_capacity),
            thread_depth,
        }
    }

    /// Builds (or reuses) the node for `state` with `remaining_depth` plies
    /// of look-ahead below it.
    ///
    /// Parallel expansion runs on the current rayon pool; wrap the call in
    /// `ThreadPool::install` to bound it.
    pub fn build(&self, state: G::State, remaining_depth: u32) -> NodeId {
        let key = self.rules.canonical_hash(&state);
        if let Some(id) = self.cache.get(&key) {
            return id;
        }

        let children = if remaining_depth == 0 {
            Vec::new()
        } else {
            let next: Vec<G::State> = self
                .rules
                .generate_moves(&state)
                .iter()
                .map(|mv| self.rules.apply_move(&state, mv))
                .collect();
            self.build_children(next, remaining_depth - 1)
        };

        let id = self.push(SearchNode {
            state,
            remaining_depth,
            children,
            score: OnceCell::new(),
        });
        self.cache.put(key, id);
        id
    }

    fn build_children(&self, states: Vec<G::State>, depth: u32) -> Vec<NodeId> {
        if depth + 1 > self.thread_depth || states.len() < 2 {
            return states.into_iter().map(|s| self.build(s, depth)).collect();
        }

        let mut slots: Vec<Option<NodeId>> = vec![None; states.len()];
        rayon::scope(|scope| {
            for (slot, state) in slots.iter_mut().zip(states) {
                scope.spawn(move |_| *slot = Some(self.build(state, depth)));
            }
        });
        slots.into_iter().flatten().collect()
    }

    fn push(&self, node: SearchNode<G::State>) -> NodeId {
        let mut arena = self.arena.lock();
        let id = NodeId(arena.len() as u32);
        arena.push(node);
        id
    }

    /// Nodes created so far.
    pub fn nodes_built(&self) -> usize {
        self.arena.lock().len()
    }

    pub fn cache_hit_rate(&self) -> f64 {
        self.cache.hit_rate()
    }

    /// Freezes the arena into a tree.
    pub fn finish(self) -> GameTree<G::State> {
        GameTree {
            nodes: self.arena.into_inner(),
        }
    }
}
