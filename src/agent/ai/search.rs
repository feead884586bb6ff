// Search Driver
//
// One computer turn:
//   1. generate the root moves; a single legal move is returned at once
//   2. shuffle them so equal-valued moves are chosen at random
//   3. build a depth-bounded subtree under every root child, all sharing
//      one arena and transposition cache
//   4. negamax-score every child and keep the first strict maximum
//
// All parallel work runs inside the driver's own rayon pool.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

use super::game_tree::GameTreeBuilder;
use super::negamax::Negamax;
use super::rules::{GameRules, RuleVariant};
use super::transposition_table::DEFAULT_CAPACITY;

/// Default look-ahead below each root move.
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Default number of levels above the leaves that fork parallel tasks.
pub const DEFAULT_THREAD_DEPTH: u32 = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("the side to move has no legal moves")]
    NoLegalMoves,
    #[error("failed to start search threads: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Tunables for one [`SearchDriver`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies built below each root move
    pub max_depth: u32,
    /// Remaining depth at or below which work is forked
    pub thread_depth: u32,
    /// Capacity of the transposition and evaluation caches
    pub cache_capacity: usize,
    /// Worker threads (None = one per CPU)
    pub threads: Option<usize>,
    /// Seed for tie-breaking (None = from entropy)
    pub seed: Option<u64>,
    pub variant: RuleVariant,
    /// Keep evaluation scores from one move to the next
    pub reuse_eval_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            thread_depth: DEFAULT_THREAD_DEPTH,
            cache_capacity: DEFAULT_CAPACITY,
            threads: None,
            seed: None,
            variant: RuleVariant::Normal,
            reuse_eval_cache: false,
        }
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub best_move: M,
    /// Negamax value of `best_move`; `None` when the move was forced
    pub score: Option<i32>,
    /// Number of legal moves at the root
    pub candidates: usize,
    pub nodes_built: usize,
    pub cache_hit_rate: f64,
    pub time_ms: u64,
}

/// Picks moves for one side of a game.
pub struct SearchDriver<G: GameRules> {
    rules: G,
    config: SearchConfig,
    pool: ThreadPool,
    rng: StdRng,
}

impl<G: GameRules> SearchDriver<G> {
    /// # Arguments
    /// * `rules` - Game rules; their caches live as long as the driver
    /// * `config` - Search tunables
    pub fn new(rules: G, config: SearchConfig) -> Result<Self, SearchError> {
        let threads = config.threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("search-{i}"))
            .build()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rules,
            config,
            pool,
            rng,
        })
    }

    pub fn rules(&self) -> &G {
        &self.rules
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the side to move in `state`.
    pub fn choose_move(&mut self, state: &G::State) -> Result<G::Move, SearchError> {
        self.search(state).map(|result| result.best_move)
    }

    /// Like [`SearchDriver::choose_move`], with statistics.
    pub fn search(&mut self, state: &G::State) -> Result<SearchResult<G::Move>, SearchError> {
        let start = Instant::now();
        if !self.config.reuse_eval_cache {
            self.rules.clear_caches();
        }

        let mut moves = self.rules.generate_moves(state);
        match moves.len() {
            0 => return Err(SearchError::NoLegalMoves),
            1 => {
                log::debug!("only one legal move, skipping search: {:?}", moves[0]);
                return Ok(SearchResult {
                    best_move: moves.swap_remove(0),
                    score: None,
                    candidates: 1,
                    nodes_built: 0,
                    cache_hit_rate: 0.0,
                    time_ms: start.elapsed().as_millis() as u64,
                });
            }
            _ => {}
        }

        moves.shuffle(&mut self.rng);

        let rules = &self.rules;
        let config = &self.config;
        let (scores, nodes_built, cache_hit_rate) = self.pool.install(|| {
            let builder = GameTreeBuilder::new(rules, config.cache_capacity, config.thread_depth);
            let roots: Vec<_> = moves
                .iter()
                .map(|mv| builder.build(rules.apply_move(state, mv), config.max_depth))
                .collect();
            let hit_rate = builder.cache_hit_rate();
            let tree = builder.finish();

            let negamax = Negamax::new(rules, &tree, config.variant.leaf_sign(), config.thread_depth);
            let scores: Vec<i32> = roots.iter().map(|&root| negamax.evaluate_node(root)).collect();
            (scores, tree.len(), hit_rate)
        });

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }

        let result = SearchResult {
            best_move: moves.swap_remove(best),
            score: Some(scores[best]),
            candidates: scores.len(),
            nodes_built,
            cache_hit_rate,
            time_ms: start.elapsed().as_millis() as u64,
        };

        log::debug!(
            "searched {} candidates, {} nodes in {} ms (cache hit rate {:.1}%): {:?} scores {}",
            result.candidates,
            result.nodes_built,
            result.time_ms,
            result.cache_hit_rate * 100.0,
            result.best_move,
            scores[best]
        );

        Ok(result)
    }
}
