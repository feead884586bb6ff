//! Computer player backed by the exhaustive tree search.
//!
//! `ComputerPlayer` owns a [`SearchDriver`] over [`CheckersRules`] and asks
//! it for a move whenever it is this player's turn. The search blocks until
//! done; its statistics from the last turn are kept for inspection.

use crate::agent::ai::{CheckersRules, SearchConfig, SearchDriver, SearchError, SearchResult};
use crate::agent::player::{GameState, Player, PlayerAction};
use crate::game_repr::{BoardState, Move};

pub struct ComputerPlayer {
    driver: SearchDriver<CheckersRules>,
    name: String,
    last_search: Option<SearchResult<Move>>,
}

impl ComputerPlayer {
    /// Create a computer player.
    ///
    /// # Arguments
    ///
    /// * `config` - Search settings (depth, threads, variant, seed)
    /// * `name` - Display name for this player
    ///
    /// # Errors
    ///
    /// Fails if the search thread pool cannot be started.
    pub fn new(config: SearchConfig, name: impl Into<String>) -> Result<Self, SearchError> {
        let rules = CheckersRules::with_cache_capacity(config.cache_capacity);
        Ok(Self {
            driver: SearchDriver::new(rules, config)?,
            name: name.into(),
            last_search: None,
        })
    }

    /// Statistics of the most recent search, if any.
    pub fn last_search(&self) -> Option<&SearchResult<Move>> {
        self.last_search.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        self.driver.config()
    }
}

impl Player for ComputerPlayer {
    fn get_move(&mut self, board: &BoardState) -> PlayerAction {
        match self.driver.search(board) {
            Ok(result) => {
                let mv = result.best_move.clone();
                log::info!(
                    "{} plays {} (score {:?}, {} nodes, {} ms)",
                    self.name,
                    mv,
                    result.score,
                    result.nodes_built,
                    result.time_ms
                );
                self.last_search = Some(result);
                PlayerAction::Move(mv)
            }
            Err(err) => {
                // The orchestrator ends the game before a stuck side is asked
                log::error!("{} could not choose a move: {err}", self.name);
                PlayerAction::Quit
            }
        }
    }

    fn invalid_move(&mut self, mv: &Move) {
        log::error!("{} produced an illegal move {mv}", self.name);
    }

    fn game_ended(&mut self, result: GameState) {
        log::debug!("{} saw the game end: {result:?}", self.name);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Side;

    fn config() -> SearchConfig {
        SearchConfig {
            max_depth: 2,
            threads: Some(2),
            seed: Some(42),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_plays_a_legal_move() {
        let mut player = ComputerPlayer::new(config(), "CPU").unwrap();
        let board = BoardState::starting();

        match player.get_move(&board) {
            PlayerAction::Move(mv) => assert!(board.is_legal(&mv)),
            other => panic!("expected a move, got {other:?}"),
        }
        let stats = player.last_search().unwrap();
        assert_eq!(stats.candidates, 7);
        assert!(stats.nodes_built > 0);
    }

    #[test]
    fn test_stuck_position_quits() {
        let mut player = ComputerPlayer::new(config(), "CPU").unwrap();
        let stuck = BoardState::from_layout(Side::Two, "ooRo ooBb obob rooo booo oboo Booo Rooo").unwrap();
        assert_eq!(player.get_move(&stuck), PlayerAction::Quit);
        assert!(player.last_search().is_none());
    }
}
