//! Player trait and associated types for checkers game agents.
//!
//! This module provides the core abstraction for entities that can provide
//! moves. Different player types (console human, computer search) implement
//! the `Player` trait to take part in games run by the
//! [`Orchestrator`](crate::orchestrator::Orchestrator).
//!
//! # Design Philosophy
//!
//! The `Player` trait focuses on **behavior** rather than construction. A
//! human player needs an input and an output stream, a computer player needs
//! search settings, so each implementation provides its own constructor.
//!
//! # Synchronous Design
//!
//! `get_move()` is blocking. A human player waits for a line of input; a
//! computer player runs its whole search before returning. The orchestrator
//! calls it and waits.

use crate::game_repr::{BoardState, Move, Side};

/// State of a game, as tracked by the orchestrator.
///
/// `Player1Win` and `Player2Win` are absorbing: once reached, no further
/// moves are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Continue,
    Player1Win,
    Player2Win,
}

impl GameState {
    /// Create a GameState from the winning side
    pub fn from_winner(winner: Side) -> Self {
        match winner {
            Side::One => GameState::Player1Win,
            Side::Two => GameState::Player2Win,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameState::Continue => None,
            GameState::Player1Win => Some(Side::One),
            GameState::Player2Win => Some(Side::Two),
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameState::Continue
    }
}

/// What a player wants to do on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Play this move. It is checked for legality by the caller.
    Move(Move),
    /// Take back the last move of this player (and any reply to it).
    Undo,
    /// Abandon the game.
    Quit,
}

/// Trait for entities that can provide checkers moves.
///
/// # Required Methods
///
/// Only `get_move()` must be implemented. All other methods have default
/// implementations that can be overridden as needed.
///
/// # Thread Safety
///
/// The trait is not `Send` or `Sync`. Players run on the thread that drives
/// the game; a computer player may use worker threads internally.
pub trait Player {
    /// Request the next action from this player.
    ///
    /// `board` is the current position; its active player is the side this
    /// player controls. A returned move that is not legal is rejected with
    /// [`Player::invalid_move`] and `get_move()` is called again.
    fn get_move(&mut self, board: &BoardState) -> PlayerAction;

    /// Notify this player that the move it returned was rejected.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn invalid_move(&mut self, _mv: &Move) {}

    /// Notify this player that the opponent made a move.
    fn opponent_moved(&mut self, _mv: &Move) {}

    /// Notify this player that the game has ended.
    ///
    /// # Parameters
    ///
    /// - `result`: The final state of the game, never `Continue`
    fn game_ended(&mut self, _result: GameState) {}

    /// Get the display name of this player.
    fn name(&self) -> &str {
        "Player"
    }
}

/// Receives every committed position, e.g. to draw it.
pub trait BoardObserver {
    fn board_changed(&mut self, board: &BoardState);
}
