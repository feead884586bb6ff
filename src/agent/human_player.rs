//! Human player implementation that reads moves from a text stream.
//!
//! `HumanPlayer` prompts on a writer and reads one line per attempt from a
//! reader, usually stdin/stdout. A line is either a move in move notation
//! (`B6 A5`, `A6 C4 E2` for a double jump) or one of the keywords:
//!
//! - `undo`: take back your last move
//! - `moves`: list the legal moves
//! - `quit`: abandon the game
//!
//! Lines that do not parse are reported and the player is asked again, so a
//! syntax error never reaches the orchestrator. Legality is checked by the
//! orchestrator, which calls [`Player::invalid_move`] on rejection. End of
//! input counts as quitting.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use checkers_engine::agent::{HumanPlayer, Player, PlayerAction};
//! use checkers_engine::game_repr::BoardState;
//!
//! let input = Cursor::new("C6 D5\n");
//! let mut player = HumanPlayer::new(input, Vec::new(), "Alice");
//! let action = player.get_move(&BoardState::starting());
//! assert_eq!(action, PlayerAction::Move("C6 D5".parse().unwrap()));
//! ```

use std::io::{self, BufRead, BufReader, Write};

use crate::agent::player::{GameState, Player, PlayerAction};
use crate::game_repr::{BoardState, Move};

/// A player typing moves on a console.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    name: String,
}

impl HumanPlayer<BufReader<io::Stdin>, io::Stdout> {
    /// Human player on the process's standard input and output.
    ///
    /// Two such players may share one terminal.
    pub fn stdio(name: impl Into<String>) -> Self {
        // A one-byte buffer never holds text past the line just read
        Self::new(BufReader::with_capacity(1, io::stdin()), io::stdout(), name)
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// # Arguments
    ///
    /// * `input` - Source of move lines
    /// * `output` - Where prompts and messages go
    /// * `name` - Display name for this player
    pub fn new(input: R, output: W, name: impl Into<String>) -> Self {
        Self {
            input,
            output,
            name: name.into(),
        }
    }

    /// Gives back the output stream, e.g. to inspect it in tests.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}").and_then(|_| self.output.flush()) {
            log::warn!("failed to write to {}'s console: {err}", self.name);
        }
    }

    /// Next line of input, trimmed. `None` at end of input or on read error.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                log::warn!("failed to read {}'s input: {err}", self.name);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn get_move(&mut self, board: &BoardState) -> PlayerAction {
        loop {
            let prompt = format!("{} (player {}), your move:", self.name, board.active_player().number());
            self.say(&prompt);

            let Some(line) = self.read_line() else {
                return PlayerAction::Quit;
            };

            match line.to_ascii_lowercase().as_str() {
                "" => continue,
                "quit" | "exit" => return PlayerAction::Quit,
                "undo" => return PlayerAction::Undo,
                "moves" | "help" => {
                    let listing = board
                        .legal_moves()
                        .iter()
                        .map(Move::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.say(&format!("Legal moves: {listing}"));
                    continue;
                }
                _ => {}
            }

            match line.parse::<Move>() {
                Ok(mv) => return PlayerAction::Move(mv),
                Err(err) => self.say(&err.to_string()),
            }
        }
    }

    fn invalid_move(&mut self, mv: &Move) {
        self.say(&format!("Sorry, {mv} is illegal."));
    }

    fn opponent_moved(&mut self, mv: &Move) {
        self.say(&format!("Opponent played {mv}"));
    }

    fn game_ended(&mut self, result: GameState) {
        let message = match result.winner() {
            Some(side) => format!("Game over: player {} wins.", side.number()),
            None => "Game over.".to_string(),
        };
        self.say(&message);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
