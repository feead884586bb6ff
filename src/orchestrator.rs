//! Turn loop and game-end detection.
//!
//! This module contains the [`Orchestrator`], which owns the current
//! position and the two players. It manages:
//! - Turn management (asking the side to move for an action)
//! - Move validation and execution
//! - End detection, including the give-away variant
//! - Undo history and observer notification
//!
//! # Example Flow
//!
//! ```text
//! [Request action] -> Move  -> [Legal?] -no-> invalid_move() -> [Request action]
//!                                  |yes
//!                                  v
//!                     [Commit] -> [Notify] -> [Check end] -> next turn
//!                  -> Undo  -> [Restore earlier position] -> [Notify]
//!                  -> Quit  -> Err(Aborted)
//! ```

use std::io::Write;

use thiserror::Error;

use crate::agent::ai::RuleVariant;
use crate::agent::player::{BoardObserver, GameState, Player, PlayerAction};
use crate::game_repr::{BoardState, Move, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("{0} quit the game")]
    Aborted(String),
}

/// Root component running one game between two players.
///
/// # Game Flow
///
/// Each call to [`play_turn`](Orchestrator::play_turn):
/// 1. Asks the player whose side is to move for a [`PlayerAction`]
/// 2. Rejects illegal moves with [`Player::invalid_move`] and asks again
/// 3. Commits a legal move, notifies the opponent and observers
/// 4. Runs [`check_game_end`](Orchestrator::check_game_end)
///
/// Once the game is over, further turns are no-ops.
pub struct Orchestrator {
    board: BoardState,

    /// Player 1 and player 2, in that order
    players: [Box<dyn Player>; 2],

    variant: RuleVariant,

    observers: Vec<Box<dyn BoardObserver>>,

    /// Position before every committed move, oldest first
    history: Vec<BoardState>,

    state: GameState,

    moves_played: usize,
}

impl Orchestrator {
    /// Create a game from the standard starting position.
    ///
    /// # Arguments
    ///
    /// * `player1` - Player moving first (rows 5-7)
    /// * `player2` - Player moving second (rows 0-2)
    /// * `variant` - Which side wins when a player cannot move
    pub fn new(player1: Box<dyn Player>, player2: Box<dyn Player>, variant: RuleVariant) -> Self {
        Self::with_board(BoardState::starting(), player1, player2, variant)
    }

    /// Create a game from an arbitrary position. A position in which the
    /// side to move is already stuck starts finished.
    pub fn with_board(
        board: BoardState,
        player1: Box<dyn Player>,
        player2: Box<dyn Player>,
        variant: RuleVariant,
    ) -> Self {
        let mut orchestrator = Self {
            board,
            players: [player1, player2],
            variant,
            observers: Vec::new(),
            history: Vec::new(),
            state: GameState::Continue,
            moves_played: 0,
        };
        orchestrator.check_game_end();
        orchestrator
    }

    /// Register a renderer or other listener. It is sent the current
    /// position immediately.
    pub fn add_observer(&mut self, mut observer: Box<dyn BoardObserver>) {
        observer.board_changed(&self.board);
        self.observers.push(observer);
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// Number of moves committed (undone moves are subtracted).
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Index of `side` in `players`.
    fn seat(side: Side) -> usize {
        match side {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// Play one turn of the side to move.
    ///
    /// Returns the game state afterwards. An undo counts as the turn.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Aborted`] if the player quits.
    pub fn play_turn(&mut self) -> Result<GameState, OrchestratorError> {
        if self.state.is_over() {
            return Ok(self.state);
        }

        let side = self.board.active_player();
        let seat = Self::seat(side);
        loop {
            let action = self.players[seat].get_move(&self.board);
            match action {
                PlayerAction::Quit => {
                    let name = self.players[seat].name().to_string();
                    log::info!("{name} (player {}) quit", side.number());
                    return Err(OrchestratorError::Aborted(name));
                }
                PlayerAction::Undo => {
                    if self.undo() {
                        return Ok(self.state);
                    }
                    log::debug!("player {} asked to undo with nothing to undo", side.number());
                }
                PlayerAction::Move(mv) => {
                    if self.board.is_legal(&mv) {
                        self.commit(&mv);
                        return Ok(self.state);
                    }
                    log::debug!("player {} tried illegal move {mv}", side.number());
                    self.players[seat].invalid_move(&mv);
                }
            }
        }
    }

    /// Play turns until the game is over.
    pub fn play(&mut self) -> Result<GameState, OrchestratorError> {
        while !self.state.is_over() {
            self.play_turn()?;
        }
        Ok(self.state)
    }

    fn commit(&mut self, mv: &Move) {
        let side = self.board.active_player();
        self.history.push(self.board.clone());
        self.board = self.board.apply_move(mv, true);
        self.moves_played += 1;

        self.players[Self::seat(side.opponent())].opponent_moved(mv);
        self.notify_observers();
        self.check_game_end();
    }

    /// Take back moves until the side to move gets back its previous turn:
    /// its own last move plus any reply to it. Returns `false` if that
    /// side has not moved yet.
    pub fn undo(&mut self) -> bool {
        let side = self.board.active_player();
        let Some(index) = self.history.iter().rposition(|b| b.active_player() == side) else {
            return false;
        };

        self.moves_played -= self.history.len() - index;
        self.board = self.history[index].clone();
        self.history.truncate(index);
        self.state = GameState::Continue;
        log::debug!("player {} undid back to move {}", side.number(), self.moves_played);

        self.notify_observers();
        true
    }

    /// Ends the game if the side to move has no legal move. In normal play
    /// that side loses; in give-away play it wins.
    pub fn check_game_end(&mut self) -> GameState {
        if self.state.is_over() || self.board.has_legal_move() {
            return self.state;
        }

        let stuck = self.board.active_player();
        let winner = self.variant.winner_when_stuck(stuck);
        self.state = GameState::from_winner(winner);
        log::info!(
            "player {} cannot move; player {} wins ({} rules, {} moves)",
            stuck.number(),
            winner.number(),
            self.variant,
            self.moves_played
        );

        let result = self.state;
        for player in self.players.iter_mut() {
            player.game_ended(result);
        }
        result
    }

    fn notify_observers(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.board_changed(&self.board);
        }
    }
}

/// Prints every position to a text stream.
pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> BoardObserver for ConsoleRenderer<W> {
    fn board_changed(&mut self, board: &BoardState) {
        if let Err(err) = writeln!(self.out, "\n{board}").and_then(|_| self.out.flush()) {
            log::warn!("failed to draw the board: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct Record {
        asked: usize,
        invalid: Vec<Move>,
        opponent: Vec<Move>,
        ended: Vec<GameState>,
    }

    /// Plays a fixed list of actions, then quits.
    struct Scripted {
        actions: VecDeque<PlayerAction>,
        record: Rc<RefCell<Record>>,
        name: &'static str,
    }

    impl Player for Scripted {
        fn get_move(&mut self, _board: &BoardState) -> PlayerAction {
            self.record.borrow_mut().asked += 1;
            self.actions.pop_front().unwrap_or(PlayerAction::Quit)
        }

        fn invalid_move(&mut self, mv: &Move) {
            self.record.borrow_mut().invalid.push(mv.clone());
        }

        fn opponent_moved(&mut self, mv: &Move) {
            self.record.borrow_mut().opponent.push(mv.clone());
        }

        fn game_ended(&mut self, result: GameState) {
            self.record.borrow_mut().ended.push(result);
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn mv(text: &str) -> PlayerAction {
        PlayerAction::Move(text.parse().unwrap())
    }

    fn scripted(name: &'static str, actions: Vec<PlayerAction>) -> (Box<dyn Player>, Rc<RefCell<Record>>) {
        let record = Rc::new(RefCell::new(Record::default()));
        let player = Scripted {
            actions: actions.into(),
            record: Rc::clone(&record),
            name,
        };
        (Box::new(player), record)
    }

    struct CountingObserver(Rc<RefCell<Vec<BoardState>>>);

    impl BoardObserver for CountingObserver {
        fn board_changed(&mut self, board: &BoardState) {
            self.0.borrow_mut().push(board.clone());
        }
    }

    fn one_capture_left() -> BoardState {
        BoardState::from_layout(Side::One, ".... .... .... .... .r.. .b.. .... ....").unwrap()
    }

    #[test]
    fn test_illegal_move_is_rejected_and_retried() {
        let (p1, r1) = scripted("Alice", vec![mv("C6 B7"), mv("C6 D5")]);
        let (p2, r2) = scripted("Bob", vec![]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);

        assert_eq!(game.play_turn(), Ok(GameState::Continue));
        assert_eq!(r1.borrow().invalid, vec!["C6 B7".parse::<Move>().unwrap()]);
        assert_eq!(r1.borrow().asked, 2);
        assert_eq!(r2.borrow().opponent, vec!["C6 D5".parse::<Move>().unwrap()]);
        assert_eq!(game.board().active_player(), Side::Two);
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn test_each_side_is_asked_on_its_own_turn() {
        let (p1, r1) = scripted("Alice", vec![mv("C6 D5")]);
        let (p2, r2) = scripted("Bob", vec![mv("C6 B5"), mv("B3 A4")]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);

        game.play_turn().unwrap();
        game.play_turn().unwrap();

        assert_eq!(r1.borrow().asked, 1);
        assert_eq!(r2.borrow().asked, 2);
        assert_eq!(r2.borrow().invalid, vec!["C6 B5".parse::<Move>().unwrap()]);
        assert_eq!(r1.borrow().opponent, vec!["B3 A4".parse::<Move>().unwrap()]);
        assert_eq!(game.board().active_player(), Side::One);
    }

    #[test]
    fn test_capturing_the_last_piece_wins() {
        let (p1, r1) = scripted("Alice", vec![mv("C6 E4")]);
        let (p2, r2) = scripted("Bob", vec![]);
        let mut game = Orchestrator::with_board(one_capture_left(), p1, p2, RuleVariant::Normal);

        assert_eq!(game.play(), Ok(GameState::Player1Win));
        assert_eq!(r1.borrow().ended, vec![GameState::Player1Win]);
        assert_eq!(r2.borrow().ended, vec![GameState::Player1Win]);
    }

    #[test]
    fn test_suicide_variant_rewards_the_stuck_side() {
        let (p1, _) = scripted("Alice", vec![mv("C6 E4")]);
        let (p2, _) = scripted("Bob", vec![]);
        let mut game = Orchestrator::with_board(one_capture_left(), p1, p2, RuleVariant::Suicide);

        assert_eq!(game.play(), Ok(GameState::Player2Win));
    }

    #[test]
    fn test_finished_game_is_absorbing() {
        let (p1, r1) = scripted("Alice", vec![mv("C6 E4")]);
        let (p2, r2) = scripted("Bob", vec![]);
        let mut game = Orchestrator::with_board(one_capture_left(), p1, p2, RuleVariant::Normal);
        game.play_turn().unwrap();

        assert_eq!(game.play_turn(), Ok(GameState::Player1Win));
        assert_eq!(game.play_turn(), Ok(GameState::Player1Win));
        assert_eq!(r1.borrow().asked, 1);
        assert_eq!(r2.borrow().asked, 0);
        assert_eq!(r1.borrow().ended.len(), 1, "players are told once");
    }

    #[test]
    fn test_stuck_start_position_is_already_over() {
        let stuck = BoardState::from_layout(Side::Two, "ooRo ooBb obob rooo booo oboo Booo Rooo").unwrap();
        let (p1, _) = scripted("Alice", vec![]);
        let (p2, r2) = scripted("Bob", vec![]);
        let mut game = Orchestrator::with_board(stuck, p1, p2, RuleVariant::Normal);

        assert_eq!(game.state(), GameState::Player1Win);
        assert_eq!(game.play(), Ok(GameState::Player1Win));
        assert_eq!(r2.borrow().asked, 0);
    }

    #[test]
    fn test_undo_restores_the_players_last_turn() {
        let (p1, _) = scripted("Alice", vec![mv("C6 D5"), PlayerAction::Undo, mv("A6 B5")]);
        let (p2, _) = scripted("Bob", vec![mv("B3 C4")]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);

        game.play_turn().unwrap();
        game.play_turn().unwrap();
        assert_eq!(game.moves_played(), 2);

        game.play_turn().unwrap();
        assert_eq!(*game.board(), BoardState::starting());
        assert_eq!(game.moves_played(), 0);

        game.play_turn().unwrap();
        assert_eq!(game.board().piece_at("B5".parse().unwrap()), crate::game_repr::Piece::P1Man);
    }

    #[test]
    fn test_undo_with_no_history_asks_again() {
        let (p1, r1) = scripted("Alice", vec![PlayerAction::Undo, mv("C6 D5")]);
        let (p2, _) = scripted("Bob", vec![]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);

        assert!(!game.undo());
        game.play_turn().unwrap();
        assert_eq!(r1.borrow().asked, 2);
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn test_quit_aborts() {
        let (p1, _) = scripted("Alice", vec![PlayerAction::Quit]);
        let (p2, _) = scripted("Bob", vec![]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);

        assert_eq!(game.play(), Err(OrchestratorError::Aborted("Alice".to_string())));
        assert_eq!(game.state(), GameState::Continue);
    }

    #[test]
    fn test_observers_see_every_position() {
        let (p1, _) = scripted("Alice", vec![mv("C6 D5"), PlayerAction::Undo]);
        let (p2, _) = scripted("Bob", vec![mv("B3 C4")]);
        let mut game = Orchestrator::new(p1, p2, RuleVariant::Normal);
        let seen = Rc::new(RefCell::new(Vec::new()));
        game.add_observer(Box::new(CountingObserver(Rc::clone(&seen))));

        for _ in 0..3 {
            game.play_turn().unwrap();
        }

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4, "initial, two moves and the undo");
        assert_eq!(seen[0], BoardState::starting());
        assert_eq!(seen[3], BoardState::starting());
    }

    #[test]
    fn test_console_renderer_prints_board() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.board_changed(&BoardState::starting());
        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.contains("Player 1 to move"));
    }
}
