use std::fmt;

use thiserror::Error;

use super::*;

/*
 * MODULE IS RESPONSIBLE FOR
 * BOARD REPRESENTATION AND MOVE APPLICATION
 */

/// Rows of men each side starts with.
pub const STARTING_RANKS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected 8 rows of 4 squares, found {0} rows")]
    RowCount(usize),
    #[error("row {row} has {len} squares, expected 4")]
    RowLength { row: usize, len: usize },
    #[error("unknown piece character {0:?}")]
    UnknownPiece(char),
}

/// Canonical identity of a position: every square's piece (3 bits each)
/// plus the side to move, packed losslessly into 97 bits.
///
/// Search depth is deliberately not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(u128);

impl BoardKey {
    pub fn raw(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:025x}", self.0)
    }
}

/// One position: the contents of the 32 playable squares and the side to move.
///
/// Treated as an immutable value by the search; [`BoardState::apply_move`]
/// returns a fresh board.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    squares: [Piece; NUM_SQUARES],
    active: Side,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::starting()
    }
}

impl BoardState {
    /// A board with no pieces.
    pub fn empty(active: Side) -> Self {
        Self {
            squares: [Piece::Empty; NUM_SQUARES],
            active,
        }
    }

    /// Standard opening position, player 1 to move.
    pub fn starting() -> Self {
        let mut board = Self::empty(Side::One);
        for sq in Square::all() {
            if sq.row() < STARTING_RANKS {
                board.squares[sq.index()] = Piece::P2Man;
            } else if sq.row() >= BOARD_SIZE - STARTING_RANKS {
                board.squares[sq.index()] = Piece::P1Man;
            }
        }
        board
    }

    /// Parses a compact layout: eight whitespace-separated rows (row 0 first),
    /// four playable squares each, using `.` for empty, `b`/`B` for player 1
    /// men/kings and `r`/`R` for player 2.
    ///
    /// ```
    /// use checkers_engine::game_repr::{BoardState, Side};
    ///
    /// let board = BoardState::from_layout(Side::One,
    ///     "rrrr rrrr rrrr .... .... bbbb bbbb bbbb").unwrap();
    /// assert_eq!(board, BoardState::starting());
    /// ```
    pub fn from_layout(active: Side, layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout.split_whitespace().collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut board = Self::empty(active);
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != 4 {
                return Err(LayoutError::RowLength { row, len });
            }
            for (col, c) in text.chars().enumerate() {
                let piece = Piece::from_char(c).ok_or(LayoutError::UnknownPiece(c))?;
                board.squares[row * 4 + col] = piece;
            }
        }

        Ok(board)
    }

    /// Inverse of [`BoardState::from_layout`].
    pub fn to_layout(&self) -> String {
        self.squares
            .chunks(4)
            .map(|row| row.iter().map(Piece::to_char).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub fn active_player(&self) -> Side {
        self.active
    }

    pub fn set_active_player(&mut self, side: Side) {
        self.active = side;
    }

    /// Squares holding a piece of `side`.
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.piece_at(sq).is(side))
    }

    pub fn count(&self, side: Side) -> usize {
        self.squares_of(side).count()
    }

    pub fn canonical_hash(&self) -> BoardKey {
        let mut key = 0u128;
        for (i, piece) in self.squares.iter().enumerate() {
            key |= (piece.code() as u128) << (3 * i);
        }
        if self.active == Side::Two {
            key |= 1u128 << (3 * NUM_SQUARES);
        }
        BoardKey(key)
    }

    /// Returns the board after `mv`. See [`BoardState::apply_move_in_place`].
    pub fn apply_move(&self, mv: &Move, ends_turn: bool) -> BoardState {
        let mut next = self.clone();
        next.apply_move_in_place(mv, ends_turn);
        next
    }

    /// Moves the piece on the origin square along the path, removing every
    /// jumped piece. When `ends_turn` is set, a man finishing on its
    /// promotion row is crowned and the side to move flips; without it the
    /// board is a scratch position used to probe chain continuations.
    ///
    /// # Panics
    /// Panics if a hop is neither a step nor a jump. Generated moves never
    /// contain such hops.
    pub fn apply_move_in_place(&mut self, mv: &Move, ends_turn: bool) {
        let mut piece = self.piece_at(mv.origin());
        debug_assert!(!piece.is_empty(), "no piece on {} for move {mv}", mv.origin());

        self.set_piece(mv.origin(), Piece::Empty);
        for (from, to) in mv.hops() {
            if let Some(jumped) = from.jumped_square(to) {
                self.set_piece(jumped, Piece::Empty);
            } else if !from.is_adjacent(to) {
                panic!("malformed move {mv}: {from} -> {to} is neither a step nor a jump");
            }
        }

        let dest = mv.destination();
        if ends_turn {
            if let Some(owner) = piece.owner() {
                if dest.row() == owner.promotion_row() {
                    piece = piece.promoted();
                }
            }
        }
        self.set_piece(dest, piece);

        if ends_turn {
            self.active = self.active.opponent();
        }
    }

    /// Number of leaf positions reachable in exactly `depth` plies.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|mv| self.apply_move(mv, true).perft(depth - 1))
            .sum()
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("layout", &self.to_layout())
            .field("active", &self.active)
            .finish()
    }
}

/// Console rendering: rank labels on the left, file letters below.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{:>2} ", row + 1)?;
            for file in 0..BOARD_SIZE {
                let c = match Square::new(row, file) {
                    Some(sq) => self.piece_at(sq).to_char(),
                    None => ' ',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 0..BOARD_SIZE {
            write!(f, " {}", file_to_letters(file as usize))?;
        }
        writeln!(f)?;
        write!(f, "Player {} to move", self.active.number())
    }
}
