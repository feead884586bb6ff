//! Text notation for squares and moves.
//!
//! A square is written `<file><rank>`: the file as bijective base-26 letters
//! (`A`..`Z`, then `AA`, `AB`, ...; case-insensitive) and the rank as a
//! 1-based number counted from the player-2 back rank (row 0 is rank 1).
//! A move is its origin followed by one or more destinations separated by
//! whitespace, e.g. `B6 A5` or `A6 C4 E2` for a double jump.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("a move needs an origin and at least one destination square")]
    MissingDestination,
    #[error("'{0}' is not a square; expected a file letter followed by a rank number, e.g. B6")]
    BadToken(String),
    #[error("'{0}' is off the board")]
    OffBoard(String),
    #[error("'{0}' is a light square; pieces only stand on dark squares")]
    LightSquare(String),
    #[error("invalid move: {0}")]
    InvalidChain(#[from] MoveError),
}

/// Converts a 0-based file index to letters: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn file_to_letters(file: usize) -> String {
    let mut n = file + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`file_to_letters`]; `None` if `text` is not all ASCII letters
/// or overflows.
pub fn letters_to_file(text: &str) -> Option<usize> {
    if text.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for c in text.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value - 1)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_to_letters(self.file() as usize), self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bad = || ParseMoveError::BadToken(token.to_string());

        let split = token
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(bad)?;
        let (letters, digits) = token.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }

        let file = letters_to_file(letters).ok_or_else(bad)?;
        let rank: usize = digits.parse().map_err(|_| bad())?;
        if rank == 0 || rank > BOARD_SIZE as usize || file >= BOARD_SIZE as usize {
            return Err(ParseMoveError::OffBoard(token.to_string()));
        }

        Square::new((rank - 1) as u8, file as u8)
            .ok_or_else(|| ParseMoveError::LightSquare(token.to_string()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin())?;
        for sq in self.destinations() {
            write!(f, " {sq}")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let squares = text
            .split_whitespace()
            .map(str::parse::<Square>)
            .collect::<Result<Vec<_>, _>>()?;

        match squares.split_first() {
            None => Err(ParseMoveError::Empty),
            Some((_, [])) => Err(ParseMoveError::MissingDestination),
            Some((&origin, path)) => Ok(Move::with_path(origin, path)?),
        }
    }
}
