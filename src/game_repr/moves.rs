use smallvec::SmallVec;
use thiserror::Error;

use super::square::Square;

/*-------ARCHITECTURE--------*/

// | origin | dest 1 | dest 2 | ... |
// one destination   -> simple step or single jump
// many destinations -> capture chain, every hop is a jump

/// Destinations of a move; chains longer than four jumps spill to the heap.
pub type MovePath = SmallVec<[Square; 4]>;

/// List of moves returned by the generator.
pub type MoveList = SmallVec<[Move; 16]>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("a move needs at least one destination square")]
    EmptyPath,
    #[error("{from} -> {to} is neither a diagonal step nor a jump")]
    MalformedHop { from: Square, to: Square },
    #[error("chain does not connect: previous move ends on {expected}, next move starts on {found}")]
    NonContiguousChain { expected: Square, found: Square },
}

/// A move: an origin square and the ordered squares the piece lands on.
///
/// Equality is structural, so two chains over the same squares in the same
/// order are the same move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    origin: Square,
    path: MovePath,
}

impl Move {
    /// A single hop (step or jump). The hop is not validated; use
    /// [`Move::with_path`] for untrusted input.
    pub fn new(origin: Square, dest: Square) -> Move {
        let mut path = MovePath::new();
        path.push(dest);
        Self { origin, path }
    }

    /// Builds a move from a full destination list, checking that every hop is
    /// a one-square step or a two-square jump and that only single-hop moves
    /// may be steps.
    pub fn with_path(origin: Square, path: &[Square]) -> Result<Move, MoveError> {
        if path.is_empty() {
            return Err(MoveError::EmptyPath);
        }

        let mut from = origin;
        for &to in path {
            let is_jump = from.jumped_square(to).is_some();
            let is_step = path.len() == 1 && from.is_adjacent(to);
            if !is_jump && !is_step {
                return Err(MoveError::MalformedHop { from, to });
            }
            from = to;
        }

        Ok(Self {
            origin,
            path: path.iter().copied().collect(),
        })
    }

    #[inline]
    pub fn origin(&self) -> Square {
        self.origin
    }

    #[inline]
    pub fn destinations(&self) -> &[Square] {
        &self.path
    }

    /// Final landing square.
    #[inline]
    pub fn destination(&self) -> Square {
        // path is never empty
        self.path[self.path.len() - 1]
    }

    pub fn is_capture(&self) -> bool {
        self.origin.jumped_square(self.path[0]).is_some()
    }

    /// Number of hops in the move.
    pub fn hop_count(&self) -> usize {
        self.path.len()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn hops(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        std::iter::once(self.origin)
            .chain(self.path.iter().copied())
            .zip(self.path.iter().copied())
    }

    /// Squares whose pieces this move removes.
    pub fn captured_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.hops().filter_map(|(from, to)| from.jumped_square(to))
    }

    /// Attaches `earlier` in front of this move. `earlier` must end where this
    /// move starts.
    pub fn prepend(&mut self, earlier: &Move) -> Result<(), MoveError> {
        if earlier.destination() != self.origin {
            return Err(MoveError::NonContiguousChain {
                expected: earlier.destination(),
                found: self.origin,
            });
        }

        let mut path = earlier.path.clone();
        path.extend(self.path.iter().copied());
        self.path = path;
        self.origin = earlier.origin;
        Ok(())
    }

    /// Prepends `self` to every move in `continuations`.
    pub fn prepend_to_all(&self, continuations: &mut [Move]) -> Result<(), MoveError> {
        for mv in continuations {
            mv.prepend(self)?;
        }
        Ok(())
    }
}
