// Move generation
//
// Captures are compulsory: when any piece of the side to move can jump, only
// complete capture chains are legal. A chain keeps jumping from its landing
// square until no further jump exists, and only the full chain is returned.
// Men move and jump toward the opponent's back rank; kings go both ways.
// A man reaching the back rank in the middle of a chain is not crowned until
// the chain ends, so it cannot continue backwards.

use super::*;

impl BoardState {
    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let jumps = self.jump_moves();
        if !jumps.is_empty() {
            return jumps;
        }
        self.step_moves()
    }

    /// Every maximal capture chain available to the side to move.
    pub fn jump_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for sq in self.squares_of(self.active_player()) {
            moves.extend(self.multi_jumps(sq));
        }
        moves
    }

    /// Maximal capture chains for the piece on `from`.
    ///
    /// Each single jump is played on a scratch board (turn not ended, no
    /// crowning) and the search recurses from the landing square. A jump with
    /// no continuation is returned on its own.
    pub fn multi_jumps(&self, from: Square) -> MoveList {
        let mut chains = MoveList::new();

        for first in self.single_jumps(from) {
            let scratch = self.apply_move(&first, false);
            let mut continuations = scratch.multi_jumps(first.destination());

            if continuations.is_empty() {
                chains.push(first);
                continue;
            }
            if let Err(err) = first.prepend_to_all(&mut continuations) {
                panic!("capture chain built from non-adjacent jumps: {err}");
            }
            chains.extend(continuations);
        }

        chains
    }

    /// One-jump captures for the piece on `from` (at most four).
    pub fn single_jumps(&self, from: Square) -> MoveList {
        let piece = self.piece_at(from);
        let mut jumps = MoveList::new();
        let Some(owner) = piece.owner() else {
            return jumps;
        };

        for &dir in piece.directions() {
            if let Some((over, land)) = from.jump(dir) {
                if self.piece_at(over).is(owner.opponent()) && self.piece_at(land).is_empty() {
                    jumps.push(Move::new(from, land));
                }
            }
        }

        jumps
    }

    /// Non-capturing diagonal steps for every piece of the side to move.
    /// Does not apply the forced-capture rule; see [`BoardState::legal_moves`].
    pub fn step_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        for from in self.squares_of(self.active_player()) {
            for &dir in self.piece_at(from).directions() {
                if let Some(to) = from.neighbour(dir) {
                    if self.piece_at(to).is_empty() {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }

        moves
    }

    /// `true` if the side to move has any capture.
    pub fn has_capture(&self) -> bool {
        self.squares_of(self.active_player())
            .any(|sq| !self.single_jumps(sq).is_empty())
    }

    /// `true` if the side to move has at least one legal move. Cheaper than
    /// `!legal_moves().is_empty()` because chains are never expanded.
    pub fn has_legal_move(&self) -> bool {
        let side = self.active_player();
        self.squares_of(side).any(|from| {
            let piece = self.piece_at(from);
            piece.directions().iter().any(|&dir| {
                let step = from
                    .neighbour(dir)
                    .is_some_and(|to| self.piece_at(to).is_empty());
                let jump = from.jump(dir).is_some_and(|(over, land)| {
                    self.piece_at(over).is(side.opponent()) && self.piece_at(land).is_empty()
                });
                step || jump
            })
        })
    }

    /// `true` if `mv` is one of the legal moves in this position.
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }
}
