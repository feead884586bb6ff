use super::square::Direction;

/// One of the two players. Player 1 starts at the bottom (rows 5-7) and
/// moves first; player 2 starts at the top (rows 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Row on which this side's men are crowned.
    pub fn promotion_row(&self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 7,
        }
    }

    /// Directions a man of this side may move in.
    pub fn forward(&self) -> &'static [Direction] {
        match self {
            Self::One => &Direction::UP,
            Self::Two => &Direction::DOWN,
        }
    }

    /// 1 or 2, as shown to users.
    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn man(&self) -> Piece {
        match self {
            Self::One => Piece::P1Man,
            Self::Two => Piece::P2Man,
        }
    }

    pub fn king(&self) -> Piece {
        match self {
            Self::One => Piece::P1King,
            Self::Two => Piece::P2King,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    P1Man,
    P1King,
    P2Man,
    P2King,
}

impl Piece {
    pub fn is_empty(&self) -> bool {
        *self == Piece::Empty
    }

    pub fn owner(&self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::P1Man | Piece::P1King => Some(Side::One),
            Piece::P2Man | Piece::P2King => Some(Side::Two),
        }
    }

    pub fn is(&self, side: Side) -> bool {
        self.owner() == Some(side)
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Piece::P1King | Piece::P2King)
    }

    /// The crowned version of this piece; kings and empty squares are unchanged.
    pub fn promoted(&self) -> Piece {
        match self {
            Piece::P1Man => Piece::P1King,
            Piece::P2Man => Piece::P2King,
            other => *other,
        }
    }

    /// Directions this piece may move or jump in.
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            Piece::Empty => &[],
            Piece::P1King | Piece::P2King => &Direction::ALL,
            Piece::P1Man => Side::One.forward(),
            Piece::P2Man => Side::Two.forward(),
        }
    }

    /// 3-bit code used by the canonical board key.
    pub(crate) fn code(&self) -> u8 {
        match self {
            Piece::Empty => 0,
            Piece::P1Man => 1,
            Piece::P1King => 2,
            Piece::P2Man => 3,
            Piece::P2King => 4,
        }
    }

    /// Layout character: `b`/`B` for player 1, `r`/`R` for player 2.
    pub fn to_char(&self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::P1Man => 'b',
            Piece::P1King => 'B',
            Piece::P2Man => 'r',
            Piece::P2King => 'R',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | 'o' | '_' => Some(Piece::Empty),
            'b' => Some(Piece::P1Man),
            'B' => Some(Piece::P1King),
            'r' => Some(Piece::P2Man),
            'R' => Some(Piece::P2King),
            _ => None,
        }
    }
}
