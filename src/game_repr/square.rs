use std::sync::LazyLock;

/*
 * PLAYABLE SQUARES OF AN 8x8 CHECKERBOARD
 *
 *  row 0 is the player-2 back rank, row 7 the player-1 back rank
 *  only dark cells (row + file odd) are addressable
 *
 *  | row 0 |  .  0  .  1  .  2  .  3  |
 *  | row 1 |  4  .  5  .  6  .  7  .  |
 *  |  ...  |           ...            |
 *  | row 7 | 28  . 29  . 30  . 31  .  |
 */

/// Number of rows (and files) on the board.
pub const BOARD_SIZE: u8 = 8;

/// Number of playable squares.
pub const NUM_SQUARES: usize = 32;

/// One of the 32 dark squares, stored as its index in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Square from canonical (row, file) coordinates.
    ///
    /// Returns `None` when the coordinates are off the board or name a light
    /// square, on which pieces can never rest.
    pub fn new(row: u8, file: u8) -> Option<Square> {
        if row >= BOARD_SIZE || file >= BOARD_SIZE || (row + file) % 2 == 0 {
            return None;
        }
        Some(Square(row * 4 + file / 2))
    }

    /// Square from its index in `0..32`.
    ///
    /// # Panics
    /// Panics on an index outside the playable range; such an index can only
    /// come from a bug in move generation.
    pub fn from_index(index: usize) -> Square {
        assert!(
            index < NUM_SQUARES,
            "square index {index} is outside the 32 playable squares"
        );
        Square(index as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 4
    }

    #[inline]
    pub fn file(self) -> u8 {
        let row = self.row();
        (self.0 % 4) * 2 + (1 - row % 2)
    }

    /// All playable squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }

    /// The square one diagonal step away in `dir`, if it exists.
    #[inline]
    pub fn neighbour(self, dir: Direction) -> Option<Square> {
        GEOMETRY.steps[self.index()][dir as usize]
    }

    /// The `(jumped, landing)` pair for a jump in `dir`, if both are on the board.
    #[inline]
    pub fn jump(self, dir: Direction) -> Option<(Square, Square)> {
        GEOMETRY.jumps[self.index()][dir as usize]
    }

    /// Midpoint of a two-square diagonal hop, or `None` if `self -> to` is
    /// not a jump.
    pub fn jumped_square(self, to: Square) -> Option<Square> {
        let (dr, df) = self.delta(to);
        if dr.abs() == 2 && df.abs() == 2 {
            Square::new(
                (self.row() as i8 + dr / 2) as u8,
                (self.file() as i8 + df / 2) as u8,
            )
        } else {
            None
        }
    }

    /// `true` if `to` is a single diagonal step away.
    pub fn is_adjacent(self, to: Square) -> bool {
        let (dr, df) = self.delta(to);
        dr.abs() == 1 && df.abs() == 1
    }

    fn delta(self, to: Square) -> (i8, i8) {
        (
            to.row() as i8 - self.row() as i8,
            to.file() as i8 - self.file() as i8,
        )
    }

    fn offset(self, drow: i8, dfile: i8) -> Option<Square> {
        let row = self.row() as i8 + drow;
        let file = self.file() as i8 + dfile;
        if row < 0 || file < 0 {
            return None;
        }
        Square::new(row as u8, file as u8)
    }
}

/// Diagonal directions. "Up" means toward row 0, the player-2 back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft = 0,
    UpRight = 1,
    DownLeft = 2,
    DownRight = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
    pub const UP: [Direction; 2] = [Direction::UpLeft, Direction::UpRight];
    pub const DOWN: [Direction; 2] = [Direction::DownLeft, Direction::DownRight];

    fn delta(self) -> (i8, i8) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

struct Geometry {
    steps: [[Option<Square>; 4]; NUM_SQUARES],
    jumps: [[Option<(Square, Square)>; 4]; NUM_SQUARES],
}

static GEOMETRY: LazyLock<Geometry> = LazyLock::new(|| {
    let mut steps = [[None; 4]; NUM_SQUARES];
    let mut jumps = [[None; 4]; NUM_SQUARES];

    for sq in Square::all() {
        for dir in Direction::ALL {
            let (dr, df) = dir.delta();
            let over = sq.offset(dr, df);
            steps[sq.index()][dir as usize] = over;
            if let (Some(over), Some(land)) = (over, sq.offset(dr * 2, df * 2)) {
                jumps[sq.index()][dir as usize] = Some((over, land));
            }
        }
    }

    Geometry { steps, jumps }
});
