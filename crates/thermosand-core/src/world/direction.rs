//! The eight neighbor directions of a cell

/// Direction from a cell to one of its neighbors
///
/// Row 0 is the bottom of the grid, so `Up` increases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    /// Enumeration order for every "all neighbors" iteration
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// Slot of this direction in per-cell neighbor arrays
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// (row, column) delta
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::UpRight => (1, 1),
            Direction::DownRight => (-1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::UpLeft => (1, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Right | Direction::Down | Direction::Left
        )
    }

    /// Diagonals that share this cardinal's axis letter ('u' -> 'ur', 'ul')
    ///
    /// Empty for diagonals.
    pub fn adjoining_diagonals(self) -> &'static [Direction] {
        match self {
            Direction::Up => &[Direction::UpRight, Direction::UpLeft],
            Direction::Right => &[Direction::UpRight, Direction::DownRight],
            Direction::Down => &[Direction::DownRight, Direction::DownLeft],
            Direction::Left => &[Direction::DownLeft, Direction::UpLeft],
            _ => &[],
        }
    }

    /// How strongly gravity favors moving this way
    /*
        -2 -4 -2
       0.2  C  0.2
         2  4  2
    */
    pub fn gravity_weight(self) -> f32 {
        match self {
            Direction::Down => 4.0,
            Direction::DownRight | Direction::DownLeft => 2.0,
            Direction::Right | Direction::Left => 0.2,
            Direction::UpRight | Direction::UpLeft => -2.0,
            Direction::Up => -4.0,
        }
    }

    /// Short label used in logs ("u", "dr", ...)
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "u",
            Direction::Right => "r",
            Direction::Down => "d",
            Direction::Left => "l",
            Direction::UpRight => "ur",
            Direction::DownRight => "dr",
            Direction::DownLeft => "dl",
            Direction::UpLeft => "ul",
        }
    }
}
