//! Detection of four in a row.
//!
//! The board is scanned in windows of [`SERIES_LEN`] consecutive cells along
//! four directions. The same windows feed the heuristic in [`crate::eval`].

use crate::game::{Cell, Gameboard, Piece, SERIES_LEN};

/// Scan direction of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `-`
    Horizontal,
    /// `|`
    Vertical,
    /// `/`, bottom-left to top-right.
    Rising,
    /// `\`, top-left to bottom-right.
    Falling,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Rising,
        Self::Falling,
    ];

    /// Row and column offset between two neighbouring cells of a window.
    const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::Rising => (1, 1),
            Self::Falling => (-1, 1),
        }
    }

    /// Emits `(row, col)` of every cell a window in this direction can start
    /// at without leaving a `W`x`H` board.
    pub fn window_starts<const W: usize, const H: usize>(
        self,
    ) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = match self {
            Self::Horizontal => (0..H, 0..W + 1 - SERIES_LEN),
            Self::Vertical => (0..H + 1 - SERIES_LEN, 0..W),
            Self::Rising => (0..H + 1 - SERIES_LEN, 0..W + 1 - SERIES_LEN),
            // falling windows go down from their start, so they start high enough
            Self::Falling => (SERIES_LEN - 1..H, 0..W + 1 - SERIES_LEN),
        };
        rows.flat_map(move |row| cols.clone().map(move |col| (row, col)))
    }
}

/// [`SERIES_LEN`] consecutive cells read along one [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window([Cell; SERIES_LEN]);

impl Window {
    #[must_use]
    pub const fn cells(&self) -> &[Cell; SERIES_LEN] {
        &self.0
    }

    /// Number of cells holding `piece`.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.0.iter().filter(|&&cell| cell == Some(piece)).count()
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_none()).count()
    }

    /// Whether all cells hold `piece`.
    #[must_use]
    pub fn is_series_of(&self, piece: Piece) -> bool {
        self.0.iter().all(|&cell| cell == Some(piece))
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    /// Reads the window beginning at `start`.
    ///
    /// # Panics
    /// If the window does not fit on the board. Use
    /// [`Direction::window_starts`] to get valid starts.
    #[must_use]
    pub fn window(&self, start: (usize, usize), direction: Direction) -> Window {
        let (row, col) = start;
        let (row_step, col_step) = direction.step();
        Window(core::array::from_fn(|i| {
            let row = row as isize + row_step * i as isize;
            let col = col as isize + col_step * i as isize;
            self.cell(row as usize, col as usize)
        }))
    }

    /// Emits every window of the board, in all four directions.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        Direction::ALL.into_iter().flat_map(move |direction| {
            direction
                .window_starts::<W, H>()
                .map(move |start| self.window(start, direction))
        })
    }
}

fn has_series_in_direction<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    direction: Direction,
) -> bool {
    direction
        .window_starts::<W, H>()
        .any(|start| board.window(start, direction).is_series_of(piece))
}

/// Checks whether `piece` has four in a row anywhere on the board.
#[must_use]
pub fn has_four_in_a_row<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
) -> bool {
    Direction::ALL
        .into_iter()
        .any(|direction| has_series_in_direction(board, piece, direction))
}

/// Returns the player owning a four in a row, if any.
///
/// Boards reached through legal play never have two winners; should both
/// have one, player A is reported.
#[must_use]
pub fn winner<const W: usize, const H: usize>(board: &Gameboard<W, H>) -> Option<Piece> {
    Piece::ALL
        .into_iter()
        .find(|&piece| has_four_in_a_row(board, piece))
}
