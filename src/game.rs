//! Game logic and game board.

use core::fmt;

use thiserror::Error;

use crate::win::has_four_in_a_row;

/// Number of coins in a row to win the game.
pub const SERIES_LEN: usize = 4;

/// Number of columns of the classic board.
pub const DEFAULT_WIDTH: usize = 7;

/// Number of rows of the classic board.
pub const DEFAULT_HEIGHT: usize = 6;

#[derive(Debug, Error, PartialOrd, PartialEq, Clone, Copy, Eq)]
pub enum BoardError {
    #[error("column {column} is out of range, the board has {width} columns")]
    InvalidColumn { column: usize, width: usize },
    /// Column is full.
    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

#[derive(Debug, Error, PartialEq, Clone, Copy, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The board is full, nobody can move anymore.
    #[error("no legal move left")]
    NoLegalMove,
    #[error("the game is already over")]
    GameOver,
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Piece),
}

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug)]
pub enum Piece {
    PlayerA,
    PlayerB,
}

impl Piece {
    pub const ALL: [Self; 2] = [Self::PlayerA, Self::PlayerB];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::PlayerA => Self::PlayerB,
            Self::PlayerB => Self::PlayerA,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::PlayerA => 'X',
            Self::PlayerB => 'O',
        }
    }
}

/// A single slot of the board. `None` is an empty slot.
pub type Cell = Option<Piece>;

/// Outcome of the game after the latest placement.
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq)]
pub enum GameState {
    /// Game continues.
    Ongoing,
    /// Player won with the latest insertion.
    Won(Piece),
    /// The game field is full without a winner.
    Draw,
}

/// Game with all its state: the live board and whose turn it is.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Game<const W: usize = { DEFAULT_WIDTH }, const H: usize = { DEFAULT_HEIGHT }> {
    board: Gameboard<W, H>,
    first: Piece,
    current: Piece,
    round: usize,
    state: GameState,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub const fn new(first: Piece) -> Self {
        Self {
            board: Gameboard::new(),
            first,
            current: first,
            round: 0,
            state: GameState::Ongoing,
        }
    }

    /// Drops the piece of the player to move into `column_index` and hands the
    /// turn to the opponent.
    pub fn play(&mut self, column_index: usize) -> Result<GameState, GameError> {
        if self.state != GameState::Ongoing {
            return Err(GameError::GameOver);
        }

        self.board.insert_piece(column_index, self.current)?;
        self.round += 1;

        self.state = if has_four_in_a_row(&self.board, self.current) {
            GameState::Won(self.current)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Ongoing
        };
        self.current = self.current.opponent();

        Ok(self.state)
    }

    /// Starts a new round with an empty board. The same player begins again.
    pub const fn reset(&mut self) {
        *self = Self::new(self.first);
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    #[must_use]
    pub const fn current(&self) -> Piece {
        self.current
    }

    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != GameState::Ongoing
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new(Piece::PlayerA)
    }
}

/// Gameboard.
#[derive(Debug, PartialOrd, PartialEq, Clone, Eq)]
pub struct Gameboard<const W: usize = { DEFAULT_WIDTH }, const H: usize = { DEFAULT_HEIGHT }>(
    /*
     * Board: rows --> col --> field
     * Technical indices correspond to the logical indices:
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Cell; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        Self([[None; W]; H])
    }

    #[must_use]
    pub const fn board(&self) -> &[[Cell; W]; H] {
        &self.0
    }

    #[must_use]
    pub const fn cell(&self, row: usize, column: usize) -> Cell {
        self.0[row][column]
    }

    const fn check_column(column: usize) -> Result<(), BoardError> {
        if column >= W {
            return Err(BoardError::InvalidColumn { column, width: W });
        }
        Ok(())
    }

    /// Returns the index to the next free slot in the selected column.
    ///
    /// Returns `None` if there are no more free slots.
    fn next_slot_in_column(&self, column_index: usize) -> Option<usize> {
        (0..H).find(|&row_index| self.0[row_index][column_index].is_none())
    }

    /// Returns whether another piece fits into the column.
    pub fn is_column_open(&self, column: usize) -> Result<bool, BoardError> {
        Self::check_column(column)?;
        Ok(self.0[H - 1][column].is_none())
    }

    /// Returns the row a piece dropped into `column` lands in.
    ///
    /// # Panics
    /// If the column is full. Check [`Self::is_column_open`] first.
    #[must_use]
    pub fn lowest_empty_row(&self, column: usize) -> usize {
        self.next_slot_in_column(column)
            .unwrap_or_else(|| panic!("column {column} has no empty row"))
    }

    /// Writes `piece` into the given slot without any legality check.
    pub const fn place(&mut self, row: usize, column: usize, piece: Piece) {
        self.0[row][column] = Some(piece);
    }

    /// Drops `piece` into `column` and returns the row it landed in.
    pub fn insert_piece(&mut self, column: usize, piece: Piece) -> Result<usize, BoardError> {
        Self::check_column(column)?;

        let row = self
            .next_slot_in_column(column)
            .ok_or(BoardError::ColumnFull { column })?;
        self.place(row, column, piece);
        Ok(row)
    }

    /// Emits the column indices where moves are legal, in ascending order.
    pub fn open_columns_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..W).filter(|&col| self.0[H - 1][col].is_none())
    }

    /// Returns the number of free slots in the given column.
    #[must_use]
    pub fn free_slots_in_column(&self, column: usize) -> usize {
        self.next_slot_in_column(column).map_or(0, |row| H - row)
    }

    /// Returns whether there are no legal moves left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.open_columns_iter().next().is_none()
    }

    /// Returns the board reflected left to right.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut board = self.clone();
        for row in &mut board.0 {
            row.reverse();
        }
        board
    }

    /// Returns the board with the pieces of both players exchanged.
    #[must_use]
    pub fn with_swapped_pieces(&self) -> Self {
        let mut board = self.clone();
        for cell in board.0.iter_mut().flatten() {
            *cell = cell.map(Piece::opponent);
        }
        board
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

impl<const W: usize, const H: usize> fmt::Display for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print rows reverted so that it appears naturally.
        for row in self.0.iter().rev() {
            for cell in row {
                write!(f, "{},", cell.map_or(' ', Piece::symbol))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_column(board: &mut Gameboard, col: usize) {
        for _ in 0..board.height() {
            let _ = board.insert_piece(col, Piece::PlayerA);
        }
    }

    #[test]
    fn test_lowest_empty_row() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.lowest_empty_row(0), 0);

        for i in 0..board.height() - 1 {
            board.place(i, 0, Piece::PlayerA);
            assert_eq!(board.lowest_empty_row(0), i + 1);
        }

        board.place(board.height() - 1, 0, Piece::PlayerA);
        assert_eq!(board.is_column_open(0), Ok(false));
    }

    #[test]
    #[should_panic(expected = "column 2 has no empty row")]
    fn test_lowest_empty_row_of_full_column() {
        let mut board = Gameboard::<7, 6>::new();
        fill_column(&mut board, 2);
        let _ = board.lowest_empty_row(2);
    }

    #[test]
    fn test_free_slots_in_column() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.free_slots_in_column(0), 6);

        for i in 0..board.height() {
            board.insert_piece(0, Piece::PlayerB).unwrap();
            assert_eq!(board.free_slots_in_column(0), 6 - i - 1);
        }

        assert_eq!(board.free_slots_in_column(0), 0);
    }

    #[test]
    fn test_column_errors() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(
            board.is_column_open(7),
            Err(BoardError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert_eq!(
            board.insert_piece(9, Piece::PlayerA),
            Err(BoardError::InvalidColumn {
                column: 9,
                width: 7
            })
        );

        fill_column(&mut board, 4);
        assert_eq!(
            board.insert_piece(4, Piece::PlayerA),
            Err(BoardError::ColumnFull { column: 4 })
        );
        assert_eq!(board.is_column_open(4), Ok(false));
        assert_eq!(board.is_column_open(3), Ok(true));
    }

    #[test]
    fn test_insert_piece_stacks() {
        let mut board = Gameboard::<7, 6>::new();
        assert_eq!(board.insert_piece(3, Piece::PlayerA), Ok(0));
        assert_eq!(board.insert_piece(3, Piece::PlayerB), Ok(1));
        assert_eq!(board.cell(0, 3), Some(Piece::PlayerA));
        assert_eq!(board.cell(1, 3), Some(Piece::PlayerB));
        assert_eq!(board.cell(2, 3), None);
    }

    #[test]
    fn test_open_columns_iter() {
        {
            let mut board = Gameboard::<7, 6>::new();

            assert_eq!(
                board.open_columns_iter().collect::<Vec<_>>().as_slice(),
                &[0, 1, 2, 3, 4, 5, 6]
            );

            fill_column(&mut board, 1);
            fill_column(&mut board, 3);
            fill_column(&mut board, 5);
            fill_column(&mut board, 6);
            assert_eq!(
                board.open_columns_iter().collect::<Vec<_>>().as_slice(),
                &[0, 2, 4]
            );
            assert!(!board.is_full());

            fill_column(&mut board, 0);
            fill_column(&mut board, 2);
            fill_column(&mut board, 4);
            assert_eq!(
                board.open_columns_iter().collect::<Vec<_>>().as_slice(),
                &[]
            );
            assert!(board.is_full());
        }
        {
            let mut board = Gameboard::<4, 4>::new();
            board.place(0, 0, Piece::PlayerB);
            board.place(0, 2, Piece::PlayerA);
            board.place(1, 0, Piece::PlayerB);
            board.place(1, 2, Piece::PlayerA);
            board.place(2, 2, Piece::PlayerA);
            board.place(3, 2, Piece::PlayerA);

            assert_eq!(
                board.open_columns_iter().collect::<Vec<_>>().as_slice(),
                &[0, 1, 3]
            );
        }
    }

    #[test]
    fn test_mirrored_and_swapped() {
        let mut board = Gameboard::<7, 6>::new();
        board.insert_piece(0, Piece::PlayerA).unwrap();
        board.insert_piece(0, Piece::PlayerB).unwrap();
        board.insert_piece(5, Piece::PlayerB).unwrap();

        let mirrored = board.mirrored();
        assert_eq!(mirrored.cell(0, 6), Some(Piece::PlayerA));
        assert_eq!(mirrored.cell(1, 6), Some(Piece::PlayerB));
        assert_eq!(mirrored.cell(0, 1), Some(Piece::PlayerB));
        assert_eq!(mirrored.mirrored(), board);

        let swapped = board.with_swapped_pieces();
        assert_eq!(swapped.cell(0, 0), Some(Piece::PlayerB));
        assert_eq!(swapped.cell(1, 0), Some(Piece::PlayerA));
        assert_eq!(swapped.cell(0, 5), Some(Piece::PlayerA));
        assert_eq!(swapped.cell(0, 1), None);
    }

    #[test]
    fn test_display() {
        let mut board = Gameboard::<4, 4>::new();
        board.insert_piece(0, Piece::PlayerA).unwrap();
        board.insert_piece(3, Piece::PlayerB).unwrap();
        assert_eq!(
            board.to_string(),
            " , , , ,\n , , , ,\n , , , ,\nX, , ,O,\n"
        );
    }

    #[test]
    fn test_game_alternates_turns() {
        let mut game = Game::<7, 6>::new(Piece::PlayerB);
        assert_eq!(game.current(), Piece::PlayerB);

        assert_eq!(game.play(3), Ok(GameState::Ongoing));
        assert_eq!(game.current(), Piece::PlayerA);
        assert_eq!(game.play(3), Ok(GameState::Ongoing));
        assert_eq!(game.board().cell(0, 3), Some(Piece::PlayerB));
        assert_eq!(game.board().cell(1, 3), Some(Piece::PlayerA));
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn test_game_rejects_invalid_moves_without_switching_turns() {
        let mut game = Game::<7, 6>::default();
        assert_eq!(
            game.play(7),
            Err(GameError::Board(BoardError::InvalidColumn {
                column: 7,
                width: 7
            }))
        );
        assert_eq!(game.current(), Piece::PlayerA);
        assert_eq!(game.round(), 0);
    }

    #[test]
    fn test_game_detects_win_and_stops() {
        let mut game = Game::<7, 6>::new(Piece::PlayerA);
        // A plays 0..=3 on the bottom row, B stacks on top of them.
        for col in 0..3 {
            assert_eq!(game.play(col), Ok(GameState::Ongoing));
            assert_eq!(game.play(col), Ok(GameState::Ongoing));
        }
        assert_eq!(game.play(3), Ok(GameState::Won(Piece::PlayerA)));
        assert!(game.is_over());
        assert_eq!(game.play(4), Err(GameError::GameOver));

        game.reset();
        assert_eq!(game.state(), GameState::Ongoing);
        assert_eq!(game.round(), 0);
        assert_eq!(game.current(), Piece::PlayerA);
        assert!(game.board().open_columns_iter().eq(0..7));
    }

    #[test]
    fn test_game_detects_draw() {
        let mut game = Game::<4, 4>::new(Piece::PlayerA);
        // Column order that fills a 4x4 board without four in a row.
        for col in [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 2] {
            assert_eq!(game.play(col), Ok(GameState::Ongoing));
        }
        assert_eq!(game.play(3), Ok(GameState::Draw));
        assert!(game.board().is_full());
    }
}
