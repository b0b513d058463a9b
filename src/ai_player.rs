//! The computer player.

use log::debug;

use crate::game::{Game, GameError, GameState, Gameboard, Piece};
use crate::minmax::{INFINITY, Search, SearchResult, TieBreak};

/// Plies the computer looks ahead unless configured otherwise.
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead. Must be at least 1.
    pub depth: usize,
    pub tie_break: TieBreak,
    /// Search the root columns on the rayon thread pool.
    pub parallel: bool,
}

impl SearchConfig {
    #[must_use]
    pub const fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            tie_break: TieBreak::FirstLegal,
            parallel: false,
        }
    }
}

/// Returns the column `piece` should play on `board`, looking `depth` plies
/// ahead.
///
/// Returns `None` if there is nothing left to play: the board is full or
/// somebody already won.
///
/// # Panics
/// If `depth` is 0.
#[must_use]
pub fn choose_move<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    depth: usize,
    piece: Piece,
) -> Option<usize> {
    assert!(depth > 0, "search depth must be at least 1");
    Search::new(piece)
        .best_move(board, depth, -INFINITY, INFINITY, true)
        .column
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlayer {
    piece: Piece,
    config: SearchConfig,
}

impl AiPlayer {
    /// # Panics
    /// If the configured depth is 0.
    #[must_use]
    pub const fn new(piece: Piece, config: SearchConfig) -> Self {
        assert!(config.depth > 0, "search depth must be at least 1");
        Self { piece, config }
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches the best move on `board` for this player's piece.
    #[must_use]
    pub fn search<const W: usize, const H: usize>(&self, board: &Gameboard<W, H>) -> SearchResult {
        let mut search = Search::with_tie_break(self.piece, self.config.tie_break);
        let result = if self.config.parallel {
            search.best_move_parallel(board, self.config.depth)
        } else {
            search.best_move(board, self.config.depth, -INFINITY, INFINITY, true)
        };

        debug!(
            "{:?} at depth {}: column {:?} with score {} after {} positions",
            self.piece,
            self.config.depth,
            result.column,
            result.score,
            search.node_count()
        );
        result
    }

    /// Searches and plays the best move in `game`.
    ///
    /// Returns the chosen column and the state of the game afterwards.
    ///
    /// # Errors
    /// [`GameError::NoLegalMove`] if the board is full, [`GameError::GameOver`]
    /// if somebody already won, [`GameError::NotYourTurn`] if the other piece
    /// is to move.
    pub fn play<const W: usize, const H: usize>(
        &self,
        game: &mut Game<W, H>,
    ) -> Result<(usize, GameState), GameError> {
        if game.board().is_full() {
            return Err(GameError::NoLegalMove);
        }
        if game.is_over() {
            return Err(GameError::GameOver);
        }
        if game.current() != self.piece {
            return Err(GameError::NotYourTurn(self.piece));
        }

        let column = self
            .search(game.board())
            .column
            .ok_or(GameError::NoLegalMove)?;
        let state = game.play(column)?;
        Ok((column, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minmax::WIN_SCORE;

    #[test]
    fn choose_move_on_empty_board() {
        let board = Gameboard::<7, 6>::new();
        assert_eq!(choose_move(&board, 1, Piece::PlayerB), Some(3));
    }

    #[test]
    fn choose_move_on_full_board() {
        let mut board = Gameboard::<4, 4>::new();
        let mut piece = Piece::PlayerA;
        for col in [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 2, 3] {
            board.insert_piece(col, piece).unwrap();
            piece = piece.opponent();
        }
        assert!(board.is_full());
        assert_eq!(choose_move(&board, 3, Piece::PlayerA), None);
    }

    #[test]
    #[should_panic(expected = "search depth must be at least 1")]
    fn zero_depth_is_rejected() {
        let _ = choose_move(&Gameboard::<7, 6>::new(), 0, Piece::PlayerA);
    }

    #[test]
    fn ai_finishes_the_game() {
        let mut game = Game::<7, 6>::new(Piece::PlayerA);
        for col in [0, 6, 1, 6, 2] {
            game.play(col).unwrap();
        }
        // B must block column 3
        let ai_b = AiPlayer::new(Piece::PlayerB, SearchConfig::default().with_depth(2));
        assert_eq!(ai_b.play(&mut game), Ok((3, GameState::Ongoing)));

        let ai_a = AiPlayer::new(Piece::PlayerA, SearchConfig::default().with_depth(3));
        assert_eq!(
            ai_b.play(&mut game),
            Err(GameError::NotYourTurn(Piece::PlayerB))
        );
        let (_, state) = ai_a.play(&mut game).unwrap();
        assert_eq!(state, GameState::Ongoing);
    }

    #[test]
    fn ai_wins_when_it_can() {
        // B threatens columns 1 and 5, the lowest immediate win is taken
        let mut game = Game::<7, 6>::new(Piece::PlayerB);
        for col in [2, 2, 3, 3, 4, 4] {
            game.play(col).unwrap();
        }
        let ai = AiPlayer::new(
            Piece::PlayerB,
            SearchConfig::default().with_depth(4).with_parallel(true),
        );
        assert_eq!(ai.search(game.board()).score, WIN_SCORE + 3);
        let (column, state) = ai.play(&mut game).unwrap();
        assert_eq!(column, 1);
        assert_eq!(state, GameState::Won(Piece::PlayerB));
        assert_eq!(ai.play(&mut game), Err(GameError::GameOver));
    }

    #[test]
    fn full_board_has_no_legal_move() {
        let mut game = Game::<4, 4>::new(Piece::PlayerA);
        for col in [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 2, 3] {
            game.play(col).unwrap();
        }
        assert_eq!(game.state(), GameState::Draw);
        let ai = AiPlayer::new(game.current(), SearchConfig::default().with_depth(3));
        assert_eq!(ai.play(&mut game), Err(GameError::NoLegalMove));
    }

    #[test]
    fn config_builders() {
        let config = SearchConfig::default()
            .with_depth(7)
            .with_tie_break(TieBreak::Seeded(42))
            .with_parallel(true);
        assert_eq!(config.depth, 7);
        assert_eq!(config.tie_break, TieBreak::Seeded(42));
        assert!(config.parallel);
        assert_eq!(SearchConfig::default().depth, DEFAULT_SEARCH_DEPTH);
    }
}
