//! Depth-limited minimax search with alpha-beta pruning.

use log::trace;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use crate::eval::{self, Score};
use crate::game::{Gameboard, Piece};
use crate::win::has_four_in_a_row;

/// Score of a position the searching player has won.
///
/// The plies left to search are added on top, so earlier wins score higher.
pub const WIN_SCORE: Score = 100_000_000_000_000;

/// Score of a position the opponent of the searching player has won.
///
/// The plies left to search are subtracted, so later losses score higher.
pub const LOSS_SCORE: Score = -WIN_SCORE;

/// Bound of the initial alpha-beta window, `-INFINITY..INFINITY`.
pub const INFINITY: Score = Score::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The column to play. `None` for leaves, and at the root for positions
    /// without any legal move.
    pub column: Option<usize>,
    pub score: Score,
}

impl SearchResult {
    const fn leaf(score: Score) -> Self {
        Self {
            column: None,
            score,
        }
    }
}

/// How a node picks its column before any child has been scored.
///
/// Only relevant if no child beats the initial bound, so it never decides
/// between moves with real scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The lowest open column.
    #[default]
    FirstLegal,
    /// A random open column from a generator seeded with the value.
    Seeded(u64),
}

/// Minimax searcher playing for one piece.
///
/// The piece given to [`Search::new`] is the maximizing side, its opponent
/// the minimizing one.
#[derive(Debug, Clone)]
pub struct Search {
    piece: Piece,
    rng: Option<StdRng>,
    /// Number of positions visited so far (for diagnostics only).
    node_count: usize,
}

impl Search {
    #[must_use]
    pub fn new(piece: Piece) -> Self {
        Self::with_tie_break(piece, TieBreak::FirstLegal)
    }

    #[must_use]
    pub fn with_tie_break(piece: Piece, tie_break: TieBreak) -> Self {
        let rng = match tie_break {
            TieBreak::FirstLegal => None,
            TieBreak::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };
        Self {
            piece,
            rng,
            node_count: 0,
        }
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    fn fallback_column<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
    ) -> Option<usize> {
        self.rng.as_mut().map_or_else(
            || board.open_columns_iter().next(),
            |rng| {
                board
                    .open_columns_iter()
                    .collect::<Vec<_>>()
                    .choose(rng)
                    .copied()
            },
        )
    }

    /// Searches `depth` plies ahead and returns the best column for the side
    /// to move together with its score.
    ///
    /// `maximizing` tells whether the side to move is the searcher's piece.
    /// The board itself is never modified, every explored move is played on a
    /// clone.
    pub fn best_move<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        self.node_count += 1;

        // We start with the recursion tail: Can we stop the recursion?
        let remaining = depth as Score;
        if has_four_in_a_row(board, self.piece) {
            // faster win is better
            return SearchResult::leaf(WIN_SCORE + remaining);
        }
        if has_four_in_a_row(board, self.piece.opponent()) {
            // later loss is "less bad"
            return SearchResult::leaf(LOSS_SCORE - remaining);
        }
        if board.is_full() {
            // draw
            return SearchResult::leaf(0);
        }
        if depth == 0 {
            return SearchResult::leaf(eval::score(board, self.piece));
        }

        self.minmax_step(board, depth, alpha, beta, maximizing)
    }

    /// Plays every open column on a clone of the board and recurses.
    fn minmax_step<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        let (piece, mut best_score) = if maximizing {
            (self.piece, -INFINITY)
        } else {
            (self.piece.opponent(), INFINITY)
        };
        let mut best_col = self.fallback_column(board);

        for col in board.open_columns_iter() {
            let mut board_clone = board.clone();
            let row = board_clone.lowest_empty_row(col);
            board_clone.place(row, col, piece);

            // skip col here, we take the col from this level
            let SearchResult { score, .. } =
                self.best_move(&board_clone, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_col = Some(col);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_col = Some(col);
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                break;
            }
        }

        SearchResult {
            column: best_col,
            score: best_score,
        }
    }

    /// Like a root call of [`Self::best_move`] with a full window, but every
    /// root column is searched on its own rayon task.
    ///
    /// Returns the same column and score as the sequential search.
    pub fn best_move_parallel<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
    ) -> SearchResult {
        let columns = board.open_columns_iter().collect::<Vec<_>>();
        if depth == 0
            || columns.is_empty()
            || has_four_in_a_row(board, self.piece)
            || has_four_in_a_row(board, self.piece.opponent())
        {
            return self.best_move(board, depth, -INFINITY, INFINITY, true);
        }

        let root = &*self;
        let scored = columns
            .into_par_iter()
            .map(|col| {
                let mut search = root.clone();
                search.node_count = 0;

                let mut board_clone = board.clone();
                let row = board_clone.lowest_empty_row(col);
                board_clone.place(row, col, search.piece);

                let SearchResult { score, .. } =
                    search.best_move(&board_clone, depth - 1, -INFINITY, INFINITY, false);
                trace!(
                    "column {col}: score {score}, {} positions",
                    search.node_count
                );
                (col, score, search.node_count)
            })
            .collect::<Vec<_>>();

        self.node_count += 1 + scored.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();

        // `scored` is in ascending column order, keep the first of equal scores
        let mut best: Option<(usize, Score)> = None;
        for &(col, score, _) in &scored {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        match best {
            Some((col, score)) => SearchResult {
                column: Some(col),
                score,
            },
            None => SearchResult::leaf(0),
        }
    }
}
