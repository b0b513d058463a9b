//! Heuristic evaluation of a position from one player's point of view.

use crate::game::{Gameboard, Piece, SERIES_LEN};
use crate::win::{Direction, Window};

/// Desirability of a position. Positive is good for the evaluated player.
pub type Score = i64;

/// Weights of the positional heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Per own piece in the centre column.
    pub center: Score,
    /// Window completely filled with own pieces.
    pub four: Score,
    /// Window with three own pieces and one empty cell.
    pub three: Score,
    /// Window with two own pieces and two empty cells.
    pub two: Score,
    /// Window with three opponent pieces and one empty cell.
    pub opponent_three: Score,
}

impl EvalWeights {
    pub const DEFAULT: Self = Self {
        center: 3,
        four: 100,
        three: 5,
        two: 2,
        opponent_three: -4,
    };
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn evaluate_window(window: &Window, piece: Piece, weights: &EvalWeights) -> Score {
    let own = window.count(piece);
    let empty = window.empty_count();

    let mut score = if own == SERIES_LEN {
        weights.four
    } else if own == SERIES_LEN - 1 && empty == 1 {
        weights.three
    } else if own == SERIES_LEN - 2 && empty == 2 {
        weights.two
    } else {
        0
    };

    if window.count(piece.opponent()) == SERIES_LEN - 1 && empty == 1 {
        score += weights.opponent_three;
    }

    score
}

/// Scores `board` for `piece` with [`EvalWeights::DEFAULT`].
#[must_use]
pub fn score<const W: usize, const H: usize>(board: &Gameboard<W, H>, piece: Piece) -> Score {
    score_with(board, piece, &EvalWeights::DEFAULT)
}

/// Scores `board` for `piece`: centre column bias plus the pattern value of
/// every window on the board.
///
/// Only meaningful for positions nobody has won yet. Decided positions are
/// scored exactly by the search.
#[must_use]
pub fn score_with<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    weights: &EvalWeights,
) -> Score {
    let center = W / 2;
    let center_count = (0..H)
        .filter(|&row| board.cell(row, center) == Some(piece))
        .count();

    let patterns: Score = board
        .windows()
        .map(|window| evaluate_window(&window, piece, weights))
        .sum();

    center_count as Score * weights.center + patterns
}

/// Upper bound of the absolute value [`score_with`] can return on a `W`x`H`
/// board.
#[must_use]
pub fn max_heuristic<const W: usize, const H: usize>(weights: &EvalWeights) -> Score {
    let windows = Direction::ALL
        .into_iter()
        .map(|direction| direction.window_starts::<W, H>().count())
        .sum::<usize>() as Score;
    let per_window = weights.four.abs()
        + weights.three.abs()
        + weights.two.abs()
        + weights.opponent_three.abs();

    H as Score * weights.center.abs() + windows * per_window
}
