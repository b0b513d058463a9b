//! Connect Four with a computer opponent.
//!
//! The computer chooses its moves with a depth-limited minimax search with
//! alpha-beta pruning ([`minmax`]). Positions the search cannot see to the end
//! are rated by a positional heuristic ([`eval`]).
//!
//! ```
//! use connect_four_ai::{Gameboard, Piece, choose_move};
//!
//! let board = Gameboard::<7, 6>::new();
//! assert_eq!(choose_move(&board, 1, Piece::PlayerB), Some(3));
//! ```

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]

pub mod ai_player;
pub mod eval;
pub mod game;
pub mod minmax;
pub mod win;

pub use ai_player::{AiPlayer, DEFAULT_SEARCH_DEPTH, SearchConfig, choose_move};
pub use eval::{EvalWeights, Score};
pub use game::{BoardError, Cell, Game, GameError, GameState, Gameboard, Piece, SERIES_LEN};
pub use minmax::{INFINITY, LOSS_SCORE, Search, SearchResult, TieBreak, WIN_SCORE};
pub use win::{Direction, Window, has_four_in_a_row, winner};
