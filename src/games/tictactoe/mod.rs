//! Tic-tac-toe implementation for the minimax solver.
//!
//! Tic-tac-toe is small enough to enumerate completely: 5,478 distinct
//! positions are reachable from the empty board, 958 of them terminal.
//! Under optimal play from both sides the game is a draw.
//!
//! ## Rules
//!
//! - 3×3 board, the first player places `o`, the second places `x`
//! - Players alternate, one mark per move, on any empty cell
//! - Three equal marks in a row, column or diagonal win
//! - A full board without a line is a draw
//!
//! Whose turn it is never gets stored; it is derived from the board by
//! [`Board::mover`].

pub mod board;

pub use board::{Board, BoardParseError, Mark, Status, CELLS, LINES};

use crate::minimax::game::{Game, Player};

/// Tic-tac-toe game.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new tic-tac-toe game.
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = Board;

    fn initial_state(&self) -> Self::State {
        Board::new()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.is_terminal()
    }

    fn winner(&self, state: &Self::State) -> Option<Player> {
        state.winner()
    }

    fn current_player(&self, state: &Self::State) -> Option<Player> {
        if state.is_terminal() {
            None
        } else {
            Some(state.mover())
        }
    }

    fn ply(&self, state: &Self::State) -> u32 {
        (CELLS - state.empty_count()) as u32
    }

    fn max_ply(&self) -> u32 {
        CELLS as u32
    }

    fn successors(&self, state: &Self::State) -> Vec<Self::State> {
        if state.is_terminal() {
            return vec![];
        }

        let mover = state.mover();
        state
            .empty_cells()
            .filter_map(|i| state.place(i, mover))
            .collect()
    }

    fn check_state(&self, state: &Self::State) -> Result<(), String> {
        state.check_turn_invariant()
    }

    fn state_key(&self, state: &Self::State) -> String {
        state.to_string()
    }

    fn state_description(&self, state: &Self::State) -> String {
        state.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_successors() {
        let game = TicTacToe::new();
        let root = game.initial_state();

        assert_eq!(game.current_player(&root), Some(Player::First));
        let next = game.successors(&root);
        assert_eq!(next.len(), 9);
        // Ascending cell order
        assert_eq!(next[0].to_string(), "o--------");
        assert_eq!(next[8].to_string(), "--------o");
        assert!(next.iter().all(|b| b.mover() == Player::Second));
    }

    #[test]
    fn test_terminal_has_no_successors() {
        let game = TicTacToe::new();
        let won: Board = "ooo-xx---".parse().unwrap();
        assert!(game.successors(&won).is_empty());
        assert_eq!(game.current_player(&won), None);
        assert_eq!(game.winner(&won), Some(Player::First));
    }

    #[test]
    fn test_ply_counts_marks() {
        let game = TicTacToe::new();
        let b: Board = "o---x--xo".parse().unwrap();
        assert_eq!(game.ply(&b), 4);
        assert_eq!(game.ply(&Board::new()), 0);
        assert_eq!(game.max_ply(), 9);
    }

    #[test]
    fn test_check_state_rejects_bad_counts() {
        let game = TicTacToe::new();
        let bad = Board::new()
            .place(0, Player::First)
            .and_then(|b| b.place(1, Player::First))
            .unwrap();
        assert!(game.check_state(&bad).is_err());
        assert!(game.check_state(&"o---x--xo".parse().unwrap()).is_ok());
    }
}
