//! Game implementations for the minimax solver.
//!
//! ## Available Games
//!
//! - [`tictactoe`]: 3×3 tic-tac-toe, 5,478 reachable positions
//!
//! ## Adding New Games
//!
//! To add a new game:
//!
//! 1. Create a new module under `src/games/`
//! 2. Define a compact, hashable state type
//! 3. Implement the `Game` trait, deriving the mover from the state itself
//! 4. Add tests that check state counts and known values
//!
//! Only games whose full state space fits in memory are a good fit.

pub mod tictactoe;
