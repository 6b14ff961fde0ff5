//! Exhaustive minimax solver module.
//!
//! This module enumerates the complete state space of a small deterministic
//! two-player game and computes the game-theoretic value of every state by
//! backward induction.
//!
//! # Overview
//!
//! Solving happens in two passes, each run exactly once:
//! 1. [`StateGraph`] walks every reachable state depth-first and records its
//!    successors
//! 2. [`ValueOracle`] assigns each state its minimax value, bottom-up from
//!    the terminal states
//!
//! [`MinimaxPlayer`] then reads both to choose optimal moves.
//!
//! There is no pruning and no on-demand expansion: the whole graph is built
//! up front, which is only sensible for games whose state space fits in
//! memory comfortably.
//!
//! # Usage
//!
//! 1. Implement the `Game` trait for your game
//! 2. Create a `MinimaxSolver` with your game and configuration
//! 3. Query `best_move()`, `value()` or export the graph
//!
//! # Example
//!
//! ```ignore
//! use tictactoe_minimax::minimax::{MinimaxSolver, Player, SolverConfig};
//!
//! let solver = MinimaxSolver::new(MyGame::new(), SolverConfig::default())?;
//! println!("{} states, root value {}", solver.stats().states, solver.root_value());
//!
//! let reply = solver.best_move(&state, Player::Second)?;
//! ```
//!
//! # Theory
//!
//! **Minimax**: the value of a position is the best value the player to move
//! can guarantee against any reply.
//! ```text
//! V(s) = score(s)                      if s is terminal
//! V(s) = max { V(t) : t ∈ succ(s) }    if the first player moves
//! V(s) = min { V(t) : t ∈ succ(s) }    if the second player moves
//! ```
//!
//! # References
//!
//! - von Neumann, J. "Zur Theorie der Gesellschaftsspiele" (1928)
//! - Russell, S., Norvig, P. "Artificial Intelligence: A Modern Approach", ch. 5

pub mod config;
pub mod error;
pub mod game;
pub mod graph;
pub mod oracle;
pub mod policy;
pub mod solver;

// Re-export main types for convenient access
pub use config::{ConfigError, SolveStats, SolverConfig};
pub use error::SolverError;
pub use game::{Game, GameState, Player};
pub use graph::{GraphExport, StateGraph};
pub use oracle::{terminal_score, ValueExport, ValueOracle};
pub use policy::MinimaxPlayer;
pub use solver::MinimaxSolver;
