//! # Tic-Tac-Toe Minimax
//!
//! An exhaustive minimax solver for small deterministic two-player games,
//! with tic-tac-toe as the bundled game.
//!
//! ## Features
//!
//! - **Full State Graph**: Every reachable position enumerated once, with its successors
//! - **Backward Induction**: Memoized minimax values for every state, depth-adjusted
//! - **Optimal Opponent**: Deterministic best-move selection from the solved values
//! - **Parallel Evaluation**: Optional layer-by-layer evaluation with rayon
//! - **JSON Export**: Successor map and value mapping for external tooling
//!
//! ## Quick Start
//!
//! ```
//! use tictactoe_minimax::games::tictactoe::TicTacToe;
//! use tictactoe_minimax::{MinimaxSolver, Player, SolverConfig};
//!
//! // 1. Solve the game up front
//! let solver = MinimaxSolver::new(TicTacToe::new(), SolverConfig::default()).unwrap();
//!
//! // 2. Perfect play from both sides is a draw
//! assert_eq!(solver.root_value(), 0);
//!
//! // 3. Ask for the optimal reply in any reachable position
//! let state = "oo-xx----".parse().unwrap();
//! let reply = solver.best_move(&state, Player::First).unwrap();
//! assert_eq!(reply.to_string(), "ooo-xx---");
//! ```
//!
//! ## Modules
//!
//! - [`minimax`]: State graph, value oracle and optimal player (generic)
//! - [`games`]: Game implementations (tic-tac-toe)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Minimax Solver (Generic)                     │
//! │  - StateGraph (DFS enumeration)   - ValueOracle (minimax)       │
//! │  - MinimaxPlayer (best move)      - JSON export                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!                        ┌─────────────┐
//!                        │ Tic-Tac-Toe │
//!                        └─────────────┘
//! ```

#![warn(missing_docs)]

/// Minimax solver module.
///
/// This is the core module containing the generic enumeration and
/// backward-induction algorithms.
pub mod minimax;

/// Game implementations module.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use minimax::{Game, GameState, MinimaxSolver, Player, SolverConfig, SolverError};
