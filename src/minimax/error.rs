//! Error type shared by the graph, the value oracle and the solver facade.

use std::fmt;

use crate::minimax::config::ConfigError;
use crate::minimax::game::Player;

/// Errors produced by the minimax solver.
#[derive(Debug)]
pub enum SolverError {
    /// A state was looked up that the graph never discovered.
    UnknownState(String),
    /// A root or start state breaks the game's invariants.
    InvalidState(String),
    /// A move was requested for a player whose turn it is not.
    NotToMove {
        /// Description of the state.
        state: String,
        /// The player the move was requested for.
        mover: Player,
    },
    /// Invalid solver configuration.
    Config(ConfigError),
    /// Dedicated rayon pool could not be created.
    ThreadPool(String),
    /// I/O failure during export.
    Io(std::io::Error),
    /// JSON serialization failure during export.
    Json(serde_json::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::UnknownState(state) => write!(f, "State {} is not in the graph", state),
            SolverError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            SolverError::NotToMove { state, mover } => {
                write!(f, "It is not the {}'s turn in state {}", mover, state)
            }
            SolverError::Config(e) => write!(f, "{}", e),
            SolverError::ThreadPool(msg) => write!(f, "Failed to build thread pool: {}", msg),
            SolverError::Io(e) => write!(f, "I/O error: {}", e),
            SolverError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Config(e) => Some(e),
            SolverError::Io(e) => Some(e),
            SolverError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SolverError {
    fn from(e: ConfigError) -> Self {
        SolverError::Config(e)
    }
}

impl From<std::io::Error> for SolverError {
    fn from(e: std::io::Error) -> Self {
        SolverError::Io(e)
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(e: serde_json::Error) -> Self {
        SolverError::Json(e)
    }
}
