//! Configuration options for the minimax solver.
//!
//! This module provides the configuration struct that controls scoring and
//! evaluation strategy, plus the statistics collected while solving.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the minimax solver.
///
/// # Example
/// ```
/// use tictactoe_minimax::minimax::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.win_score, 10);
/// assert!(config.depth_adjusted);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Base score of a win for the first player (negated for the second).
    pub win_score: i32,

    /// Subtract the ply depth from wins and add it to losses.
    ///
    /// This makes the oracle prefer faster wins and slower losses. When
    /// disabled every win scores exactly `win_score`.
    pub depth_adjusted: bool,

    /// Evaluate the graph layer by layer with rayon instead of by
    /// memoized recursion. Both produce identical values.
    pub parallel: bool,

    /// Number of threads for parallel evaluation.
    ///
    /// `None` uses rayon's global pool.
    pub num_threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            win_score: 10,
            depth_adjusted: true,
            parallel: false,
            num_threads: None,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the base win score.
    pub fn with_win_score(mut self, win_score: i32) -> Self {
        self.win_score = win_score;
        self
    }

    /// Builder method: enable or disable depth adjustment.
    pub fn with_depth_adjusted(mut self, enable: bool) -> Self {
        self.depth_adjusted = enable;
        self
    }

    /// Builder method: enable or disable parallel evaluation.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Validate the configuration against the deepest ply a game can reach.
    pub fn validate(&self, max_ply: u32) -> Result<(), ConfigError> {
        if self.win_score <= 0 {
            return Err(ConfigError::WinScoreTooSmall(self.win_score, 0));
        }

        // A win at the last ply must still score above a draw.
        if self.depth_adjusted && i64::from(self.win_score) <= i64::from(max_ply) {
            return Err(ConfigError::WinScoreTooSmall(self.win_score, max_ply));
        }

        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }

        Ok(())
    }
}

/// Errors that can occur when loading or validating solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Win score does not exceed the maximum ply depth.
    WinScoreTooSmall(i32, u32),
    /// Thread count of zero.
    InvalidThreads,
    /// Configuration file could not be read or parsed.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::WinScoreTooSmall(score, max_ply) => {
                write!(f, "Win score {} must be greater than {}", score, max_ply)
            }
            ConfigError::InvalidThreads => write!(f, "Thread count must be at least 1"),
            ConfigError::Load(msg) => write!(f, "Failed to load config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics gathered while building and evaluating the state graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Number of distinct states discovered.
    pub states: usize,

    /// Number of terminal states.
    pub terminal_states: usize,

    /// Terminal states won by the first player.
    pub wins_first: usize,

    /// Terminal states won by the second player.
    pub wins_second: usize,

    /// Terminal states with no winner.
    pub draws: usize,

    /// Value of the root state.
    pub root_value: i32,

    /// Time spent enumerating the graph (in seconds).
    pub graph_seconds: f64,

    /// Time spent computing values (in seconds).
    pub values_seconds: f64,
}

impl SolveStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }
}
