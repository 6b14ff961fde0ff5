//! Game trait definition for the minimax solver.
//!
//! Any deterministic two-player, perfect-information game with a finite
//! state space that implements the `Game` trait can be enumerated and solved.
//! This provides a clean abstraction between the algorithm and specific games.

use std::fmt::{self, Debug};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// `First` moves first and maximizes the value; `Second` minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player who opens the game (maximizer).
    First,
    /// The player who replies (minimizer).
    Second,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Whether this player maximizes the minimax value.
    pub fn is_maximizing(self) -> bool {
        matches!(self, Player::First)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first player"),
            Player::Second => write!(f, "second player"),
        }
    }
}

/// Trait for game states.
///
/// States are immutable snapshots used directly as map keys, so they must be
/// hashable and comparable. Keep them small; the solver clones them freely.
pub trait GameState: Clone + Eq + Hash + Debug + Send + Sync {}

/// The main Game trait that defines the interface for any solvable game.
///
/// # Requirements
///
/// - `successors` must strictly increase `ply` by one, so the state graph is
///   acyclic and every path to a given state has the same length.
/// - `current_player` must be derived from the state alone; the solver never
///   tracks whose turn it is on the side.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type State = MyState;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game: Clone + Send + Sync {
    /// The type representing a complete game state.
    type State: GameState;

    /// Create the initial game state.
    fn initial_state(&self) -> Self::State;

    /// Check if the given state is terminal (game over).
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Get the winner of a state, if any.
    ///
    /// Returns `None` both for draws and for unfinished games; combine with
    /// [`Game::is_terminal`] to tell them apart.
    fn winner(&self, state: &Self::State) -> Option<Player>;

    /// Get the player who should act at the current state.
    ///
    /// # Returns
    /// - `Some(player)` if the game is still going
    /// - `None` if the state is terminal
    fn current_player(&self, state: &Self::State) -> Option<Player>;

    /// Number of moves made to reach this state from the initial state.
    fn ply(&self, state: &Self::State) -> u32;

    /// Upper bound on `ply` for any reachable state.
    fn max_ply(&self) -> u32;

    /// Get every state reachable in one move, in a stable order.
    ///
    /// Returns an empty vector if the state is terminal.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Check that a state is a legal position to start enumeration from.
    ///
    /// The default accepts everything. Override this to reject states that
    /// break the game's turn invariants.
    fn check_state(&self, _state: &Self::State) -> Result<(), String> {
        Ok(())
    }

    /// Canonical string key for a state, used for export.
    fn state_key(&self, state: &Self::State) -> String;

    /// Get a human-readable description of a state.
    ///
    /// Used for debugging and visualization.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

/// Macro to simplify implementing the GameState trait.
#[macro_export]
macro_rules! impl_game_state {
    ($type:ty) => {
        impl $crate::minimax::game::GameState for $type {}
    };
}
