//! Solver facade.
//!
//! Builds the state graph and the value oracle once, then answers the three
//! queries an interactive front end needs: legal successors, terminal test,
//! and the optimal move.

use std::time::Instant;

use crate::minimax::config::{SolveStats, SolverConfig};
use crate::minimax::error::SolverError;
use crate::minimax::game::{Game, Player};
use crate::minimax::graph::{GraphExport, StateGraph};
use crate::minimax::oracle::{ValueExport, ValueOracle};
use crate::minimax::policy::MinimaxPlayer;

/// A fully solved game.
///
/// # Example
/// ```
/// use tictactoe_minimax::games::tictactoe::TicTacToe;
/// use tictactoe_minimax::minimax::{MinimaxSolver, Player, SolverConfig};
///
/// let solver = MinimaxSolver::new(TicTacToe::new(), SolverConfig::default()).unwrap();
/// assert_eq!(solver.stats().states, 5478);
/// assert_eq!(solver.root_value(), 0);
///
/// let opening = solver.best_move(solver.root(), Player::First).unwrap();
/// assert!(!solver.is_terminal(&opening));
/// ```
#[derive(Debug, Clone)]
pub struct MinimaxSolver<G: Game> {
    game: G,
    config: SolverConfig,
    graph: StateGraph<G::State>,
    oracle: ValueOracle<G::State>,
    stats: SolveStats,
}

impl<G: Game> MinimaxSolver<G> {
    /// Solve the game from its initial state.
    pub fn new(game: G, config: SolverConfig) -> Result<Self, SolverError> {
        let root = game.initial_state();
        Self::from_root(game, root, config)
    }

    /// Solve the game from an arbitrary root.
    ///
    /// Values are depth-adjusted relative to this root.
    pub fn from_root(game: G, root: G::State, config: SolverConfig) -> Result<Self, SolverError> {
        // Fail on bad config before spending time on enumeration.
        config.validate(game.max_ply())?;

        let start = Instant::now();
        let graph = StateGraph::build(&game, root)?;
        let graph_seconds = start.elapsed().as_secs_f64();
        log::info!(
            "built state graph: {} states in {:.3}s",
            graph.len(),
            graph_seconds
        );

        let start = Instant::now();
        let oracle = ValueOracle::solve(&game, &graph, &config)?;
        let values_seconds = start.elapsed().as_secs_f64();
        log::info!(
            "computed values ({}): root = {} in {:.3}s",
            if config.parallel { "parallel" } else { "sequential" },
            oracle.root_value(),
            values_seconds
        );

        let mut stats = SolveStats::new();
        stats.states = graph.len();
        stats.root_value = oracle.root_value();
        stats.graph_seconds = graph_seconds;
        stats.values_seconds = values_seconds;
        for (state, next) in graph.iter() {
            if !next.is_empty() {
                continue;
            }
            stats.terminal_states += 1;
            match game.winner(state) {
                Some(Player::First) => stats.wins_first += 1,
                Some(Player::Second) => stats.wins_second += 1,
                None => stats.draws += 1,
            }
        }

        Ok(Self {
            game,
            config,
            graph,
            oracle,
            stats,
        })
    }

    /// Legal successors of a state.
    pub fn legal_successors(&self, state: &G::State) -> Result<&[G::State], SolverError> {
        self.graph.successors(state)
    }

    /// Check if a state ends the game.
    pub fn is_terminal(&self, state: &G::State) -> bool {
        self.game.is_terminal(state)
    }

    /// Optimal successor for `mover`; terminal states come back unchanged.
    pub fn best_move(&self, state: &G::State, mover: Player) -> Result<G::State, SolverError> {
        self.player().best_move(state, mover)
    }

    /// Positions of a game both sides play optimally, starting at `from`.
    ///
    /// The first entry is `from` itself and the last one is terminal.
    pub fn play_out(&self, from: &G::State) -> Result<Vec<G::State>, SolverError> {
        let mut line = vec![from.clone()];
        let mut state = from.clone();
        while let Some(mover) = self.game.current_player(&state) {
            let next = self.best_move(&state, mover)?;
            if next == state {
                break;
            }
            line.push(next.clone());
            state = next;
        }
        Ok(line)
    }

    /// Minimax value of a state.
    pub fn value(&self, state: &G::State) -> Result<i32, SolverError> {
        self.oracle.value(state)
    }

    /// Value of the root state.
    pub fn root_value(&self) -> i32 {
        self.oracle.root_value()
    }

    /// A player backed by this solver.
    pub fn player(&self) -> MinimaxPlayer<'_, G> {
        MinimaxPlayer::new(&self.game, &self.graph, &self.oracle)
    }

    /// The root state.
    pub fn root(&self) -> &G::State {
        self.graph.root()
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Get reference to the state graph.
    pub fn graph(&self) -> &StateGraph<G::State> {
        &self.graph
    }

    /// Get reference to the value oracle.
    pub fn oracle(&self) -> &ValueOracle<G::State> {
        &self.oracle
    }

    /// Get solve statistics.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Export the successor map.
    pub fn export_graph(&self) -> GraphExport {
        self.graph.export(&self.game)
    }

    /// Export the value mapping.
    pub fn export_values(&self) -> ValueExport {
        self.oracle.export(&self.game)
    }
}
