//! Backward-induction value oracle.
//!
//! Assigns every state of a [`StateGraph`] its minimax value. Terminal states
//! score from the winner and the depth at which the game ended; every other
//! state takes the maximum of its successors when the first player is to
//! move and the minimum otherwise.
//!
//! # Scoring
//!
//! For a terminal state `d` plies below the root, with base score `W`:
//!
//! ```text
//! first player wins:   W - d
//! second player wins:  d - W
//! draw:                0
//! ```
//!
//! The depth term prefers fast wins and slow losses.
//!
//! # Evaluation
//!
//! Values are memoized on state identity, so each state is evaluated once no
//! matter how many move orders reach it. Two evaluation orders are provided:
//! depth-first recursion, and a layered sweep from the deepest ply up with
//! each layer evaluated in parallel. They produce identical mappings.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::minimax::config::SolverConfig;
use crate::minimax::error::SolverError;
use crate::minimax::game::{Game, GameState, Player};
use crate::minimax::graph::StateGraph;

/// Immutable mapping from every state in a graph to its minimax value.
#[derive(Debug, Clone)]
pub struct ValueOracle<S> {
    /// Root of the graph the values were computed over.
    root: S,

    /// state -> minimax value
    values: FxHashMap<S, i32>,
}

impl<S: GameState> ValueOracle<S> {
    /// Compute the value of every state in `graph`.
    ///
    /// Depths are measured from the graph's root.
    pub fn solve<G: Game<State = S>>(
        game: &G,
        graph: &StateGraph<S>,
        config: &SolverConfig,
    ) -> Result<Self, SolverError> {
        config.validate(game.max_ply())?;

        let values = if config.parallel {
            match config.num_threads {
                Some(threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| SolverError::ThreadPool(e.to_string()))?;
                    pool.install(|| evaluate_layers(game, graph, config))?
                }
                None => evaluate_layers(game, graph, config)?,
            }
        } else {
            evaluate_recursive(game, graph, config)?
        };

        Ok(Self {
            root: graph.root().clone(),
            values,
        })
    }

    /// Value of a state.
    ///
    /// # Errors
    /// `UnknownState` if the state is not in the graph this oracle was built from.
    pub fn value(&self, state: &S) -> Result<i32, SolverError> {
        self.values
            .get(state)
            .copied()
            .ok_or_else(|| SolverError::UnknownState(format!("{:?}", state)))
    }

    /// Value of the root state.
    pub fn root_value(&self) -> i32 {
        self.values.get(&self.root).copied().unwrap_or_default()
    }

    /// Number of valued states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no state has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All `(state, value)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, i32)> {
        self.values.iter().map(|(s, &v)| (s, v))
    }

    /// Export to a serializable, deterministically ordered form.
    pub fn export<G: Game<State = S>>(&self, game: &G) -> ValueExport {
        ValueExport {
            root: game.state_key(&self.root),
            values: self
                .values
                .iter()
                .map(|(s, &v)| (game.state_key(s), v))
                .collect(),
        }
    }
}

/// Score of a terminal state `depth` plies below the root.
pub fn terminal_score(winner: Option<Player>, depth: u32, config: &SolverConfig) -> i32 {
    let depth = if config.depth_adjusted { depth as i32 } else { 0 };
    match winner {
        Some(Player::First) => config.win_score - depth,
        Some(Player::Second) => depth - config.win_score,
        None => 0,
    }
}

/// Value of one state given a lookup for its successors' values.
fn node_value<G, F>(
    game: &G,
    config: &SolverConfig,
    base_ply: u32,
    state: &G::State,
    successors: &[G::State],
    mut lookup: F,
) -> Result<i32, SolverError>
where
    G: Game,
    F: FnMut(&G::State) -> Result<i32, SolverError>,
{
    if successors.is_empty() {
        let depth = game.ply(state) - base_ply;
        return Ok(terminal_score(game.winner(state), depth, config));
    }

    let maximizing = game
        .current_player(state)
        .map(Player::is_maximizing)
        .ok_or_else(|| {
            SolverError::InvalidState(format!("{:?} has successors but no mover", state))
        })?;

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for next in successors {
        let value = lookup(next)?;
        best = if maximizing { best.max(value) } else { best.min(value) };
    }
    Ok(best)
}

fn evaluate_recursive<G: Game>(
    game: &G,
    graph: &StateGraph<G::State>,
    config: &SolverConfig,
) -> Result<FxHashMap<G::State, i32>, SolverError> {
    let base_ply = game.ply(graph.root());
    let mut values = FxHashMap::with_capacity_and_hasher(graph.len(), Default::default());

    visit(game, graph, config, base_ply, graph.root(), &mut values)?;
    log::debug!("evaluated {} states recursively", values.len());

    Ok(values)
}

fn visit<G: Game>(
    game: &G,
    graph: &StateGraph<G::State>,
    config: &SolverConfig,
    base_ply: u32,
    state: &G::State,
    values: &mut FxHashMap<G::State, i32>,
) -> Result<i32, SolverError> {
    if let Some(&value) = values.get(state) {
        return Ok(value);
    }

    let successors = graph.successors(state)?;
    let value = node_value(game, config, base_ply, state, successors, |next| {
        visit(game, graph, config, base_ply, next, values)
    })?;

    values.insert(state.clone(), value);
    Ok(value)
}

fn evaluate_layers<G: Game>(
    game: &G,
    graph: &StateGraph<G::State>,
    config: &SolverConfig,
) -> Result<FxHashMap<G::State, i32>, SolverError> {
    let base_ply = game.ply(graph.root());
    let mut values: FxHashMap<G::State, i32> =
        FxHashMap::with_capacity_and_hasher(graph.len(), Default::default());

    // Successors always sit one layer deeper, so sweeping bottom-up means
    // every lookup hits an already evaluated state.
    for (depth, layer) in graph.layers(game).iter().enumerate().rev() {
        let evaluated = layer
            .par_iter()
            .map(|state| -> Result<(G::State, i32), SolverError> {
                let successors = graph.successors(state)?;
                let value = node_value(game, config, base_ply, state, successors, |next| {
                    values
                        .get(next)
                        .copied()
                        .ok_or_else(|| SolverError::UnknownState(format!("{:?}", next)))
                })?;
                Ok((state.clone(), value))
            })
            .collect::<Result<Vec<_>, SolverError>>()?;

        log::debug!("layer {}: {} states", depth, evaluated.len());
        values.extend(evaluated);
    }

    Ok(values)
}

/// Serializable export format for a value mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueExport {
    /// Canonical key of the root.
    pub root: String,
    /// state key -> value
    pub values: BTreeMap<String, i32>,
}

impl ValueExport {
    /// Save to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), SolverError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, TicTacToe};

    fn solve(root: Board, config: &SolverConfig) -> (StateGraph<Board>, ValueOracle<Board>) {
        let game = TicTacToe::new();
        let graph = StateGraph::build(&game, root).unwrap();
        let oracle = ValueOracle::solve(&game, &graph, config).unwrap();
        (graph, oracle)
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    /// Plain minimax without memoization, for cross-checking.
    fn naive(game: &TicTacToe, state: &Board, depth: u32, config: &SolverConfig) -> i32 {
        let next = game.successors(state);
        if next.is_empty() {
            return terminal_score(state.winner(), depth, config);
        }
        let values = next.iter().map(|s| naive(game, s, depth + 1, config));
        if state.mover() == Player::First {
            values.max().unwrap()
        } else {
            values.min().unwrap()
        }
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let (graph, oracle) = solve(Board::new(), &SolverConfig::default());
        assert_eq!(oracle.root_value(), 0);
        assert_eq!(oracle.len(), graph.len());
        for state in graph.states() {
            assert!(oracle.value(state).is_ok());
        }
    }

    #[test]
    fn test_terminal_scores() {
        let config = SolverConfig::default();
        assert_eq!(terminal_score(Some(Player::First), 5, &config), 5);
        assert_eq!(terminal_score(Some(Player::Second), 6, &config), -4);
        assert_eq!(terminal_score(None, 9, &config), 0);

        let flat = SolverConfig::default().with_depth_adjusted(false);
        assert_eq!(terminal_score(Some(Player::First), 5, &flat), 10);
        assert_eq!(terminal_score(Some(Player::Second), 6, &flat), -10);
    }

    #[test]
    fn test_values_within_depth_bounds() {
        // Earliest first-player win is ply 5, earliest second-player win ply 6.
        let (_, oracle) = solve(Board::new(), &SolverConfig::default());
        for (state, value) in oracle.iter() {
            assert!((-4..=5).contains(&value), "{} has value {}", state, value);
        }
        assert_eq!(oracle.value(&board("ooo-xx---")).unwrap(), 5);
        assert_eq!(oracle.value(&board("oo-xx----")).unwrap(), 5);
    }

    #[test]
    fn test_depth_measured_from_root() {
        let (_, oracle) = solve(board("oo-xx----"), &SolverConfig::default());
        // The win is one ply below this root.
        assert_eq!(oracle.root_value(), 9);
        assert_eq!(oracle.value(&board("ooo-xx---")).unwrap(), 9);
    }

    #[test]
    fn test_parallel_matches_recursive() {
        let (graph, sequential) = solve(Board::new(), &SolverConfig::default());
        let game = TicTacToe::new();
        for config in [
            SolverConfig::default().with_parallel(true),
            SolverConfig::default().with_parallel(true).with_threads(2),
        ] {
            let parallel = ValueOracle::solve(&game, &graph, &config).unwrap();
            assert_eq!(parallel.len(), sequential.len());
            for (state, value) in sequential.iter() {
                assert_eq!(parallel.value(state).unwrap(), value, "state {}", state);
            }
        }
    }

    #[test]
    fn test_matches_naive_minimax() {
        let game = TicTacToe::new();
        let config = SolverConfig::default();
        let (graph, oracle) = solve(Board::new(), &config);

        assert_eq!(naive(&game, &Board::new(), 0, &config), oracle.root_value());
        for state in graph.states().filter(|s| game.ply(s) >= 4) {
            let expected = naive(&game, state, game.ply(state), &config);
            assert_eq!(oracle.value(state).unwrap(), expected, "state {}", state);
        }
    }

    #[test]
    fn test_flat_scoring() {
        let config = SolverConfig::default().with_depth_adjusted(false);
        let (_, oracle) = solve(Board::new(), &config);
        assert_eq!(oracle.root_value(), 0);
        assert_eq!(oracle.value(&board("oo-xx----")).unwrap(), 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let game = TicTacToe::new();
        let graph = StateGraph::build(&game, Board::new()).unwrap();
        let config = SolverConfig::default().with_win_score(5);
        assert!(matches!(
            ValueOracle::solve(&game, &graph, &config),
            Err(SolverError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_state_value() {
        let (_, oracle) = solve(board("oo-xx----"), &SolverConfig::default());
        assert!(matches!(
            oracle.value(&Board::new()),
            Err(SolverError::UnknownState(_))
        ));
    }

    #[test]
    fn test_export_sorted() {
        let game = TicTacToe::new();
        let (_, oracle) = solve(Board::new(), &SolverConfig::default());
        let export = oracle.export(&game);
        assert_eq!(export.root, "---------");
        assert_eq!(export.values.len(), 5478);
        assert_eq!(export.values["---------"], 0);
    }
}
