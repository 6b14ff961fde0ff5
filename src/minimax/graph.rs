//! Exhaustive state graph.
//!
//! The graph maps every state reachable from a root to the ordered list of
//! its direct successors. Terminal states map to an empty list. Many move
//! orders lead to the same position, so this is a DAG rather than a tree;
//! each state is expanded exactly once.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::minimax::error::SolverError;
use crate::minimax::game::{Game, GameState};

/// Complete successor map for every state reachable from a root.
#[derive(Debug, Clone)]
pub struct StateGraph<S> {
    /// Root the enumeration started from.
    root: S,

    /// state -> [successor states], in the game's successor order
    nodes: FxHashMap<S, Vec<S>>,
}

impl<S: GameState> StateGraph<S> {
    /// Enumerate every state reachable from `root`.
    ///
    /// The root is checked against the game's invariants first; an invalid
    /// root fails before any state is recorded.
    pub fn build<G: Game<State = S>>(game: &G, root: S) -> Result<Self, SolverError> {
        game.check_state(&root).map_err(SolverError::InvalidState)?;

        let mut nodes: FxHashMap<S, Vec<S>> = FxHashMap::default();
        let mut stack = vec![root.clone()];

        // Depth-first: successors are pushed in reverse so the lowest one is
        // expanded next.
        while let Some(state) = stack.pop() {
            if nodes.contains_key(&state) {
                continue;
            }

            let successors = game.successors(&state);
            debug_assert!(
                successors
                    .iter()
                    .all(|next| game.ply(next) == game.ply(&state) + 1),
                "successor must advance exactly one ply"
            );

            stack.extend(
                successors
                    .iter()
                    .rev()
                    .filter(|next| !nodes.contains_key(*next))
                    .cloned(),
            );
            nodes.insert(state, successors);
        }

        log::debug!("enumerated {} states", nodes.len());

        Ok(Self { root, nodes })
    }

    /// The root state.
    pub fn root(&self) -> &S {
        &self.root
    }

    /// Direct successors of a state.
    ///
    /// # Errors
    /// `UnknownState` if the state was never discovered.
    pub fn successors(&self, state: &S) -> Result<&[S], SolverError> {
        self.nodes
            .get(state)
            .map(Vec::as_slice)
            .ok_or_else(|| SolverError::UnknownState(format!("{:?}", state)))
    }

    /// Check if a state was discovered.
    pub fn contains(&self, state: &S) -> bool {
        self.nodes.contains_key(state)
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no states. Never true for a built graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All discovered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.nodes.keys()
    }

    /// All `(state, successors)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[S])> {
        self.nodes.iter().map(|(s, next)| (s, next.as_slice()))
    }

    /// Number of states with no successors.
    pub fn num_terminal(&self) -> usize {
        self.nodes.values().filter(|next| next.is_empty()).count()
    }

    /// States grouped by ply distance from the root.
    ///
    /// `layers()[d]` holds every state `d` moves after the root.
    pub fn layers<G: Game<State = S>>(&self, game: &G) -> Vec<Vec<S>> {
        let base = game.ply(&self.root);
        let mut layers: Vec<Vec<S>> = Vec::new();

        for state in self.nodes.keys() {
            let depth = (game.ply(state) - base) as usize;
            if layers.len() <= depth {
                layers.resize_with(depth + 1, Vec::new);
            }
            layers[depth].push(state.clone());
        }

        layers
    }

    /// Export to a serializable, deterministically ordered form.
    pub fn export<G: Game<State = S>>(&self, game: &G) -> GraphExport {
        let nodes = self
            .nodes
            .iter()
            .map(|(state, next)| {
                (
                    game.state_key(state),
                    next.iter().map(|s| game.state_key(s)).collect(),
                )
            })
            .collect();

        GraphExport {
            root: game.state_key(&self.root),
            nodes,
        }
    }
}

/// Serializable export format for a state graph.
///
/// Keys are canonical state strings; the `BTreeMap` keeps the output stable
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Canonical key of the root.
    pub root: String,
    /// state key -> [successor keys]
    pub nodes: BTreeMap<String, Vec<String>>,
}

impl GraphExport {
    /// Save to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), SolverError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
