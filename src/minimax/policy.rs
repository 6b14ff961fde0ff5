//! Optimal move selection over a solved graph.

use crate::minimax::error::SolverError;
use crate::minimax::game::{Game, Player};
use crate::minimax::graph::StateGraph;
use crate::minimax::oracle::ValueOracle;

/// Opponent that always plays a minimax-optimal move.
///
/// Borrows the graph and the value mapping; any number of players can share
/// one solved graph.
///
/// # Tie-breaking
///
/// Among successors with equal value the first one in the game's successor
/// order wins (for tic-tac-toe, the lowest cell index). The choice is
/// therefore deterministic, never random.
#[derive(Debug)]
pub struct MinimaxPlayer<'a, G: Game> {
    game: &'a G,
    graph: &'a StateGraph<G::State>,
    oracle: &'a ValueOracle<G::State>,
}

impl<G: Game> Clone for MinimaxPlayer<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: Game> Copy for MinimaxPlayer<'_, G> {}

impl<'a, G: Game> MinimaxPlayer<'a, G> {
    /// Create a player over a solved graph.
    pub fn new(
        game: &'a G,
        graph: &'a StateGraph<G::State>,
        oracle: &'a ValueOracle<G::State>,
    ) -> Self {
        Self {
            game,
            graph,
            oracle,
        }
    }

    /// Pick the successor of `state` with the best value for `mover`.
    ///
    /// The first player maximizes, the second minimizes. A terminal state is
    /// returned unchanged to signal that the game is over.
    ///
    /// # Errors
    /// - `UnknownState` if `state` is not in the graph
    /// - `NotToMove` if it is not `mover`'s turn in `state`
    pub fn best_move(&self, state: &G::State, mover: Player) -> Result<G::State, SolverError> {
        let successors = self.graph.successors(state)?;
        if successors.is_empty() {
            return Ok(state.clone());
        }

        if self.game.current_player(state) != Some(mover) {
            return Err(SolverError::NotToMove {
                state: self.game.state_key(state),
                mover,
            });
        }

        let mut best: Option<(&G::State, i32)> = None;
        for next in successors {
            let value = self.oracle.value(next)?;
            let better = match best {
                None => true,
                Some((_, current)) if mover.is_maximizing() => value > current,
                Some((_, current)) => value < current,
            };
            if better {
                best = Some((next, value));
            }
        }

        Ok(best.map(|(s, _)| s.clone()).unwrap_or_else(|| state.clone()))
    }

    /// Every successor of `state` paired with its value, in successor order.
    pub fn rank_moves(&self, state: &G::State) -> Result<Vec<(G::State, i32)>, SolverError> {
        self.graph
            .successors(state)?
            .iter()
            .map(|next| -> Result<(G::State, i32), SolverError> {
                Ok((next.clone(), self.oracle.value(next)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Status, TicTacToe};
    use crate::minimax::config::SolverConfig;

    struct Solved {
        game: TicTacToe,
        graph: StateGraph<Board>,
        oracle: ValueOracle<Board>,
    }

    fn solved() -> Solved {
        let game = TicTacToe::new();
        let graph = StateGraph::build(&game, Board::new()).unwrap();
        let oracle = ValueOracle::solve(&game, &graph, &SolverConfig::default()).unwrap();
        Solved {
            game,
            graph,
            oracle,
        }
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_completes_winning_line() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        let state = board("oo-xx----");
        let next = player.best_move(&state, Player::First).unwrap();
        assert_eq!(next.to_string(), "ooo-xx---");
        assert_eq!(next.status(), Status::Won(Player::First));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        // Second player threatens 3-4-5; first player has no win of its own.
        let state = board("o--xx--o-");
        let next = player.best_move(&state, Player::First).unwrap();
        assert_eq!(state.changed_cell(&next), Some(5));
    }

    #[test]
    fn test_second_player_takes_win() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        let state = board("oo-xx-o--");
        let next = player.best_move(&state, Player::Second).unwrap();
        assert_eq!(next.status(), Status::Won(Player::Second));
    }

    #[test]
    fn test_terminal_returned_unchanged() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        let done = board("ooo-xx---");
        assert_eq!(player.best_move(&done, Player::Second).unwrap(), done);
        assert_eq!(player.best_move(&done, Player::First).unwrap(), done);
    }

    #[test]
    fn test_wrong_mover_rejected() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);
        assert!(matches!(
            player.best_move(&Board::new(), Player::Second),
            Err(SolverError::NotToMove { .. })
        ));
    }

    #[test]
    fn test_ties_break_to_lowest_cell() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        // Every opening move draws, so the first cell is chosen.
        let ranked = player.rank_moves(&Board::new()).unwrap();
        assert!(ranked.iter().all(|(_, v)| *v == 0));
        let next = player.best_move(&Board::new(), Player::First).unwrap();
        assert_eq!(next.to_string(), "o--------");

        // Repeated queries agree.
        for _ in 0..3 {
            assert_eq!(player.best_move(&Board::new(), Player::First).unwrap(), next);
        }
    }

    #[test]
    fn test_optimal_self_play_draws() {
        let s = solved();
        let player = MinimaxPlayer::new(&s.game, &s.graph, &s.oracle);

        let mut state = Board::new();
        while let Some(mover) = s.game.current_player(&state) {
            state = player.best_move(&state, mover).unwrap();
        }
        assert_eq!(state.status(), Status::Draw);
        assert!(state.is_full());
    }
}
