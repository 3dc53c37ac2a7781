use gameplay::games::breakthrough::{Action, Board, Breakthrough, BLACK};
use gameplay::{GameResult, GameState, GameStatus};
use rand::seq::SliceRandom;
use rand::Rng;

use super::Error;
use crate::agent::PlayerAi;

#[cfg(debug_assertions)]
pub const SIMULATIONS: u32 = 1_000;

#[cfg(not(debug_assertions))]
pub const SIMULATIONS: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct MctsAgent {
    simulations: u32,
}

impl MctsAgent {
    pub fn new(simulations: u32) -> Self {
        Self {
            simulations: simulations.max(1),
        }
    }
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(SIMULATIONS)
    }
}

impl PlayerAi for MctsAgent {
    type Board = Board;
    type Move = Action;
    type Error = Error;

    // For each action we could take, simulate random games from the resulting
    // state and keep the action with the best win rate.
    fn make_move(&mut self, board: Board) -> Result<Action, Error> {
        let state = Breakthrough::new(board, BLACK);
        let mut rng = rand::thread_rng();

        let mut best: Option<(f64, Action)> = None;
        for action in state.legal_actions() {
            let score = self.score_action(&state, &action, &mut rng);
            if best.map_or(true, |(max_score, _)| score > max_score) {
                best = Some((score, action));
            }
        }

        let (score, action) = best.ok_or(Error::NoMoves)?;
        tracing::debug!(%action, score, simulations = self.simulations, "picked move");
        Ok(action)
    }
}

impl MctsAgent {
    fn score_action(
        &self,
        current_state: &Breakthrough,
        action: &Action,
        rng: &mut impl Rng,
    ) -> f64 {
        let player = BLACK;

        let mut next_state = current_state.clone();
        if next_state.apply_action(action).is_err() {
            return f64::MIN;
        }

        let mut score: i64 = 0;
        for _ in 0..self.simulations {
            let mut sim = next_state.clone();
            let mut status = sim.status();
            loop {
                match status {
                    GameStatus::Over { result } => {
                        match result {
                            GameResult::Winner { winning_player } => {
                                if winning_player == player {
                                    score += 1;
                                } else {
                                    score -= 1;
                                }
                            }
                            GameResult::Tie => {}
                        }
                        break;
                    }
                    GameStatus::InProgress { next_player } => {
                        let actions = sim.legal_actions();
                        // A side that cannot move loses the playout.
                        let Some(action) = actions.choose(rng) else {
                            score += if next_player == player { -1 } else { 1 };
                            break;
                        };
                        match sim.apply_action(action) {
                            Ok(next_status) => status = next_status,
                            Err(_) => break,
                        }
                    }
                }
            }
        }
        score as f64 / self.simulations as f64
    }
}
