use gameplay::games::breakthrough::{Action, Board, Breakthrough, BLACK};
use gameplay::GameState;
use rand::seq::SliceRandom;

use super::Error;
use crate::agent::PlayerAi;

#[derive(Debug, Default)]
pub struct RandomAgent;

impl PlayerAi for RandomAgent {
    type Board = Board;
    type Move = Action;
    type Error = Error;

    fn make_move(&mut self, board: Board) -> Result<Action, Error> {
        let state = Breakthrough::new(board, BLACK);
        let actions = state.legal_actions();
        actions
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(Error::NoMoves)
    }
}

#[cfg(test)]
mod tests {
    use gameplay::games::breakthrough::{initial_board, Cell};

    use super::*;

    #[test]
    fn picks_a_legal_move_for_black() {
        let state = Breakthrough::new(initial_board(), BLACK);
        for _ in 0..20 {
            let action = RandomAgent.make_move(initial_board()).unwrap();
            assert!(state.valid_action(&action));
        }
    }

    #[test]
    fn fails_on_a_finished_game() {
        let mut board = initial_board();
        board[5][0] = Cell::Black;
        assert_eq!(RandomAgent.make_move(board), Err(Error::NoMoves));
    }
}
