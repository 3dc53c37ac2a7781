pub mod breakthrough;

use std::error::Error;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Game {
    Breakthrough,
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakthrough" => Ok(Game::Breakthrough),
            _ => Err(format!("Unknown game: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner { winning_player: usize }, // Index of the winning player
    // Breakthrough always has a winner; other games may end level.
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress { next_player: usize }, // Index of the player who's turn it is
    Over { result: GameResult },
}

pub trait GameState: Default + Clone + Serialize + for<'a> Deserialize<'a> {
    type Error: Error;
    type Action: Serialize + for<'a> Deserialize<'a>;

    fn valid_action(&self, action: &Self::Action) -> bool;
    /// Every action the player to move may take. Empty once the game is over.
    fn legal_actions(&self) -> Vec<Self::Action>;
    fn status(&self) -> GameStatus;
    /// Apply an action. Mutates the game state and returns it's status.
    fn apply_action(&mut self, action: &Self::Action) -> Result<GameStatus, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_game_names() {
        assert_eq!("breakthrough".parse::<Game>(), Ok(Game::Breakthrough));
        assert_eq!("Breakthrough".parse::<Game>(), Ok(Game::Breakthrough));
        assert!("chess".parse::<Game>().is_err());
    }
}
