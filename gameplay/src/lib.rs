pub mod games;

pub use games::{Game, GameResult, GameState, GameStatus};
