use std::error::Error;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A game-playing agent. Given a board, it produces a move.
///
/// The endpoint knows nothing about the shape of either; they only have to
/// round trip through JSON. A fresh agent is built for every request.
pub trait PlayerAi {
    type Board: DeserializeOwned;
    type Move: Serialize;
    type Error: Error + Send + Sync + 'static;

    fn make_move(&mut self, board: Self::Board) -> Result<Self::Move, Self::Error>;
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Board does not match what the agent expects: {0}")]
    InvalidBoard(#[source] serde_json::Error),
    #[error("Agent failed: {0}")]
    Agent(#[source] Box<dyn Error + Send + Sync>),
    #[error("Move could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// What the route holds: board in, move out, both as plain JSON.
pub trait MoveSelector: Send + Sync {
    fn select(&self, board: Value) -> Result<Value, AgentError>;
}

impl<F> MoveSelector for F
where
    F: Fn(Value) -> Result<Value, AgentError> + Send + Sync,
{
    fn select(&self, board: Value) -> Result<Value, AgentError> {
        self(board)
    }
}

/// Builds a new `A` for every board it is asked about.
pub struct Fresh<A> {
    build: Box<dyn Fn() -> A + Send + Sync>,
}

impl<A: PlayerAi + Default + 'static> Fresh<A> {
    pub fn new() -> Self {
        Self::with(A::default)
    }
}

impl<A: PlayerAi + Default + 'static> Default for Fresh<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PlayerAi + 'static> Fresh<A> {
    pub fn with(build: impl Fn() -> A + Send + Sync + 'static) -> Self {
        Self {
            build: Box::new(build),
        }
    }
}

impl<A> fmt::Debug for Fresh<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fresh")
            .field("agent", &std::any::type_name::<A>())
            .finish()
    }
}

impl<A: PlayerAi> MoveSelector for Fresh<A> {
    fn select(&self, board: Value) -> Result<Value, AgentError> {
        let board = serde_json::from_value(board).map_err(AgentError::InvalidBoard)?;
        let mut agent = (self.build)();
        let action = agent
            .make_move(board)
            .map_err(|e| AgentError::Agent(Box::new(e)))?;
        serde_json::to_value(action).map_err(AgentError::Encode)
    }
}
