//! Agents that ship with the server. Both play Breakthrough as Black, the side
//! moving down the board; clients ask for a White move by inverting the board.

pub mod mcts;
pub mod random;

use std::sync::Arc;

use thiserror::Error;

use crate::agent::{Fresh, MoveSelector};
use crate::config::AgentKind;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Black has no legal move on this board.")]
    NoMoves,
}

pub fn selector(kind: AgentKind, simulations: u32) -> Option<Arc<dyn MoveSelector>> {
    match kind {
        AgentKind::None => None,
        AgentKind::Random => Some(Arc::new(Fresh::<random::RandomAgent>::new())),
        AgentKind::Mcts => Some(Arc::new(Fresh::with(move || {
            mcts::MctsAgent::new(simulations)
        }))),
    }
}
