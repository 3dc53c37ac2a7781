pub mod agent;
pub mod agents;
pub mod config;
pub mod error;
pub mod web;

pub use agent::{AgentError, Fresh, MoveSelector, PlayerAi};
pub use web::app;
