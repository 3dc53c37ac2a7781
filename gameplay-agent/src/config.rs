use std::net::{IpAddr, SocketAddr};

use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::agents::mcts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Nothing plugged in. Every move request fails.
    None,
    /// A uniformly random legal Breakthrough move.
    Random,
    /// Flat Monte Carlo playouts over every legal Breakthrough move.
    Mcts,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serve a game-playing agent over HTTP", long_about = None)]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Agent answering `POST /`.
    #[arg(long, env = "AGENT", value_enum, default_value_t = AgentKind::None)]
    pub agent: AgentKind,

    /// Playouts per candidate move for the `mcts` agent.
    #[arg(long, env = "SIMULATIONS", default_value_t = mcts::SIMULATIONS)]
    pub simulations: u32,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Leave out the permissive CORS headers.
    #[arg(long, env = "NO_CORS", value_parser = BoolishValueParser::new())]
    pub no_cors: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
