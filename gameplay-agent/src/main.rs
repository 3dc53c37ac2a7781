use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;

use gameplay_agent::config::Config;
use gameplay_agent::{agents, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Set up tracing
    let local_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let subscriber = tracing_subscriber::registry::Registry::default()
        .with(config.log_level)
        .with(local_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("setting global default failed")?;

    let selector = agents::selector(config.agent, config.simulations);
    if selector.is_none() {
        tracing::warn!("no agent configured, every move request will fail");
    }
    let app = web::app(selector, !config.no_cors);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(%addr, agent = ?config.agent, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
