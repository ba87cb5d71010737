//! PingPongStrategy - Main Entry Point
//!
//! Runs the ping-pong strategy against the paper host, replaying the
//! configured market price path until stopped.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ping_pong_strategy::config::load_config;
use ping_pong_strategy::{
    create_event_channel, ExitReason, HostEvent, PaperHost, PingPongStrategy, StateStore,
    StrategyRunner,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Path of the persisted strategy state; overrides the config file
    #[arg(long, env = "PINGPONG_STATE_FILE")]
    state_file: Option<String>,

    /// Milliseconds between simulated market prices; overrides the config file
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Stop after this many simulated market prices
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(Some(args.config.as_str()))?;

    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting PingPongStrategy application");
    info!("Configuration file: {}", args.config);
    info!(
        buy_price = %config.strategy.buy_price,
        sell_price = %config.strategy.sell_price,
        amount = %config.strategy.amount,
        start_on_buy = config.strategy.start_on_buy,
        "strategy parameters"
    );

    let store = StateStore::new(
        args.state_file
            .clone()
            .unwrap_or_else(|| config.settings.state_file.clone()),
    );
    let restored = store.load()?;
    if restored.is_some() {
        info!("Restoring strategy state from {}", store.path().display());
    }

    let strategy = PingPongStrategy::new(config.strategy.clone())?;
    let mut runner = StrategyRunner::new(strategy, PaperHost::new(config.paper.clone()));
    if let Err(e) = runner.launch(restored.as_ref()) {
        error!("Strategy failed to launch: {}", e);
        return Err(e.into());
    }

    let (sender, receiver) = create_event_channel();

    let price_path = config.paper.price_path.clone();
    let tick = Duration::from_millis(args.tick_ms.unwrap_or(config.settings.tick_interval_ms));
    let max_ticks = args.max_ticks;
    let feed_sender = sender.clone();
    tokio::spawn(async move {
        if price_path.is_empty() {
            warn!("No price path configured, the paper market will not move");
            return;
        }
        let mut interval = tokio::time::interval(tick);
        let mut ticks = 0u64;
        for price in price_path.iter().cycle() {
            if max_ticks.is_some_and(|max| ticks >= max) {
                info!("Reached {} simulated prices, stopping", ticks);
                let _ = feed_sender.send(HostEvent::Stop).await;
                return;
            }
            interval.tick().await;
            if feed_sender.send(HostEvent::MarketPrice(*price)).await.is_err() {
                return;
            }
            ticks += 1;
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal, cleaning up...");
            let _ = sender.send(HostEvent::Stop).await;
        }
    });

    let outcome = runner.run(receiver).await;
    store.save(&outcome.final_state)?;
    info!(
        "Strategy state saved to {} after {} placements",
        store.path().display(),
        outcome.orders_placed
    );

    if outcome.reason == ExitReason::Error {
        bail!(outcome
            .message
            .unwrap_or_else(|| "strategy exited with an error".to_string()));
    }

    Ok(())
}
