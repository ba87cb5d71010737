//! PingPongStrategy Library
//!
//! A limit order strategy that keeps a single order in the market and flips
//! it between a fixed buy price and a fixed sell price, capturing the spread
//! on every round trip.

pub mod common;
pub mod config;
pub mod runtime;
pub mod strategy;

// Re-export commonly used types
pub use common::channels::{create_event_channel, create_event_channel_with_size, HostEvent};
pub use common::errors::{Result, StrategyError};
pub use common::traits::TradingHost;
pub use common::types::{
    ExitReason, Order, OrderId, OrderStatus, OrderUpdate, OrderUpdateStatus, PlaceOrderId,
    RoundingType, Side, StrategyState,
};
pub use config::types::{AppConfig, PaperConfig, PingPongConfig};
pub use runtime::{PaperHost, RunOutcome, StateStore, StrategyRunner};

// Strategy types
pub use strategy::{ControllerPhase, ExpectedGain, PingPongStrategy, Strategy, StrategyConfig};
