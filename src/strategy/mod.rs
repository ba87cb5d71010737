//! Strategy module
//!
//! # Lifecycle
//!
//! ```text
//!  init ──► restore_state ──► start ──► callbacks … ──► save_state ──► stop
//! ```
//!
//! # Ping-pong state machine
//!
//! ```text
//! Idle ──place_order──► WaitingPlacement
//! WaitingPlacement ──success, remaining > 0──► HoldingOrder
//! WaitingPlacement ──success, remaining == 0──► WaitingPlacement (opposite side)
//! HoldingOrder ──FILLED──► WaitingPlacement (opposite side, default amount)
//! HoldingOrder ──CANCELED──► WaitingPlacement (same side, remaining amount)
//! HoldingOrder ──ADAPTED / PARTIALLY_FILLED / OTHER_CHANGE──► HoldingOrder
//! ```
//!
//! # Components
//!
//! - [`Strategy`]: Callback trait the host runtime drives
//! - [`PingPongStrategy`]: Single-order buy/sell alternation
//! - [`StrategyConfig`]: Capabilities a strategy requests from the host

mod ping_pong;
mod traits;
mod types;

pub use ping_pong::PingPongStrategy;
pub use traits::Strategy;
pub use types::{ControllerPhase, DataUpdate, ExpectedGain, StrategyConfig};
