//! Error types for the strategy and its runtime

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{OrderId, PlaceOrderId, Side};

/// Result type alias using our StrategyError
pub type Result<T> = std::result::Result<T, StrategyError>;

/// Main error type for strategy operations
///
/// Any of these reaching the runner terminates the strategy with
/// `ExitReason::Error` and the error text.
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Configured prices would make the strategy trade at a loss
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The host refused a prospective limit order
    #[error("Limit order rejected by host: {side} {amount} @ {price}")]
    OrderRejected {
        side: Side,
        amount: Decimal,
        price: Decimal,
    },

    /// The host reported that a placement request failed
    #[error("Placing order {place_id} failed: {reason}")]
    PlaceOrderFailed {
        place_id: PlaceOrderId,
        reason: String,
    },

    /// The host reported that a cancellation request failed
    #[error("Canceling order {order_id} failed: {reason}")]
    CancelOrderFailed { order_id: OrderId, reason: String },

    /// The strategy never cancels, so a cancel confirmation breaks its invariants
    #[error("Strategy is not supposed to cancel an order, but order {0} was canceled")]
    UnexpectedCancellation(OrderId),

    /// Persisted or tracked state is inconsistent
    #[error("Invalid strategy state: {0}")]
    InvalidState(String),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// State file read/write errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<config::ConfigError> for StrategyError {
    fn from(err: config::ConfigError) -> Self {
        StrategyError::Configuration(err.to_string())
    }
}
