//! Inbound host events and channel constructors for delivering them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::types::{Order, OrderId, OrderUpdate, PlaceOrderId};

/// Default channel buffer size
pub const DEFAULT_CHANNEL_SIZE: usize = 1000;

/// Event delivered by the host runtime to the strategy runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostEvent {
    /// Status change of a live order
    OrderUpdate(OrderUpdate),
    /// A placement request was accepted and the order exists
    PlaceOrderSuccess { place_id: PlaceOrderId, order: Order },
    /// A placement request failed
    PlaceOrderError { place_id: PlaceOrderId, error: String },
    /// An order was canceled on request
    CancelOrderSuccess { order_id: OrderId, order: Order },
    /// A cancellation request failed
    CancelOrderError { order_id: OrderId, error: String },
    /// New market price for the paper host to match resting orders against
    MarketPrice(Decimal),
    Suspend,
    Unsuspend,
    /// Stop the strategy and persist its state
    Stop,
}

/// Create a new host event channel with the default buffer size
pub fn create_event_channel() -> (mpsc::Sender<HostEvent>, mpsc::Receiver<HostEvent>) {
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}

/// Create a new host event channel with a custom buffer size
pub fn create_event_channel_with_size(
    size: usize,
) -> (mpsc::Sender<HostEvent>, mpsc::Receiver<HostEvent>) {
    mpsc::channel(size)
}
