//! Domain types shared between the strategy and its host runtime

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persisted strategy snapshot (string keys to string values)
pub type StrategyState = BTreeMap<String, String>;

/// Key under which the tracked order id is persisted
pub const CURRENT_ORDER_ID_KEY: &str = "current_order_id";

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Map the host's boolean side flag onto a side
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    /// The side a ping-pong flip moves to
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Identifier of a live order, assigned by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(OrderId)
    }
}

/// Identifier of a placement request, returned before the order exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceOrderId(pub u64);

impl std::fmt::Display for PlaceOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Canceled,
}

/// A limit order owned by the host runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    /// Limit price
    pub price: Decimal,
    /// Originally requested amount
    pub amount: Decimal,
    /// Unexecuted amount left on the order
    pub remaining_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new open order with nothing executed yet
    pub fn new(id: OrderId, side: Side, price: Decimal, amount: Decimal) -> Self {
        Self {
            id,
            side,
            price,
            amount,
            remaining_amount: amount,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        }
    }

    pub fn with_remaining(mut self, remaining_amount: Decimal) -> Self {
        self.remaining_amount = remaining_amount;
        if remaining_amount.is_zero() {
            self.status = OrderStatus::Filled;
        }
        self
    }

    /// Amount executed so far
    pub fn filled_amount(&self) -> Decimal {
        self.amount - self.remaining_amount
    }

    pub fn is_fully_filled(&self) -> bool {
        self.remaining_amount.is_zero()
    }
}

/// What changed about an order since the host last reported it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderUpdateStatus {
    NoChange,
    Filled,
    AdaptedAndFilled,
    Adapted,
    PartiallyFilled,
    OtherChange,
    Reappeared,
    Disappeared,
    Canceled,
}

impl std::fmt::Display for OrderUpdateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderUpdateStatus::NoChange => "NO_CHANGE",
            OrderUpdateStatus::Filled => "FILLED",
            OrderUpdateStatus::AdaptedAndFilled => "ADAPTED_AND_FILLED",
            OrderUpdateStatus::Adapted => "ADAPTED",
            OrderUpdateStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderUpdateStatus::OtherChange => "OTHER_CHANGE",
            OrderUpdateStatus::Reappeared => "REAPPEARED",
            OrderUpdateStatus::Disappeared => "DISAPPEARED",
            OrderUpdateStatus::Canceled => "CANCELED",
        };
        write!(f, "{}", name)
    }
}

/// Order update notification delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: OrderUpdateStatus,
    /// The order as it looks after the change
    pub updated_order: Order,
}

impl OrderUpdate {
    pub fn new(status: OrderUpdateStatus, updated_order: Order) -> Self {
        Self {
            status,
            updated_order,
        }
    }
}

/// Rounding mode for amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingType {
    Round,
    Floor,
    Ceil,
}

/// Why a strategy run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitReason {
    /// Stopped on request
    Finished,
    /// Terminated by a fatal strategy error
    Error,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitReason::Finished => write!(f, "finished"),
            ExitReason::Error => write!(f, "error"),
        }
    }
}
