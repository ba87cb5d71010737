//! Common test utilities and fixtures
#![allow(dead_code)]

use ping_pong_strategy::Result as StrategyResult;
use ping_pong_strategy::{
    Order, OrderId, PaperConfig, PaperHost, PingPongConfig, PlaceOrderId, RoundingType, Side,
    TradingHost,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strategy parameters used throughout the scenarios
pub fn sample_config() -> PingPongConfig {
    PingPongConfig::new(dec!(0.0207), dec!(0.0212), dec!(0.1), true)
}

/// Paper host without fees, so gains are easy to reason about
pub fn fee_free_host() -> PaperHost {
    PaperHost::new(PaperConfig {
        fee_percent: Decimal::ZERO,
        ..PaperConfig::default()
    })
}

/// Create an open order resting at the configured price for its side
pub fn resting_order(id: u64, side: Side, remaining: Decimal) -> Order {
    let price = sample_config().price_for(side);
    Order::new(OrderId(id), side, price, dec!(0.1)).with_remaining(remaining)
}

/// A placement the strategy asked a host for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
}

impl Placed {
    pub fn new(side: Side, amount: Decimal, price: Decimal) -> Self {
        Self {
            side,
            amount,
            price,
        }
    }
}

/// Host that accepts every order and only records what was asked of it
///
/// Nothing is ever confirmed; tests deliver callbacks by hand.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub placed: Vec<Placed>,
    pub open_orders: Vec<Order>,
    next_place_id: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open_orders(open_orders: Vec<Order>) -> Self {
        Self {
            open_orders,
            ..Self::default()
        }
    }

    /// Place id handed out for the most recent placement
    pub fn last_place_id(&self) -> PlaceOrderId {
        PlaceOrderId(self.next_place_id)
    }
}

impl TradingHost for RecordingHost {
    fn due_buy_total(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount * price
    }

    fn sell_total_to_receive(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount * price
    }

    fn round_amount(&self, amount: Decimal, _rounding: RoundingType) -> Decimal {
        amount
    }

    fn is_limit_order_valid(&self, _side: Side, amount: Decimal, price: Decimal) -> bool {
        amount > Decimal::ZERO && price > Decimal::ZERO
    }

    fn place_limit_order(
        &mut self,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> StrategyResult<PlaceOrderId> {
        self.next_place_id += 1;
        self.placed.push(Placed::new(side, amount, price));
        Ok(PlaceOrderId(self.next_place_id))
    }

    fn buffered_open_orders(&self) -> Vec<Order> {
        self.open_orders.clone()
    }

    fn second_currency(&self) -> String {
        "BTC".to_string()
    }
}

/// Persisted snapshots as the host runtime stores them
pub mod state_snapshots {
    /// Snapshot tracking order 42
    pub const TRACKING_42: &str = r#"{"current_order_id": "42"}"#;

    /// Snapshot of a strategy with nothing tracked
    pub const EMPTY: &str = "{}";

    /// Snapshot with an identifier that is not a decimal number
    pub const MALFORMED: &str = r#"{"current_order_id": "0x2a"}"#;
}
