//! Trait definitions for the host runtime boundary

use rust_decimal::Decimal;

use super::errors::Result;
use super::types::{Order, PlaceOrderId, RoundingType, Side};

/// Outbound calls a strategy makes into its host runtime
///
/// The host owns exchange connectivity, capability rules and order
/// bookkeeping. Strategies only ask questions and request placements;
/// results of a placement arrive later as inbound callbacks.
#[cfg_attr(test, mockall::automock)]
pub trait TradingHost {
    /// Total the account pays to buy `amount` at `price`, fees included
    fn due_buy_total(&self, amount: Decimal, price: Decimal) -> Decimal;

    /// Total the account receives for selling `amount` at `price`, fees deducted
    fn sell_total_to_receive(&self, amount: Decimal, price: Decimal) -> Decimal;

    /// Round an amount to the exchange's amount precision
    fn round_amount(&self, amount: Decimal, rounding: RoundingType) -> Decimal;

    /// Check whether a limit order would be accepted by the exchange
    fn is_limit_order_valid(&self, side: Side, amount: Decimal, price: Decimal) -> bool;

    /// Request placement of a limit order
    ///
    /// # Returns
    /// The identifier later echoed by the placement success/error callback
    fn place_limit_order(&mut self, side: Side, amount: Decimal, price: Decimal)
        -> Result<PlaceOrderId>;

    /// Orders currently open on the exchange, as last seen by the host
    fn buffered_open_orders(&self) -> Vec<Order>;

    /// Quote currency of the traded pair
    fn second_currency(&self) -> String;
}
