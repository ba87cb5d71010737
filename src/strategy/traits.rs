use crate::common::errors::Result;
use crate::common::traits::TradingHost;
use crate::common::types::{Order, OrderId, OrderUpdate, PlaceOrderId, StrategyState};
use crate::strategy::types::StrategyConfig;

/// Core strategy trait
///
/// The host runtime drives a strategy through these callbacks, one at a time,
/// and the strategy answers by calling back into the [`TradingHost`].
///
/// # Implementation Notes
///
/// - Callbacks must not block; all waiting happens between callbacks
/// - Returning `Err` terminates the strategy with the error text
/// - Lifecycle order is `init`, optionally `restore_state`, then `start`
pub trait Strategy {
    /// Unique identifier for this strategy
    fn name(&self) -> &str;

    /// Capabilities the host must provide
    fn strategy_config(&self) -> StrategyConfig;

    /// Called once before anything else
    fn init(&mut self, host: &mut dyn TradingHost) -> Result<()>;

    /// Called once trading may begin
    fn start(&mut self, host: &mut dyn TradingHost) -> Result<()>;

    /// Called when the strategy is being shut down
    fn stop(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        Ok(())
    }

    /// Called when trading is paused by the host
    fn suspend(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        Ok(())
    }

    /// Called when trading resumes after a suspend
    fn unsuspend(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        Ok(())
    }

    /// Called when a live order changes
    fn on_order_update(&mut self, host: &mut dyn TradingHost, update: &OrderUpdate) -> Result<()>;

    /// Called when a placement request produced a live order
    fn on_place_order_success(
        &mut self,
        host: &mut dyn TradingHost,
        place_id: PlaceOrderId,
        order: &Order,
    ) -> Result<()>;

    /// Called when a placement request failed
    fn on_place_order_error(
        &mut self,
        host: &mut dyn TradingHost,
        place_id: PlaceOrderId,
        error: &str,
    ) -> Result<()>;

    /// Called when an order was canceled on request
    fn on_cancel_order_success(
        &mut self,
        host: &mut dyn TradingHost,
        order_id: OrderId,
        canceled_order: &Order,
    ) -> Result<()>;

    /// Called when a cancellation request failed
    fn on_cancel_order_error(
        &mut self,
        host: &mut dyn TradingHost,
        order_id: OrderId,
        error: &str,
    ) -> Result<()>;

    /// Snapshot of the state needed to resume after a restart
    fn save_state(&self) -> StrategyState;

    /// Resume from a snapshot produced by [`Strategy::save_state`]
    fn restore_state(&mut self, host: &mut dyn TradingHost, state: &StrategyState) -> Result<()>;

    /// Whether a restored order is already being tracked
    ///
    /// Hosts skip `start` when this is true so a restart does not place twice.
    fn is_tracking_order(&self) -> bool {
        false
    }
}
