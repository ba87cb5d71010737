//! Ping-pong strategy
//!
//! Keeps exactly one limit order in the market. When the order fills, the
//! opposite side is placed at its fixed price; when it is canceled, the
//! remaining amount is resubmitted on the same side. Buying below and selling
//! above captures the spread on every round trip.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::common::errors::{Result, StrategyError};
use crate::common::traits::TradingHost;
use crate::common::types::{
    Order, OrderId, OrderUpdate, OrderUpdateStatus, PlaceOrderId, RoundingType, Side,
    StrategyState, CURRENT_ORDER_ID_KEY,
};
use crate::config::types::PingPongConfig;
use crate::strategy::traits::Strategy;
use crate::strategy::types::{ControllerPhase, ExpectedGain, StrategyConfig};

/// Single-order ping-pong controller
#[derive(Debug, Clone)]
pub struct PingPongStrategy {
    config: PingPongConfig,
    /// Resting order confirmed by the host
    current_order: Option<Order>,
    /// Placement request awaiting confirmation
    waiting_order_id: Option<PlaceOrderId>,
}

impl PingPongStrategy {
    /// Create a strategy, refusing configurations that would trade at a loss
    pub fn new(config: PingPongConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current_order: None,
            waiting_order_id: None,
        })
    }

    pub fn config(&self) -> &PingPongConfig {
        &self.config
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn waiting_order_id(&self) -> Option<PlaceOrderId> {
        self.waiting_order_id
    }

    pub fn phase(&self) -> ControllerPhase {
        if self.current_order.is_some() {
            ControllerPhase::HoldingOrder
        } else if self.waiting_order_id.is_some() {
            ControllerPhase::WaitingPlacement
        } else {
            ControllerPhase::Idle
        }
    }

    /// Gain of one buy-sell cycle at the configured prices, after host fees
    pub fn expected_gain(&self, host: &dyn TradingHost) -> ExpectedGain {
        let buy_total = host.due_buy_total(self.config.amount, self.config.buy_price);
        let sell_total = host.sell_total_to_receive(self.config.amount, self.config.sell_price);
        ExpectedGain::from_totals(buy_total, sell_total)
    }

    /// Request a limit order at the fixed price for `side`
    fn place_order(&mut self, host: &mut dyn TradingHost, side: Side, amount: Decimal) -> Result<()> {
        let price = self.config.price_for(side);
        info!("placing {} order: {} @ {}", side, amount, price);

        let amount = host.round_amount(amount, RoundingType::Round);
        if !host.is_limit_order_valid(side, amount, price) {
            return Err(StrategyError::OrderRejected {
                side,
                amount,
                price,
            });
        }

        let place_id = host.place_limit_order(side, amount, price)?;
        debug!(%place_id, "waiting for placement confirmation");
        self.waiting_order_id = Some(place_id);
        Ok(())
    }

    /// Tracked order the update refers to, if any
    ///
    /// Updates for any other order are ignored so that at most one order is
    /// ever live, e.g. a late fill for an order a restore could not find.
    fn tracked_order_for(&self, update: &OrderUpdate) -> Option<&Order> {
        match &self.current_order {
            Some(order) if order.id == update.updated_order.id => Some(order),
            tracked => {
                warn!(
                    order_id = %update.updated_order.id,
                    tracked = ?tracked.as_ref().map(|o| o.id),
                    status = %update.status,
                    "ignoring update for an untracked order"
                );
                None
            }
        }
    }
}

impl Strategy for PingPongStrategy {
    fn name(&self) -> &str {
        "ping_pong"
    }

    fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig {
            required_data_updates: Default::default(),
            normalize_exchange_buy_amounts: true,
        }
    }

    fn init(&mut self, host: &mut dyn TradingHost) -> Result<()> {
        self.config.validate()?;
        let gain = self.expected_gain(host);
        info!(
            "Strategy is going to be run with an expected effective gain of approx. {} {} ({}%) per buy-sell-cycle.",
            gain.effective_gain,
            host.second_currency(),
            gain.gain_percent
        );
        Ok(())
    }

    fn start(&mut self, host: &mut dyn TradingHost) -> Result<()> {
        self.place_order(host, self.config.start_side(), self.config.amount)
    }

    fn stop(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        info!(phase = ?self.phase(), "stopping, tracked order stays in the market");
        Ok(())
    }

    fn suspend(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        info!("suspended");
        Ok(())
    }

    fn unsuspend(&mut self, _host: &mut dyn TradingHost) -> Result<()> {
        info!("unsuspended");
        Ok(())
    }

    fn on_order_update(&mut self, host: &mut dyn TradingHost, update: &OrderUpdate) -> Result<()> {
        info!(order_id = %update.updated_order.id, "order update status was: {}", update.status);

        match update.status {
            OrderUpdateStatus::Filled | OrderUpdateStatus::AdaptedAndFilled => {
                let Some(side) = self.tracked_order_for(update).map(|o| o.side) else {
                    return Ok(());
                };
                self.place_order(host, side.opposite(), self.config.amount)?;
                self.current_order = None;
            }
            OrderUpdateStatus::Adapted
            | OrderUpdateStatus::PartiallyFilled
            | OrderUpdateStatus::OtherChange => {
                if self.tracked_order_for(update).is_some() {
                    self.current_order = Some(update.updated_order.clone());
                }
            }
            OrderUpdateStatus::NoChange => {}
            // Left alone until the host defines what a reappearing or
            // vanishing order should mean for the tracked state.
            OrderUpdateStatus::Reappeared | OrderUpdateStatus::Disappeared => {
                debug!(order_id = %update.updated_order.id, "ignoring {}", update.status);
            }
            OrderUpdateStatus::Canceled => {
                let Some(side) = self.tracked_order_for(update).map(|o| o.side) else {
                    return Ok(());
                };
                // The host's view of the remainder is newer than the tracked copy
                self.place_order(host, side, update.updated_order.remaining_amount)?;
                self.current_order = None;
            }
        }
        Ok(())
    }

    fn on_place_order_success(
        &mut self,
        host: &mut dyn TradingHost,
        place_id: PlaceOrderId,
        order: &Order,
    ) -> Result<()> {
        if self.waiting_order_id != Some(place_id) {
            warn!("Did not have waiting order id for {}", place_id);
            return Ok(());
        }

        if order.is_fully_filled() {
            info!(order_id = %order.id, "order filled on placement");
            self.place_order(host, order.side.opposite(), self.config.amount)
        } else {
            self.current_order = Some(order.clone());
            self.waiting_order_id = None;
            Ok(())
        }
    }

    fn on_place_order_error(
        &mut self,
        _host: &mut dyn TradingHost,
        place_id: PlaceOrderId,
        error: &str,
    ) -> Result<()> {
        Err(StrategyError::PlaceOrderFailed {
            place_id,
            reason: error.to_string(),
        })
    }

    fn on_cancel_order_success(
        &mut self,
        _host: &mut dyn TradingHost,
        order_id: OrderId,
        _canceled_order: &Order,
    ) -> Result<()> {
        Err(StrategyError::UnexpectedCancellation(order_id))
    }

    fn on_cancel_order_error(
        &mut self,
        _host: &mut dyn TradingHost,
        order_id: OrderId,
        error: &str,
    ) -> Result<()> {
        Err(StrategyError::CancelOrderFailed {
            order_id,
            reason: error.to_string(),
        })
    }

    fn save_state(&self) -> StrategyState {
        let mut state = StrategyState::new();
        if let Some(order) = &self.current_order {
            state.insert(CURRENT_ORDER_ID_KEY.to_string(), order.id.to_string());
        }
        state
    }

    fn restore_state(&mut self, host: &mut dyn TradingHost, state: &StrategyState) -> Result<()> {
        let Some(raw_id) = state.get(CURRENT_ORDER_ID_KEY) else {
            return Ok(());
        };
        let order_id: OrderId = raw_id.parse().map_err(|e| {
            StrategyError::InvalidState(format!(
                "{} {:?} is not an order id: {}",
                CURRENT_ORDER_ID_KEY, raw_id, e
            ))
        })?;

        match host
            .buffered_open_orders()
            .into_iter()
            .find(|order| order.id == order_id)
        {
            Some(order) => {
                info!(%order_id, "restored tracked order");
                self.current_order = Some(order);
            }
            None => warn!(%order_id, "persisted order is no longer open, starting empty"),
        }
        Ok(())
    }

    fn is_tracking_order(&self) -> bool {
        self.current_order.is_some()
    }
}
