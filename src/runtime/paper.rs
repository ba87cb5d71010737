//! In-memory paper trading host
//!
//! Stands in for the exchange-connected runtime. Limit orders rest in memory
//! and fill when a market price crosses them; every outcome is queued as a
//! [`HostEvent`] for the runner to deliver.

use std::collections::{BTreeMap, VecDeque};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::common::channels::HostEvent;
use crate::common::errors::{Result, StrategyError};
use crate::common::traits::TradingHost;
use crate::common::types::{
    Order, OrderId, OrderStatus, OrderUpdate, OrderUpdateStatus, PlaceOrderId, RoundingType, Side,
};
use crate::config::types::PaperConfig;

/// A placement request as received by the paper host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub place_id: PlaceOrderId,
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
}

/// Paper trading host
#[derive(Debug)]
pub struct PaperHost {
    config: PaperConfig,
    next_place_id: u64,
    next_order_id: u64,
    open_orders: BTreeMap<OrderId, Order>,
    pending_events: VecDeque<HostEvent>,
    placements: Vec<PlacementRequest>,
    last_price: Option<Decimal>,
    placement_failure: Option<String>,
}

impl PaperHost {
    pub fn new(config: PaperConfig) -> Self {
        Self {
            config,
            next_place_id: 1,
            next_order_id: 1,
            open_orders: BTreeMap::new(),
            pending_events: VecDeque::new(),
            placements: Vec::new(),
            last_price: None,
            placement_failure: None,
        }
    }

    /// Every placement request received so far, oldest first
    pub fn placements(&self) -> &[PlacementRequest] {
        &self.placements
    }

    pub fn open_order(&self, order_id: OrderId) -> Option<&Order> {
        self.open_orders.get(&order_id)
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.last_price
    }

    /// Seed an order that is already resting, e.g. one left over from a previous run
    pub fn insert_open_order(&mut self, order: Order) {
        self.next_order_id = self.next_order_id.max(order.id.0 + 1);
        self.open_orders.insert(order.id, order);
    }

    /// Make the next placement request fail with `reason`
    pub fn fail_next_placement(&mut self, reason: impl Into<String>) {
        self.placement_failure = Some(reason.into());
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.pending_events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Match resting orders against a new market price
    ///
    /// Buys fill when the market trades at or below their limit, sells at or
    /// above. Returns the number of orders filled.
    pub fn apply_market_price(&mut self, price: Decimal) -> usize {
        self.last_price = Some(price);

        let crossed: Vec<OrderId> = self
            .open_orders
            .values()
            .filter(|order| crosses(order.side, order.price, price))
            .map(|order| order.id)
            .collect();

        for order_id in &crossed {
            if let Some(order) = self.open_orders.remove(order_id) {
                info!(%order_id, side = %order.side, %price, "paper fill");
                let filled = order.with_remaining(Decimal::ZERO);
                self.queue_update(OrderUpdateStatus::Filled, filled);
            }
        }
        crossed.len()
    }

    /// Execute part of a resting order
    pub fn partially_fill(&mut self, order_id: OrderId, amount: Decimal) -> Result<()> {
        let order = self
            .open_orders
            .get_mut(&order_id)
            .ok_or_else(|| StrategyError::InvalidState(format!("no open paper order {}", order_id)))?;

        let remaining = (order.remaining_amount - amount).max(Decimal::ZERO);
        order.remaining_amount = remaining;

        if remaining.is_zero() {
            if let Some(order) = self.open_orders.remove(&order_id) {
                let filled = order.with_remaining(Decimal::ZERO);
                self.queue_update(OrderUpdateStatus::Filled, filled);
            }
        } else {
            let updated = order.clone();
            self.queue_update(OrderUpdateStatus::PartiallyFilled, updated);
        }
        Ok(())
    }

    /// Cancel a resting order, as an exchange or operator would
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<()> {
        let mut order = self
            .open_orders
            .remove(&order_id)
            .ok_or_else(|| StrategyError::InvalidState(format!("no open paper order {}", order_id)))?;
        order.status = OrderStatus::Canceled;
        self.queue_update(OrderUpdateStatus::Canceled, order);
        Ok(())
    }

    fn queue_update(&mut self, status: OrderUpdateStatus, order: Order) {
        self.pending_events
            .push_back(HostEvent::OrderUpdate(OrderUpdate::new(status, order)));
    }

    fn fee_rate(&self) -> Decimal {
        self.config.fee_percent / Decimal::ONE_HUNDRED
    }
}

fn crosses(side: Side, limit: Decimal, market: Decimal) -> bool {
    match side {
        Side::Buy => market <= limit,
        Side::Sell => market >= limit,
    }
}

impl TradingHost for PaperHost {
    fn due_buy_total(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount * price * (Decimal::ONE + self.fee_rate())
    }

    fn sell_total_to_receive(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount * price * (Decimal::ONE - self.fee_rate())
    }

    fn round_amount(&self, amount: Decimal, rounding: RoundingType) -> Decimal {
        let strategy = match rounding {
            RoundingType::Round => RoundingStrategy::MidpointAwayFromZero,
            RoundingType::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingType::Ceil => RoundingStrategy::ToPositiveInfinity,
        };
        amount.round_dp_with_strategy(self.config.amount_precision, strategy)
    }

    fn is_limit_order_valid(&self, _side: Side, amount: Decimal, price: Decimal) -> bool {
        amount >= self.config.min_amount && price > Decimal::ZERO
    }

    fn place_limit_order(
        &mut self,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> Result<PlaceOrderId> {
        let place_id = PlaceOrderId(self.next_place_id);
        self.next_place_id += 1;
        self.placements.push(PlacementRequest {
            place_id,
            side,
            amount,
            price,
        });

        if let Some(error) = self.placement_failure.take() {
            self.pending_events
                .push_back(HostEvent::PlaceOrderError { place_id, error });
            return Ok(place_id);
        }

        let order_id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        let order = Order::new(order_id, side, price, amount);

        // A limit that is already marketable executes on arrival
        let order = match self.last_price {
            Some(market) if crosses(side, price, market) => {
                debug!(%order_id, %market, "paper order filled on placement");
                order.with_remaining(Decimal::ZERO)
            }
            _ => {
                self.open_orders.insert(order_id, order.clone());
                order
            }
        };

        self.pending_events
            .push_back(HostEvent::PlaceOrderSuccess { place_id, order });
        Ok(place_id)
    }

    fn buffered_open_orders(&self) -> Vec<Order> {
        self.open_orders.values().cloned().collect()
    }

    fn second_currency(&self) -> String {
        self.config.second_currency.clone()
    }
}
