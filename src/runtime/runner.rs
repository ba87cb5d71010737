//! Strategy runner
//!
//! Delivers host events to a strategy strictly one at a time. Events the
//! paper host queues while a callback runs are delivered right after that
//! callback returns, in the order they were queued.

use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::common::channels::HostEvent;
use crate::common::errors::Result;
use crate::common::types::{ExitReason, StrategyState};
use crate::runtime::paper::PaperHost;
use crate::strategy::Strategy;

/// How a strategy run ended
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub reason: ExitReason,
    /// Error text when the run ended with [`ExitReason::Error`]
    pub message: Option<String>,
    /// Snapshot taken after the last event
    pub final_state: StrategyState,
    /// Placement requests issued during the run
    pub orders_placed: usize,
}

/// Runs one strategy against a paper host
pub struct StrategyRunner<S: Strategy> {
    strategy: S,
    host: PaperHost,
}

impl<S: Strategy> StrategyRunner<S> {
    pub fn new(strategy: S, host: PaperHost) -> Self {
        Self { strategy, host }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn host(&self) -> &PaperHost {
        &self.host
    }

    /// Direct access to the paper host, for injecting fills and cancels
    pub fn host_mut(&mut self) -> &mut PaperHost {
        &mut self.host
    }

    /// Initialize the strategy, restore a previous snapshot and start trading
    ///
    /// `start` is skipped when the snapshot resolved to a still-open order,
    /// since that order is already in the market.
    #[instrument(skip(self, restored), fields(strategy = self.strategy.name()))]
    pub fn launch(&mut self, restored: Option<&StrategyState>) -> Result<()> {
        let requested = self.strategy.strategy_config();
        info!(
            normalize_buy_amounts = requested.normalize_exchange_buy_amounts,
            data_updates = requested.required_data_updates.len(),
            "initializing strategy"
        );
        self.strategy.init(&mut self.host)?;

        if let Some(state) = restored {
            self.strategy.restore_state(&mut self.host, state)?;
        }

        if self.strategy.is_tracking_order() {
            info!("resuming with restored order, not placing a new one");
        } else {
            self.strategy.start(&mut self.host)?;
        }
        self.deliver_pending()
    }

    /// Deliver one event, then everything the host queued in response
    ///
    /// # Returns
    /// `false` once the strategy has been stopped
    pub fn dispatch(&mut self, event: HostEvent) -> Result<bool> {
        let keep_running = self.handle(event)?;
        self.deliver_pending()?;
        Ok(keep_running)
    }

    /// Receive events until stopped, the channel closes, or the strategy fails
    #[instrument(skip_all)]
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> RunOutcome {
        loop {
            let Some(event) = events.recv().await else {
                warn!("event channel closed, stopping strategy");
                return match self.strategy.stop(&mut self.host) {
                    Ok(()) => self.finish(ExitReason::Finished, None),
                    Err(e) => self.finish(ExitReason::Error, Some(e.to_string())),
                };
            };

            match self.dispatch(event) {
                Ok(true) => {}
                Ok(false) => return self.finish(ExitReason::Finished, None),
                Err(e) => {
                    error!("strategy exited with error: {}", e);
                    return self.finish(ExitReason::Error, Some(e.to_string()));
                }
            }
        }
    }

    /// Consume the runner and report how it ended
    pub fn finish(self, reason: ExitReason, message: Option<String>) -> RunOutcome {
        let outcome = RunOutcome {
            reason,
            message,
            final_state: self.strategy.save_state(),
            orders_placed: self.host.placements().len(),
        };
        info!(
            reason = %outcome.reason,
            orders_placed = outcome.orders_placed,
            "strategy run finished"
        );
        outcome
    }

    fn handle(&mut self, event: HostEvent) -> Result<bool> {
        let host = &mut self.host;
        match event {
            HostEvent::OrderUpdate(update) => self.strategy.on_order_update(host, &update)?,
            HostEvent::PlaceOrderSuccess { place_id, order } => {
                self.strategy.on_place_order_success(host, place_id, &order)?
            }
            HostEvent::PlaceOrderError { place_id, error } => {
                self.strategy.on_place_order_error(host, place_id, &error)?
            }
            HostEvent::CancelOrderSuccess { order_id, order } => {
                self.strategy.on_cancel_order_success(host, order_id, &order)?
            }
            HostEvent::CancelOrderError { order_id, error } => {
                self.strategy.on_cancel_order_error(host, order_id, &error)?
            }
            HostEvent::MarketPrice(price) => {
                host.apply_market_price(price);
            }
            HostEvent::Suspend => self.strategy.suspend(host)?,
            HostEvent::Unsuspend => self.strategy.unsuspend(host)?,
            HostEvent::Stop => {
                self.strategy.stop(host)?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Deliver everything the host has queued, including events queued meanwhile
    pub fn deliver_pending(&mut self) -> Result<()> {
        loop {
            let queued = self.host.drain_events();
            if queued.is_empty() {
                return Ok(());
            }
            for event in queued {
                self.handle(event)?;
            }
        }
    }
}
