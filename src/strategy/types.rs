use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market data feeds a strategy can ask the host to deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataUpdate {
    Orderbook,
    PublicTrades,
    Ticker,
}

/// Capabilities a strategy requests from its host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyConfig {
    /// Market data the host must stream to the strategy
    pub required_data_updates: HashSet<DataUpdate>,
    /// Whether the host should normalize buy amounts reported by the exchange
    pub normalize_exchange_buy_amounts: bool,
}

/// Which of its three states the single-order controller is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerPhase {
    /// Nothing placed and nothing tracked
    Idle,
    /// A placement was requested and its confirmation is outstanding
    WaitingPlacement,
    /// A resting order is tracked
    HoldingOrder,
}

/// Expected result of one buy-sell cycle after fees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedGain {
    /// Quote currency received minus quote currency paid
    pub effective_gain: Decimal,
    /// Gain relative to the buy total, in percent
    pub gain_percent: Decimal,
}

impl ExpectedGain {
    /// Compute the gain from the buy cost and sell proceeds of one cycle
    pub fn from_totals(buy_total: Decimal, sell_total: Decimal) -> Self {
        let effective_gain = (sell_total - buy_total).round_dp(8);
        let gain_percent = if buy_total.is_zero() {
            Decimal::ZERO
        } else {
            (effective_gain / buy_total * Decimal::ONE_HUNDRED).round_dp(3)
        };
        Self {
            effective_gain,
            gain_percent,
        }
    }
}
