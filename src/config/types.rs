//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{Result, StrategyError};
use crate::common::types::Side;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ping-pong strategy parameters
    #[serde(default)]
    pub strategy: PingPongConfig,
    /// Paper host parameters
    #[serde(default)]
    pub paper: PaperConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Fixed parameters of the ping-pong strategy
///
/// Immutable once the strategy is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingPongConfig {
    /// Limit price for buy orders
    #[serde(default = "default_buy_price")]
    pub buy_price: Decimal,
    /// Limit price for sell orders
    #[serde(default = "default_sell_price")]
    pub sell_price: Decimal,
    /// Default trade amount per order
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// Whether the first order is a buy
    #[serde(default = "default_start_on_buy")]
    pub start_on_buy: bool,
}

impl PingPongConfig {
    pub fn new(buy_price: Decimal, sell_price: Decimal, amount: Decimal, start_on_buy: bool) -> Self {
        Self {
            buy_price,
            sell_price,
            amount,
            start_on_buy,
        }
    }

    /// Reject parameters the strategy must not run with
    ///
    /// A buy price at or above the sell price makes every round trip a loss.
    pub fn validate(&self) -> Result<()> {
        if self.buy_price >= self.sell_price {
            return Err(StrategyError::InvalidConfiguration(format!(
                "buy price {} must be below sell price {}",
                self.buy_price, self.sell_price
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(StrategyError::InvalidConfiguration(format!(
                "trade amount {} must be positive",
                self.amount
            )));
        }
        Ok(())
    }

    /// Side of the first order placed on start
    pub fn start_side(&self) -> Side {
        Side::from_is_buy(self.start_on_buy)
    }

    /// Fixed limit price for a side
    pub fn price_for(&self, side: Side) -> Decimal {
        match side {
            Side::Buy => self.buy_price,
            Side::Sell => self.sell_price,
        }
    }
}

impl Default for PingPongConfig {
    fn default() -> Self {
        Self {
            buy_price: default_buy_price(),
            sell_price: default_sell_price(),
            amount: default_amount(),
            start_on_buy: default_start_on_buy(),
        }
    }
}

fn default_buy_price() -> Decimal {
    dec!(0.0207)
}

fn default_sell_price() -> Decimal {
    dec!(0.0212)
}

fn default_amount() -> Decimal {
    dec!(0.1)
}

fn default_start_on_buy() -> bool {
    true
}

/// Paper host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperConfig {
    /// Trading fee as a percentage of the traded value
    #[serde(default = "default_fee_percent")]
    pub fee_percent: Decimal,
    /// Number of decimal places amounts are rounded to
    #[serde(default = "default_amount_precision")]
    pub amount_precision: u32,
    /// Smallest amount the paper exchange accepts
    #[serde(default = "default_min_amount")]
    pub min_amount: Decimal,
    /// Quote currency of the simulated pair
    #[serde(default = "default_second_currency")]
    pub second_currency: String,
    /// Market prices replayed by the CLI price feed, cycled
    #[serde(default = "default_price_path")]
    pub price_path: Vec<Decimal>,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            fee_percent: default_fee_percent(),
            amount_precision: default_amount_precision(),
            min_amount: default_min_amount(),
            second_currency: default_second_currency(),
            price_path: default_price_path(),
        }
    }
}

fn default_fee_percent() -> Decimal {
    dec!(0.1)
}

fn default_amount_precision() -> u32 {
    3
}

fn default_min_amount() -> Decimal {
    dec!(0.001)
}

fn default_second_currency() -> String {
    "BTC".to_string()
}

fn default_price_path() -> Vec<Decimal> {
    vec![
        dec!(0.0209),
        dec!(0.0206),
        dec!(0.0210),
        dec!(0.0213),
        dec!(0.0211),
    ]
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Delay between simulated market prices in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Path of the persisted strategy state
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tick_interval_ms: default_tick_interval(),
            state_file: default_state_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_interval() -> u64 {
    500
}

fn default_state_file() -> String {
    "ping_pong_state.json".to_string()
}
