//! Configuration loader

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::types::{AppConfig, AppSettings, PaperConfig, PingPongConfig};
use crate::common::errors::{Result, StrategyError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with PINGPONG__, e.g. PINGPONG__STRATEGY__BUY_PRICE)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("PINGPONG")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.strategy.validate()?;
    Ok(config)
}

/// Load configuration from flat environment variables only
///
/// Reads PINGPONG_BUY_PRICE, PINGPONG_SELL_PRICE, PINGPONG_AMOUNT and
/// PINGPONG_START_ON_BUY; anything unset falls back to its default.
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    load_from_lookup(|name| std::env::var(name).ok())
}

/// Same as [`load_from_env`], reading variables through `lookup`
pub fn load_from_lookup<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = PingPongConfig::default();
    let strategy = PingPongConfig {
        buy_price: decimal_var(&lookup, "PINGPONG_BUY_PRICE")?.unwrap_or(defaults.buy_price),
        sell_price: decimal_var(&lookup, "PINGPONG_SELL_PRICE")?.unwrap_or(defaults.sell_price),
        amount: decimal_var(&lookup, "PINGPONG_AMOUNT")?.unwrap_or(defaults.amount),
        start_on_buy: match lookup("PINGPONG_START_ON_BUY") {
            Some(value) => value.trim().parse().map_err(|_| {
                StrategyError::Configuration(format!(
                    "PINGPONG_START_ON_BUY must be true or false, got {:?}",
                    value
                ))
            })?,
            None => defaults.start_on_buy,
        },
    };
    strategy.validate()?;

    Ok(AppConfig {
        strategy,
        paper: PaperConfig::default(),
        settings: AppSettings::default(),
    })
}

fn decimal_var<F>(lookup: &F, name: &str) -> Result<Option<Decimal>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => Decimal::from_str(value.trim()).map(Some).map_err(|e| {
            StrategyError::Configuration(format!("{} is not a decimal ({}): {}", name, value, e))
        }),
        None => Ok(None),
    }
}
