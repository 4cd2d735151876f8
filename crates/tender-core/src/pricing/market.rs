use rust_decimal::Decimal;

use crate::config::MarketConfig;
use crate::model::PriceEstimate;
use crate::pricing::round_money;

/// A source of indicative market prices for an item.
pub trait MarketPriceSource {
    fn estimate(&self, item_name: &str) -> PriceEstimate;
}

/// Offline stand-in: the same band around a fixed base price for every item.
#[derive(Debug, Clone)]
pub struct SimulatedMarket {
    base_price: Decimal,
    low_factor: Decimal,
    high_factor: Decimal,
    currency: String,
}

impl SimulatedMarket {
    pub fn new(config: &MarketConfig, currency: impl Into<String>) -> Self {
        SimulatedMarket {
            base_price: config.base_price,
            low_factor: config.low_factor,
            high_factor: config.high_factor,
            currency: currency.into(),
        }
    }
}

impl Default for SimulatedMarket {
    fn default() -> Self {
        Self::new(&MarketConfig::default(), "ZAR")
    }
}

impl MarketPriceSource for SimulatedMarket {
    fn estimate(&self, item_name: &str) -> PriceEstimate {
        tracing::debug!(item = item_name, "simulated market estimate");
        PriceEstimate {
            min_estimate: round_money(self.base_price.saturating_mul(self.low_factor)),
            max_estimate: round_money(self.base_price.saturating_mul(self.high_factor)),
            currency: self.currency.clone(),
        }
    }
}
