pub mod builder;
pub mod calculator;
pub mod market;

pub use builder::build_pricing_model;
pub use calculator::calculate;
pub use market::{MarketPriceSource, SimulatedMarket};

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on every monetary value.
pub const MONEY_DP: u32 = 2;

/// Round a monetary value to cents, midpoint away from zero (0.005 -> 0.01).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}
