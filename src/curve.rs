//! Pricing function.
//!
//! Converts between circulating supply and cumulative collateral. The curve is
//! defined by its primitive (the integral of the marginal price from zero supply);
//! buy costs and sell rewards are differences of the primitive at two supplies.
//! All arithmetic goes through [`crate::math`], so an input that would wrap
//! fails with the operation that overflowed instead.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CurveConfig};
use crate::math::{self, MathResult, U256};

/// Ephemeral pricing result: `amount` units priced at `collateral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(with = "math::u256_dec")]
    pub amount: U256,
    #[serde(with = "math::u256_dec")]
    pub collateral: U256,
}

impl Quote {
    /// Average collateral per base unit, floored. Fails on a zero amount.
    pub fn realized_price(&self) -> MathResult<U256> {
        math::div(self.collateral, self.amount)
    }
}

/// Sell-side result: the reward and the realized per-unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub quote: Quote,
    #[serde(with = "math::u256_dec")]
    pub realized_price: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondingCurve {
    opening_supply: U256,
    squarings: u32,
}

impl BondingCurve {
    /// Rejects a zero divisor here so it can never surface as a runtime fault.
    pub fn new(config: &CurveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            opening_supply: config.opening_supply,
            squarings: config.squarings,
        })
    }

    pub fn opening_supply(&self) -> U256 {
        self.opening_supply
    }

    pub fn squarings(&self) -> u32 {
        self.squarings
    }

    /// Repeated `x := x*x / opening_supply`. Floors at every step.
    pub fn helper(&self, supply: U256) -> MathResult<U256> {
        let mut x = supply;
        for _ in 0..self.squarings {
            x = math::div(math::mul(x, x)?, self.opening_supply)?;
        }
        Ok(x)
    }

    /// Total collateral backing `[0, supply)`. `primitive(0) == 0`.
    pub fn primitive(&self, supply: U256) -> MathResult<U256> {
        math::add(supply, self.helper(supply)?)
    }

    /// Marginal price of the next base unit. Never zero: the linear term alone
    /// contributes one unit of collateral per base unit.
    pub fn spot_price(&self, supply: U256) -> MathResult<U256> {
        let next = self.primitive(math::add(supply, U256::one())?)?;
        math::sub(next, self.primitive(supply)?)
    }

    pub fn buy_cost(&self, supply: U256, amount: U256) -> MathResult<Quote> {
        let after = self.primitive(math::add(supply, amount)?)?;
        let collateral = math::sub(after, self.primitive(supply)?)?;
        Ok(Quote { amount, collateral })
    }

    /// Fails with underflow if `amount > supply` and with division by zero if
    /// `amount == 0` (the realized price divides by the amount).
    pub fn sell_reward(&self, supply: U256, amount: U256) -> MathResult<Withdrawal> {
        let remaining = math::sub(supply, amount)?;
        let collateral = math::sub(self.primitive(supply)?, self.primitive(remaining)?)?;
        let quote = Quote { amount, collateral };
        let realized_price = quote.realized_price()?;
        Ok(Withdrawal {
            quote,
            realized_price,
        })
    }

    /// Collateral needed to back a pre-existing supply. Same path as a buy from
    /// zero so the two cannot drift apart.
    pub fn required_collateral(&self, supply: U256) -> MathResult<U256> {
        Ok(self.buy_cost(U256::zero(), supply)?.collateral)
    }

    /// `buy_cost(0, s)` and `primitive(s)` evaluated independently. Returns both
    /// so callers can compare and report.
    pub fn consistency_pair(&self, supply: U256) -> MathResult<(U256, U256)> {
        Ok((self.primitive(supply)?, self.required_collateral(supply)?))
    }
}
