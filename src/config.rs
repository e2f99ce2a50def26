// 7.0 config.rs: curve shape parameters. immutable once the engine is built.
// 7.1 the default is the deployed curve: 16-decimal priced asset, opening supply
// of 62.5M units, five squarings (primitive ~ s + s^32 / opening^31).

use serde::{Deserialize, Serialize};

use crate::math::{self, MathError, U256};

/// Decimals of the priced (bonded) asset in the deployed configuration.
pub const BONDED_DECIMALS: usize = 16;
/// Decimals of the collateral asset in the deployed configuration.
pub const COLLATERAL_DECIMALS: usize = 18;
/// Whole units in the opening market supply.
pub const OPENING_SUPPLY_UNITS: u128 = 62_500_000;
/// Upper bound on squarings: 2^8 is already far past any representable supply.
pub const MAX_SQUARINGS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    // Pricing divisor, in base units. Also where the curve's marginal price reaches
    // its "open market" level.
    #[serde(with = "math::u256_dec")]
    pub opening_supply: U256,
    // Number of `x := x*x / opening_supply` rounds in the helper term
    pub squarings: u32,
    // Ledger supply required before init can activate the curve
    #[serde(with = "math::u256_dec")]
    pub min_pre_mint: U256,
}

impl Default for CurveConfig {
    fn default() -> Self {
        let opening = U256::from(OPENING_SUPPLY_UNITS) * U256::exp10(BONDED_DECIMALS);
        Self {
            opening_supply: opening,
            squarings: 5,
            min_pre_mint: opening,
        }
    }
}

impl CurveConfig {
    /// The deployed curve (alias of `Default`, named for call sites that read better).
    pub fn bzz() -> Self {
        Self::default()
    }

    /// A flatter curve for experiments: fewer squarings, same opening supply.
    pub fn with_squarings(squarings: u32) -> Self {
        Self {
            squarings,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.opening_supply.is_zero() {
            return Err(ConfigError::ZeroScale);
        }
        if self.squarings == 0 || self.squarings > MAX_SQUARINGS {
            return Err(ConfigError::InvalidSquarings {
                squarings: self.squarings,
                max: MAX_SQUARINGS,
            });
        }
        Ok(())
    }

    /// Pre-mint threshold expressed from whole units, for hosts building configs by hand.
    pub fn min_pre_mint_units(mut self, units: u128) -> Result<Self, ConfigError> {
        self.min_pre_mint = math::scaled(units, BONDED_DECIMALS)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Pricing divisor is zero")]
    ZeroScale,

    #[error("Squarings must be within 1..={max}, got {squarings}")]
    InvalidSquarings { squarings: u32, max: u32 },

    #[error("Config arithmetic: {0}")]
    Math(#[from] MathError),
}
