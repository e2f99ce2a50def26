//! Price queries.
//!
//! Quotes are computed against the ledger's live supply at call time and are
//! refused unless the curve is active. `required_collateral` and
//! `check_consistency` are pure curve math and stay available before init.

use super::core::Engine;
use super::results::EngineError;
use crate::ledger::{BalanceLedger, CollateralLedger};
use crate::math::U256;

impl<B: BalanceLedger, C: CollateralLedger> Engine<B, C> {
    /// Collateral a mint of `amount` would cost right now.
    pub fn buy_price(&self, amount: U256) -> Result<U256, EngineError> {
        self.state.require_active()?;
        let quote = self.curve.buy_cost(self.reconciled_supply(), amount)?;
        Ok(quote.collateral)
    }

    /// Collateral a redeem of `amount` would return right now.
    pub fn sell_reward(&self, amount: U256) -> Result<U256, EngineError> {
        self.state.require_active()?;
        let withdrawal = self.curve.sell_reward(self.reconciled_supply(), amount)?;
        Ok(withdrawal.quote.collateral)
    }

    /// Marginal price of the next base unit at the current supply.
    pub fn spot_price(&self) -> Result<U256, EngineError> {
        self.state.require_active()?;
        Ok(self.curve.spot_price(self.reconciled_supply())?)
    }

    /// Collateral `init` would pull for a ledger supply of `supply`.
    pub fn required_collateral(&self, supply: U256) -> Result<U256, EngineError> {
        Ok(self.curve.required_collateral(supply)?)
    }

    /// Cross-checks the pre-mint path (`buy_cost` from zero) against the primitive.
    /// Returns the agreed collateral.
    pub fn check_consistency(&self, supply: U256) -> Result<U256, EngineError> {
        let (primitive, from_zero) = self.curve.consistency_pair(supply)?;
        if primitive != from_zero {
            return Err(EngineError::InconsistentPricing {
                supply,
                primitive,
                from_zero,
            });
        }
        Ok(primitive)
    }
}
