//! Curve lifecycle and ownership state.
//!
//! `Uninitialized -> Active -> ShutDown`, nothing else. Initialization is a
//! one-shot gate tracked separately from the lifecycle, so a second `init`
//! is refused even after a shut down.

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::math::{self, U256};
use crate::types::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Waiting for the pre-mint backfill
    #[default]
    Uninitialized,
    /// Quotes and trades are served
    Active,
    /// Terminal. Everything price-related is refused
    ShutDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveState {
    /// Mirror of the balance ledger's total supply as of the last successful operation
    #[serde(with = "math::u256_dec")]
    pub circulating_supply: U256,
    pub lifecycle: Lifecycle,
    pub owner: AccountId,
    pub initialized: bool,
}

impl CurveState {
    pub fn new(owner: AccountId) -> Self {
        Self {
            circulating_supply: U256::zero(),
            lifecycle: Lifecycle::Uninitialized,
            owner,
            initialized: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn require_active(&self) -> Result<(), EngineError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(EngineError::CurveInactive)
        }
    }

    pub fn require_owner(&self, caller: AccountId) -> Result<(), EngineError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(EngineError::NotOwner(caller))
        }
    }

    /// Gate for `init`: never initialized and not shut down.
    pub fn require_initializable(&self) -> Result<(), EngineError> {
        if self.initialized {
            return Err(EngineError::AlreadyInitialized);
        }
        if self.lifecycle == Lifecycle::ShutDown {
            return Err(EngineError::CurveInactive);
        }
        Ok(())
    }

    pub(crate) fn activate(&mut self, supply: U256) {
        self.circulating_supply = supply;
        self.lifecycle = Lifecycle::Active;
        self.initialized = true;
    }

    pub(crate) fn shut_down(&mut self) {
        self.lifecycle = Lifecycle::ShutDown;
    }
}
