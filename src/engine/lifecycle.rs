//! Initialization (pre-mint backfill), shut down and ownership.

use super::core::Engine;
use super::results::{Activation, EngineError};
use crate::events::{
    CurveActivatedEvent, CurveShutDownEvent, EventPayload, OwnershipTransferredEvent,
};
use crate::ledger::{BalanceLedger, CollateralLedger};
use crate::types::AccountId;
use tracing::info;

impl<B: BalanceLedger, C: CollateralLedger> Engine<B, C> {
    /// Collateralizes whatever supply the ledger already carries and opens the curve.
    ///
    /// The supply is read from the ledger, never taken from the caller. The caller
    /// pays `primitive(supply)` in collateral, so overshooting the minimum pre-mint
    /// only costs more.
    pub fn init(&mut self, caller: AccountId) -> Result<Activation, EngineError> {
        self.state.require_initializable()?;

        if !self.bonded.is_minter(self.identity) {
            return Err(EngineError::NotAuthorizedToMint);
        }

        let supply = self.bonded.total_supply();
        let minimum = self.config.curve.min_pre_mint;
        if supply < minimum {
            return Err(EngineError::InsufficientPreMint { supply, minimum });
        }

        let required = self.curve.required_collateral(supply)?;
        self.collateral
            .transfer_from(self.identity, caller, self.identity, required)
            .map_err(EngineError::CollateralTransferFailed)?;

        self.state.activate(supply);
        info!(%caller, pre_mint = %supply, collateral = %required, "curve activated");

        self.emit_event(EventPayload::CurveActivated(CurveActivatedEvent {
            initializer: caller,
            pre_mint_supply: supply,
            collateral_deposited: required,
        }));

        Ok(Activation {
            initializer: caller,
            pre_mint_supply: supply,
            collateral_deposited: required,
        })
    }

    // owner only. allowed from any state; ShutDown is terminal
    pub fn shut_down(&mut self, caller: AccountId) -> Result<(), EngineError> {
        self.state.require_owner(caller)?;
        self.state.shut_down();
        info!(%caller, "curve shut down");

        self.emit_event(EventPayload::CurveShutDown(CurveShutDownEvent { by: caller }));
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<(), EngineError> {
        self.state.require_owner(caller)?;
        self.state.owner = new_owner;
        info!(previous = %caller, new = %new_owner, "ownership transferred");

        self.emit_event(EventPayload::OwnershipTransferred(OwnershipTransferredEvent {
            previous_owner: caller,
            new_owner,
        }));
        Ok(())
    }
}
