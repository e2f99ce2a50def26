//! Mint and redeem settlement.
//!
//! Each call re-prices against the ledger supply as of its own start, checks the
//! caller's limit, then moves the two legs. Anything that could fail on the
//! second leg is checked before the first one moves; if a ledger still refuses
//! the second leg, the first is reversed (balance and spent allowance) before the
//! error is returned.

use super::core::Engine;
use super::results::{EngineError, MintResult, RedeemResult};
use crate::events::{EventPayload, MintedEvent, RedeemedEvent};
use crate::ledger::{BalanceLedger, CollateralLedger, LedgerError};
use crate::math::{self, U256};
use crate::types::{AccountId, TradeSide};
use tracing::{error, warn};

impl<B: BalanceLedger, C: CollateralLedger> Engine<B, C> {
    /// Buy `amount` for the caller, spending at most `max_collateral_spend`.
    pub fn mint(
        &mut self,
        caller: AccountId,
        amount: U256,
        max_collateral_spend: U256,
    ) -> Result<MintResult, EngineError> {
        self.mint_to(caller, amount, max_collateral_spend, caller)
    }

    /// Caller pays the collateral, `recipient` receives the minted balance.
    pub fn mint_to(
        &mut self,
        caller: AccountId,
        amount: U256,
        max_collateral_spend: U256,
        recipient: AccountId,
    ) -> Result<MintResult, EngineError> {
        self.state.require_active()?;

        let supply = self.reconciled_supply();
        let cost = self.curve.buy_cost(supply, amount)?.collateral;
        if cost > max_collateral_spend {
            warn!(%caller, %cost, limit = %max_collateral_spend, "mint rejected: slippage");
            return Err(EngineError::SlippageExceeded {
                side: TradeSide::Buy,
                quoted: cost,
                limit: max_collateral_spend,
            });
        }

        self.preflight_mint(supply, amount)?;

        self.collateral
            .transfer_from(self.identity, caller, self.identity, cost)
            .map_err(EngineError::CollateralTransferFailed)?;

        if let Err(e) = self.bonded.mint(self.identity, recipient, amount) {
            self.reverse_collateral_pull(caller, cost);
            return Err(EngineError::MintFailed(e));
        }

        let new_supply = self.bonded.total_supply();
        self.state.circulating_supply = new_supply;

        self.emit_event(EventPayload::Minted(MintedEvent {
            payer: caller,
            recipient,
            amount,
            collateral_spent: cost,
        }));

        Ok(MintResult {
            payer: caller,
            recipient,
            amount,
            collateral_spent: cost,
            new_supply,
        })
    }

    /// Sell `amount` of the caller's balance back for at least `min_collateral_reward`.
    pub fn redeem(
        &mut self,
        caller: AccountId,
        amount: U256,
        min_collateral_reward: U256,
    ) -> Result<RedeemResult, EngineError> {
        self.state.require_active()?;

        let supply = self.reconciled_supply();
        let withdrawal = self.curve.sell_reward(supply, amount)?;
        let reward = withdrawal.quote.collateral;
        if reward < min_collateral_reward {
            warn!(%caller, %reward, limit = %min_collateral_reward, "redeem rejected: slippage");
            return Err(EngineError::SlippageExceeded {
                side: TradeSide::Sell,
                quoted: reward,
                limit: min_collateral_reward,
            });
        }

        let reserve = self.collateral.balance_of(self.identity);
        if reserve < reward {
            return Err(EngineError::CollateralTransferFailed(
                LedgerError::InsufficientBalance {
                    account: self.identity,
                    have: reserve,
                    need: reward,
                },
            ));
        }

        self.bonded
            .burn_from(self.identity, caller, amount)
            .map_err(EngineError::BalanceTransferFailed)?;

        if let Err(e) = self.collateral.transfer(self.identity, caller, reward) {
            self.reverse_burn(caller, amount);
            return Err(EngineError::CollateralTransferFailed(e));
        }

        let new_supply = self.bonded.total_supply();
        self.state.circulating_supply = new_supply;

        self.emit_event(EventPayload::Redeemed(RedeemedEvent {
            account: caller,
            amount,
            collateral_returned: reward,
        }));

        Ok(RedeemResult {
            account: caller,
            amount,
            collateral_returned: reward,
            realized_price: withdrawal.realized_price,
            new_supply,
        })
    }

    // undo leg one of a mint: refund the pulled collateral and the allowance it used
    fn reverse_collateral_pull(&mut self, caller: AccountId, cost: U256) {
        if let Err(e) = self.collateral.transfer(self.identity, caller, cost) {
            error!(%caller, %cost, error = %e, "collateral refund failed after mint failure");
            return;
        }
        if let Err(e) = self.collateral.increase_allowance(caller, self.identity, cost) {
            error!(%caller, %cost, error = %e, "allowance restore failed after mint failure");
        }
    }

    // undo leg one of a redeem: re-mint the burned balance and the allowance it used
    fn reverse_burn(&mut self, caller: AccountId, amount: U256) {
        if let Err(e) = self.bonded.mint(self.identity, caller, amount) {
            error!(%caller, %amount, error = %e, "re-mint failed after payout failure");
            return;
        }
        if let Err(e) = self.bonded.increase_allowance(caller, self.identity, amount) {
            error!(%caller, %amount, error = %e, "allowance restore failed after payout failure");
        }
    }

    // second-leg checks for mint: authority and cap headroom
    fn preflight_mint(&self, supply: U256, amount: U256) -> Result<(), EngineError> {
        if !self.bonded.is_minter(self.identity) {
            return Err(EngineError::NotAuthorizedToMint);
        }
        if let Some(cap) = self.bonded.cap() {
            let would_have = math::add(supply, amount)?;
            if would_have > cap {
                return Err(EngineError::MintFailed(LedgerError::CapExceeded { cap, would_have }));
            }
        }
        Ok(())
    }
}
