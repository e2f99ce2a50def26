// 9.0 ledger.rs: the two balance ledgers the curve calls into but does not own.
// 9.1 traits are the boundary; MemoryLedger is the in-process implementation used
// by tests and the simulation (capped mint, minter roles, allowances).
//
// contract for implementors: a call either applies in full or returns an error
// having changed nothing.

use std::collections::{HashMap, HashSet};

use crate::math::{self, MathError, U256};
use crate::types::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient balance for {account}: have {have}, need {need}")]
    InsufficientBalance { account: AccountId, have: U256, need: U256 },

    #[error("Insufficient allowance from {owner} to {spender}: have {have}, need {need}")]
    InsufficientAllowance {
        owner: AccountId,
        spender: AccountId,
        have: U256,
        need: U256,
    },

    #[error("{0} does not have the minter role")]
    NotMinter(AccountId),

    #[error("{0} already has the minter role")]
    AlreadyMinter(AccountId),

    #[error("Supply cap exceeded: cap {cap}, would have {would_have}")]
    CapExceeded { cap: U256, would_have: U256 },

    #[error("Supply cap is zero")]
    ZeroCap,

    #[error("Ledger arithmetic: {0}")]
    Math(#[from] MathError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The priced asset. The curve mints into it and burns out of it.
pub trait BalanceLedger {
    fn total_supply(&self) -> U256;
    fn balance_of(&self, account: AccountId) -> U256;
    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256;
    fn is_minter(&self, account: AccountId) -> bool;
    // None = uncapped
    fn cap(&self) -> Option<U256>;

    fn mint(&mut self, minter: AccountId, to: AccountId, amount: U256) -> LedgerResult<()>;

    // Minter-gated; consumes `from`'s allowance to `spender`.
    fn burn_from(&mut self, spender: AccountId, from: AccountId, amount: U256) -> LedgerResult<()>;

    /// Gives back allowance a reversed `burn_from` consumed.
    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()>;
}

/// The collateral asset. The curve pulls it on mint/init and pays it out on redeem.
pub trait CollateralLedger {
    fn balance_of(&self, account: AccountId) -> U256;
    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256;

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: U256) -> LedgerResult<()>;

    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> LedgerResult<()>;

    /// Gives back allowance a reversed `transfer_from` consumed.
    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()>;
}

/// In-memory fungible ledger.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    pub symbol: String,
    pub decimals: u8,
    cap: Option<U256>,
    total_supply: U256,
    balances: HashMap<AccountId, U256>,
    allowances: HashMap<(AccountId, AccountId), U256>,
    minters: HashSet<AccountId>,
}

impl MemoryLedger {
    /// Uncapped ledger; `admin` is the first minter.
    pub fn new(symbol: &str, decimals: u8, admin: AccountId) -> Self {
        let mut minters = HashSet::new();
        minters.insert(admin);
        Self {
            symbol: symbol.to_string(),
            decimals,
            cap: None,
            total_supply: U256::zero(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            minters,
        }
    }

    pub fn capped(symbol: &str, decimals: u8, admin: AccountId, cap: U256) -> LedgerResult<Self> {
        if cap.is_zero() {
            return Err(LedgerError::ZeroCap);
        }
        let mut ledger = Self::new(symbol, decimals, admin);
        ledger.cap = Some(cap);
        Ok(ledger)
    }

    pub fn add_minter(&mut self, caller: AccountId, account: AccountId) -> LedgerResult<()> {
        self.require_minter(caller)?;
        if !self.minters.insert(account) {
            return Err(LedgerError::AlreadyMinter(account));
        }
        Ok(())
    }

    pub fn renounce_minter(&mut self, caller: AccountId) -> LedgerResult<()> {
        if !self.minters.remove(&caller) {
            return Err(LedgerError::NotMinter(caller));
        }
        Ok(())
    }

    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Minter-gated burn of the caller's own balance.
    pub fn burn(&mut self, caller: AccountId, amount: U256) -> LedgerResult<()> {
        self.require_minter(caller)?;
        self.debit(caller, amount)
    }

    fn require_minter(&self, account: AccountId) -> LedgerResult<()> {
        if self.minters.contains(&account) {
            Ok(())
        } else {
            Err(LedgerError::NotMinter(account))
        }
    }

    // checks first, then writes, so a failure leaves nothing behind
    fn debit(&mut self, account: AccountId, amount: U256) -> LedgerResult<()> {
        let have = self.balances.get(&account).copied().unwrap_or_default();
        let remaining = math::sub(have, amount).map_err(|_| LedgerError::InsufficientBalance {
            account,
            have,
            need: amount,
        })?;
        let supply = math::sub(self.total_supply, amount)?;
        self.balances.insert(account, remaining);
        self.total_supply = supply;
        Ok(())
    }

    fn move_balance(&mut self, from: AccountId, to: AccountId, amount: U256) -> LedgerResult<()> {
        let have = self.balances.get(&from).copied().unwrap_or_default();
        let remaining = math::sub(have, amount).map_err(|_| LedgerError::InsufficientBalance {
            account: from,
            have,
            need: amount,
        })?;
        if from == to {
            return Ok(());
        }
        let credited = math::add(self.balances.get(&to).copied().unwrap_or_default(), amount)?;
        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }

    fn raise_allowance(&mut self, owner: AccountId, spender: AccountId, amount: U256) -> LedgerResult<()> {
        let have = self.allowances.get(&(owner, spender)).copied().unwrap_or_default();
        self.allowances.insert((owner, spender), math::add(have, amount)?);
        Ok(())
    }

    fn spend_allowance(&self, owner: AccountId, spender: AccountId, amount: U256) -> LedgerResult<U256> {
        let have = self.allowances.get(&(owner, spender)).copied().unwrap_or_default();
        math::sub(have, amount).map_err(|_| LedgerError::InsufficientAllowance {
            owner,
            spender,
            have,
            need: amount,
        })
    }
}

impl BalanceLedger for MemoryLedger {
    fn total_supply(&self) -> U256 {
        self.total_supply
    }

    fn balance_of(&self, account: AccountId) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }

    fn is_minter(&self, account: AccountId) -> bool {
        self.minters.contains(&account)
    }

    fn cap(&self) -> Option<U256> {
        self.cap
    }

    fn mint(&mut self, minter: AccountId, to: AccountId, amount: U256) -> LedgerResult<()> {
        self.require_minter(minter)?;
        let supply = math::add(self.total_supply, amount)?;
        if let Some(cap) = self.cap {
            if supply > cap {
                return Err(LedgerError::CapExceeded {
                    cap,
                    would_have: supply,
                });
            }
        }
        let credited = math::add(BalanceLedger::balance_of(self, to), amount)?;
        self.balances.insert(to, credited);
        self.total_supply = supply;
        Ok(())
    }

    fn burn_from(&mut self, spender: AccountId, from: AccountId, amount: U256) -> LedgerResult<()> {
        self.require_minter(spender)?;
        let left = self.spend_allowance(from, spender, amount)?;
        self.debit(from, amount)?;
        self.allowances.insert((from, spender), left);
        Ok(())
    }

    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        self.raise_allowance(owner, spender, amount)
    }
}

impl CollateralLedger for MemoryLedger {
    fn balance_of(&self, account: AccountId) -> U256 {
        BalanceLedger::balance_of(self, account)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256 {
        BalanceLedger::allowance(self, owner, spender)
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: U256) -> LedgerResult<()> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        let left = self.spend_allowance(from, spender, amount)?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((from, spender), left);
        Ok(())
    }

    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        self.raise_allowance(owner, spender, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: AccountId = AccountId(1);
    const ALICE: AccountId = AccountId(2);
    const BOB: AccountId = AccountId(3);

    fn amt(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn zero_cap_rejected() {
        let err = MemoryLedger::capped("BZZ", 16, ADMIN, U256::zero()).unwrap_err();
        assert_eq!(err, LedgerError::ZeroCap);
    }

    #[test]
    fn mint_respects_role_and_cap() {
        let mut ledger = MemoryLedger::capped("BZZ", 16, ADMIN, amt(100)).unwrap();
        assert_eq!(ledger.mint(ALICE, ALICE, amt(1)), Err(LedgerError::NotMinter(ALICE)));

        ledger.mint(ADMIN, ALICE, amt(60)).unwrap();
        let err = ledger.mint(ADMIN, BOB, amt(41)).unwrap_err();
        assert_eq!(err, LedgerError::CapExceeded { cap: amt(100), would_have: amt(101) });

        assert_eq!(ledger.total_supply(), amt(60));
        assert_eq!(BalanceLedger::balance_of(&ledger, BOB), U256::zero());
    }

    #[test]
    fn minter_roles() {
        let mut ledger = MemoryLedger::new("BZZ", 16, ADMIN);
        assert!(ledger.add_minter(ALICE, BOB).is_err());
        ledger.add_minter(ADMIN, ALICE).unwrap();
        assert!(ledger.is_minter(ALICE));
        assert_eq!(ledger.add_minter(ADMIN, ALICE), Err(LedgerError::AlreadyMinter(ALICE)));
        ledger.renounce_minter(ALICE).unwrap();
        assert!(!ledger.is_minter(ALICE));
    }

    #[test]
    fn burn_gated_to_minters() {
        let mut ledger = MemoryLedger::new("BZZ", 16, ADMIN);
        ledger.mint(ADMIN, ALICE, amt(50)).unwrap();
        ledger.mint(ADMIN, ADMIN, amt(50)).unwrap();

        assert_eq!(ledger.burn(ALICE, amt(10)), Err(LedgerError::NotMinter(ALICE)));
        ledger.approve(ALICE, BOB, amt(10));
        assert_eq!(ledger.burn_from(BOB, ALICE, amt(10)), Err(LedgerError::NotMinter(BOB)));

        ledger.burn(ADMIN, amt(20)).unwrap();
        ledger.approve(ALICE, ADMIN, amt(50));
        ledger.burn_from(ADMIN, ALICE, amt(50)).unwrap();

        assert_eq!(ledger.total_supply(), amt(30));
        assert_eq!(BalanceLedger::balance_of(&ledger, ALICE), U256::zero());
        assert_eq!(BalanceLedger::allowance(&ledger, ALICE, ADMIN), U256::zero());
    }

    #[test]
    fn burn_from_failure_keeps_allowance() {
        let mut ledger = MemoryLedger::new("BZZ", 16, ADMIN);
        ledger.mint(ADMIN, ALICE, amt(5)).unwrap();
        ledger.approve(ALICE, ADMIN, amt(10));

        let err = ledger.burn_from(ADMIN, ALICE, amt(10)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(BalanceLedger::allowance(&ledger, ALICE, ADMIN), amt(10));
        assert_eq!(ledger.total_supply(), amt(5));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = MemoryLedger::new("DAI", 18, ADMIN);
        ledger.mint(ADMIN, ALICE, amt(100)).unwrap();

        let err = ledger.transfer_from(BOB, ALICE, BOB, amt(40)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));

        ledger.approve(ALICE, BOB, amt(40));
        ledger.transfer_from(BOB, ALICE, BOB, amt(40)).unwrap();
        assert_eq!(CollateralLedger::balance_of(&ledger, ALICE), amt(60));
        assert_eq!(CollateralLedger::balance_of(&ledger, BOB), amt(40));
        assert_eq!(CollateralLedger::allowance(&ledger, ALICE, BOB), U256::zero());
        assert_eq!(ledger.total_supply(), amt(100));
    }

    #[test]
    fn transfer_rejects_overdraw() {
        let mut ledger = MemoryLedger::new("DAI", 18, ADMIN);
        ledger.mint(ADMIN, ALICE, amt(10)).unwrap();
        let err = ledger.transfer(ALICE, BOB, amt(11)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance { account: ALICE, have: amt(10), need: amt(11) }
        );
        assert_eq!(CollateralLedger::balance_of(&ledger, ALICE), amt(10));
    }

    #[test]
    fn increase_allowance_adds_to_existing() {
        let mut ledger = MemoryLedger::new("DAI", 18, ADMIN);
        ledger.approve(ALICE, BOB, amt(5));
        CollateralLedger::increase_allowance(&mut ledger, ALICE, BOB, amt(7)).unwrap();
        assert_eq!(CollateralLedger::allowance(&ledger, ALICE, BOB), amt(12));

        BalanceLedger::increase_allowance(&mut ledger, BOB, ALICE, amt(3)).unwrap();
        assert_eq!(BalanceLedger::allowance(&ledger, BOB, ALICE), amt(3));

        let err = CollateralLedger::increase_allowance(&mut ledger, ALICE, BOB, U256::MAX);
        assert_eq!(err, Err(LedgerError::Math(MathError::AdditionOverflow)));
        assert_eq!(CollateralLedger::allowance(&ledger, ALICE, BOB), amt(12));
    }
}
