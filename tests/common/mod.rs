//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use curve_core::*;

pub const OWNER: AccountId = AccountId(1);
pub const INVESTOR: AccountId = AccountId(2);
pub const ALICE: AccountId = AccountId(3);
pub const BOB: AccountId = AccountId(4);
pub const CURVE: AccountId = AccountId(100);

pub type TestEngine = Engine<MemoryLedger, MemoryLedger>;

pub fn u(value: &str) -> U256 {
    U256::from_dec_str(value).unwrap()
}

/// Whole bonded tokens (16 decimals) to base units.
pub fn bzz(whole: u128) -> U256 {
    math::scaled(whole, config::BONDED_DECIMALS).unwrap()
}

/// Whole collateral tokens (18 decimals) to base units.
pub fn dai(whole: u128) -> U256 {
    math::scaled(whole, config::COLLATERAL_DECIMALS).unwrap()
}

pub fn opening_supply() -> U256 {
    CurveConfig::bzz().opening_supply
}

/// Engine whose bonded ledger already carries `pre_mint`, with the curve granted
/// minter. Not yet initialized.
pub fn uninitialized_with(pre_mint: U256, cap: Option<U256>, grant_minter: bool) -> TestEngine {
    let mut bonded = match cap {
        Some(cap) => MemoryLedger::capped("BZZ", 16, OWNER, cap).unwrap(),
        None => MemoryLedger::new("BZZ", 16, OWNER),
    };
    if !pre_mint.is_zero() {
        bonded.mint(OWNER, INVESTOR, pre_mint).unwrap();
    }
    if grant_minter {
        bonded.add_minter(OWNER, CURVE).unwrap();
    }
    let collateral = MemoryLedger::new("DAI", 18, OWNER);
    Engine::new(EngineConfig::default(), CURVE, OWNER, bonded, collateral).unwrap()
}

pub fn uninitialized(pre_mint: U256) -> TestEngine {
    uninitialized_with(pre_mint, None, true)
}

/// Mints collateral to `account` and approves the curve for exactly `amount`.
pub fn fund(engine: &mut TestEngine, account: AccountId, amount: U256) {
    let ledger = engine.collateral_ledger_mut();
    ledger.mint(OWNER, account, amount).unwrap();
    ledger.approve(account, CURVE, amount);
}

/// Lets the curve burn `amount` of `account`'s bonded balance.
pub fn approve_burn(engine: &mut TestEngine, account: AccountId, amount: U256) {
    engine.bonded_ledger_mut().approve(account, CURVE, amount);
}

pub fn initialize(engine: &mut TestEngine) -> Activation {
    let supply = engine.bonded_ledger().total_supply();
    let required = engine.required_collateral(supply).unwrap();
    fund(engine, OWNER, required);
    engine.init(OWNER).unwrap()
}

pub fn active_with(pre_mint: U256, cap: Option<U256>) -> TestEngine {
    let mut engine = uninitialized_with(pre_mint, cap, true);
    initialize(&mut engine);
    engine
}

/// The deployed curve, backfilled at exactly the opening supply.
pub fn active() -> TestEngine {
    active_with(opening_supply(), None)
}

pub fn collateral_of(engine: &TestEngine, account: AccountId) -> U256 {
    CollateralLedger::balance_of(engine.collateral_ledger(), account)
}

pub fn balance_of(engine: &TestEngine, account: AccountId) -> U256 {
    BalanceLedger::balance_of(engine.bonded_ledger(), account)
}

/// MemoryLedger that can be told to refuse `mint` or `transfer`, for driving a
/// settlement into its second-leg failure path.
#[derive(Debug, Clone)]
pub struct FailingLedger {
    pub inner: MemoryLedger,
    pub fail_mint: bool,
    pub fail_transfer: bool,
}

impl FailingLedger {
    pub fn new(inner: MemoryLedger) -> Self {
        Self {
            inner,
            fail_mint: false,
            fail_transfer: false,
        }
    }
}

impl BalanceLedger for FailingLedger {
    fn total_supply(&self) -> U256 {
        self.inner.total_supply()
    }

    fn balance_of(&self, account: AccountId) -> U256 {
        BalanceLedger::balance_of(&self.inner, account)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256 {
        BalanceLedger::allowance(&self.inner, owner, spender)
    }

    fn is_minter(&self, account: AccountId) -> bool {
        self.inner.is_minter(account)
    }

    fn cap(&self) -> Option<U256> {
        self.inner.cap()
    }

    fn mint(&mut self, minter: AccountId, to: AccountId, amount: U256) -> LedgerResult<()> {
        if self.fail_mint {
            return Err(LedgerError::NotMinter(minter));
        }
        self.inner.mint(minter, to, amount)
    }

    fn burn_from(&mut self, spender: AccountId, from: AccountId, amount: U256) -> LedgerResult<()> {
        self.inner.burn_from(spender, from, amount)
    }

    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        BalanceLedger::increase_allowance(&mut self.inner, owner, spender, amount)
    }
}

impl CollateralLedger for FailingLedger {
    fn balance_of(&self, account: AccountId) -> U256 {
        CollateralLedger::balance_of(&self.inner, account)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> U256 {
        CollateralLedger::allowance(&self.inner, owner, spender)
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: U256) -> LedgerResult<()> {
        if self.fail_transfer {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                have: U256::zero(),
                need: amount,
            });
        }
        self.inner.transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        self.inner.transfer_from(spender, from, to, amount)
    }

    fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: U256,
    ) -> LedgerResult<()> {
        CollateralLedger::increase_allowance(&mut self.inner, owner, spender, amount)
    }
}

fn pre_minted_bonded() -> MemoryLedger {
    let mut bonded = MemoryLedger::new("BZZ", 16, OWNER);
    bonded.mint(OWNER, INVESTOR, opening_supply()).unwrap();
    bonded.add_minter(OWNER, CURVE).unwrap();
    bonded
}

/// Funded collateral ledger: the owner can pay for init, `ALICE` holds 1000 DAI,
/// both approved to the curve.
fn funded_collateral() -> MemoryLedger {
    let mut collateral = MemoryLedger::new("DAI", 18, OWNER);
    let required = u("1250000000000000000000000");
    collateral.mint(OWNER, OWNER, required).unwrap();
    collateral.approve(OWNER, CURVE, required);
    collateral.mint(OWNER, ALICE, dai(1_000)).unwrap();
    collateral.approve(ALICE, CURVE, dai(1_000));
    collateral
}

/// Active curve whose bonded ledger can be made to refuse mints.
pub fn active_with_failing_bonded() -> Engine<FailingLedger, MemoryLedger> {
    let bonded = FailingLedger::new(pre_minted_bonded());
    let mut engine =
        Engine::new(EngineConfig::default(), CURVE, OWNER, bonded, funded_collateral()).unwrap();
    engine.init(OWNER).unwrap();
    engine
}

/// Active curve whose collateral ledger can be made to refuse payouts.
pub fn active_with_failing_collateral() -> Engine<MemoryLedger, FailingLedger> {
    let collateral = FailingLedger::new(funded_collateral());
    let mut engine =
        Engine::new(EngineConfig::default(), CURVE, OWNER, pre_minted_bonded(), collateral).unwrap();
    engine.init(OWNER).unwrap();
    engine
}
