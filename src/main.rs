//! Bonding Curve Simulation.
//!
//! Walks the engine through its lifecycle: pre-mint backfill, trading with
//! slippage limits, and shut down.

use curve_core::*;
use std::error::Error;

const OWNER: AccountId = AccountId(1);
const CURVE: AccountId = AccountId(100);
const INVESTOR: AccountId = AccountId(2);
const ALICE: AccountId = AccountId(3);
const BOB: AccountId = AccountId(4);

type SimEngine = Engine<MemoryLedger, MemoryLedger>;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Bonding Curve Engine Simulation");
    println!("Pre-mint backfill, mint/redeem, shut down\n");

    let mut engine = scenario_1_pre_mint_backfill()?;
    scenario_2_trading(&mut engine)?;
    scenario_3_slippage(&mut engine)?;
    scenario_4_shut_down(&mut engine)?;

    println!("\nAll simulations completed successfully.");
    Ok(())
}

fn tokens(whole: u128) -> Result<U256, MathError> {
    math::scaled(whole, config::BONDED_DECIMALS)
}

fn dai(whole: u128) -> Result<U256, MathError> {
    math::scaled(whole, config::COLLATERAL_DECIMALS)
}

/// Founder allocation minted before the curve exists, then backfilled.
fn scenario_1_pre_mint_backfill() -> Result<SimEngine, Box<dyn Error>> {
    println!("Scenario 1: Pre-mint Backfill\n");

    // the founder allocation has to cover the whole opening supply
    let curve_config = CurveConfig::bzz().min_pre_mint_units(config::OPENING_SUPPLY_UNITS)?;
    let cap = tokens(125_000_000)?;
    let mut bzz = MemoryLedger::capped("BZZ", 16, OWNER, cap)?;
    let mut collateral = MemoryLedger::new("DAI", 18, OWNER);

    bzz.mint(OWNER, INVESTOR, curve_config.opening_supply)?;
    bzz.add_minter(OWNER, CURVE)?;

    let mut engine = Engine::new(
        EngineConfig::with_curve(curve_config),
        CURVE,
        OWNER,
        bzz,
        collateral.clone(),
    )?;
    engine.set_time(Timestamp::now());

    let supply = engine.bonded_ledger().total_supply();
    let required = engine.required_collateral(supply)?;
    println!("  Pre-mint supply: {supply}");
    println!("  Collateral required: {required}");

    collateral.mint(OWNER, OWNER, required)?;
    collateral.approve(OWNER, CURVE, required);
    *engine.collateral_ledger_mut() = collateral;

    let activation = engine.init(OWNER)?;
    println!(
        "  Curve active, reserve {} backing {}\n",
        engine.reserve(),
        activation.pre_mint_supply
    );
    Ok(engine)
}

fn fund(engine: &mut SimEngine, account: AccountId, amount: U256) -> Result<(), LedgerError> {
    let ledger = engine.collateral_ledger_mut();
    ledger.mint(OWNER, account, amount)?;
    ledger.approve(account, CURVE, amount);
    Ok(())
}

fn scenario_2_trading(engine: &mut SimEngine) -> Result<(), Box<dyn Error>> {
    println!("Scenario 2: Mint and Redeem\n");

    let amount = tokens(1000)?;
    let cost = engine.buy_price(amount)?;
    println!("  Spot price: {}", engine.spot_price()?);
    println!("  1000 BZZ costs {cost}");

    fund(engine, ALICE, cost)?;
    engine.advance_time(60_000);
    let bought = engine.mint(ALICE, amount, cost)?;
    println!("  Alice minted {} for {}", bought.amount, bought.collateral_spent);

    let half = tokens(500)?;
    engine.bonded_ledger_mut().approve(ALICE, CURVE, half);
    let reward = engine.sell_reward(half)?;
    let sold = engine.redeem(ALICE, half, reward)?;
    println!(
        "  Alice redeemed {} for {} (realized price {})",
        sold.amount, sold.collateral_returned, sold.realized_price
    );
    println!("  Supply now {}, reserve {}\n", engine.circulating_supply(), engine.reserve());
    Ok(())
}

/// Two buyers quote the same price; the second one to settle hits its limit.
fn scenario_3_slippage(engine: &mut SimEngine) -> Result<(), Box<dyn Error>> {
    println!("Scenario 3: Slippage Guard\n");

    let amount = tokens(1000)?;
    let quoted = engine.buy_price(amount)?;
    fund(engine, ALICE, dai(1_000)?)?;
    fund(engine, BOB, dai(1_000)?)?;

    engine.mint(BOB, amount, quoted)?;
    println!("  Bob settles first at {quoted}");

    match engine.mint(ALICE, amount, quoted) {
        Err(e) => println!("  Alice rejected: {e}"),
        Ok(r) => println!("  Alice unexpectedly filled at {}", r.collateral_spent),
    }
    println!("  Fresh quote for Alice: {}\n", engine.buy_price(amount)?);
    Ok(())
}

fn scenario_4_shut_down(engine: &mut SimEngine) -> Result<(), Box<dyn Error>> {
    println!("Scenario 4: Shut Down\n");

    engine.shut_down(OWNER)?;
    println!("  Lifecycle: {:?}", engine.lifecycle());
    if let Err(e) = engine.buy_price(tokens(1)?) {
        println!("  Quote refused: {e}");
    }
    println!("  Events recorded: {}", engine.events().len());
    if let Some(last) = engine.recent_events(1).first() {
        println!("  Last event at {} ms: {:?}", last.timestamp.as_millis(), last.payload);
    }
    Ok(())
}
