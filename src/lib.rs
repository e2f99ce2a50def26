// curve-core: bonding curve pricing and settlement engine.
// collateral in, balance out (and back) at a price set by circulating supply.
// all arithmetic is checked; every operation completes or changes nothing.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AccountId, TradeSide, Timestamp
//   2.x  math.rs: U256 and the checked add/sub/mul/div primitives
//   3.x  curve.rs: primitive, spot price, buy cost, sell reward
//   4.x  state.rs: lifecycle (Uninitialized -> Active -> ShutDown), owner
//   7.x  config.rs: curve shape parameters, presets, validation
//   8.x  engine/: init, quotes, mint/redeem settlement, admin
//   9.x  ledger.rs: balance/collateral ledger traits + in-memory ledger
//   11.x events.rs: state transition events for audit

pub mod config;
pub mod curve;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod math;
pub mod state;
pub mod types;

// re exports for convenience
pub use config::{ConfigError, CurveConfig};
pub use curve::{BondingCurve, Quote, Withdrawal};
pub use engine::*;
pub use events::*;
pub use ledger::{BalanceLedger, CollateralLedger, LedgerError, LedgerResult, MemoryLedger};
pub use math::{MathError, MathResult, U256};
pub use state::{CurveState, Lifecycle};
pub use types::*;
