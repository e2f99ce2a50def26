// 8.0: curve engine. owns the curve state and both ledger handles; coordinates
// initialization, quotes, mint/redeem settlement and admin actions.
// synchronous and event-driven; every call completes or leaves no trace.

mod config;
mod core;
mod lifecycle;
mod pricing;
mod results;
mod settlement;

pub use config::EngineConfig;
pub use core::Engine;
pub use results::{Activation, EngineError, MintResult, RedeemResult};
