// 8.0.2: result types and errors for engine operations.

use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::math::{MathError, U256};
use crate::types::{AccountId, TradeSide};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub initializer: AccountId,
    pub pre_mint_supply: U256,
    pub collateral_deposited: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintResult {
    pub payer: AccountId,
    pub recipient: AccountId,
    pub amount: U256,
    pub collateral_spent: U256,
    pub new_supply: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemResult {
    pub account: AccountId,
    pub amount: U256,
    pub collateral_returned: U256,
    pub realized_price: U256, // collateral per base unit, floored
    pub new_supply: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Arithmetic fault: {0}")]
    Math(#[from] MathError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Curve inactive")]
    CurveInactive,

    #[error("Curve is already initialized")]
    AlreadyInitialized,

    #[error("Curve is not minter")]
    NotAuthorizedToMint,

    #[error("Curve equation requires pre-mint: supply {supply}, minimum {minimum}")]
    InsufficientPreMint { supply: U256, minimum: U256 },

    #[error("Slippage exceeded on {side}: quoted {quoted}, limit {limit}")]
    SlippageExceeded {
        side: TradeSide,
        quoted: U256,
        limit: U256,
    },

    #[error("{0} is not the owner")]
    NotOwner(AccountId),

    #[error("Collateral transfer failed: {0}")]
    CollateralTransferFailed(LedgerError),

    #[error("Balance transfer failed: {0}")]
    BalanceTransferFailed(LedgerError),

    #[error("Minting failed: {0}")]
    MintFailed(LedgerError),

    #[error("Pricing diverged at supply {supply}: primitive {primitive}, mint from zero {from_zero}")]
    InconsistentPricing {
        supply: U256,
        primitive: U256,
        from_zero: U256,
    },
}
