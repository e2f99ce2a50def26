// 2.0: checked arithmetic over a 256-bit unsigned integer. every pricing path goes
// through these four primitives so a failure always names the operation that broke.

use serde::{de, Deserialize, Deserializer, Serializer};
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer used for every supply and collateral amount.
    pub struct U256(4);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("addition overflow")]
    AdditionOverflow,

    #[error("subtraction underflow")]
    SubtractionUnderflow,

    #[error("multiplication overflow")]
    MultiplicationOverflow,

    #[error("division by zero")]
    DivisionByZero,
}

pub type MathResult<T> = Result<T, MathError>;

#[inline]
pub fn add(a: U256, b: U256) -> MathResult<U256> {
    a.checked_add(b).ok_or(MathError::AdditionOverflow)
}

#[inline]
pub fn sub(a: U256, b: U256) -> MathResult<U256> {
    a.checked_sub(b).ok_or(MathError::SubtractionUnderflow)
}

#[inline]
pub fn mul(a: U256, b: U256) -> MathResult<U256> {
    a.checked_mul(b).ok_or(MathError::MultiplicationOverflow)
}

/// Floor division.
#[inline]
pub fn div(a: U256, b: U256) -> MathResult<U256> {
    a.checked_div(b).ok_or(MathError::DivisionByZero)
}

/// `value * 10^decimals`, checked.
pub fn scaled(value: u128, decimals: usize) -> MathResult<U256> {
    let mut factor = U256::one();
    for _ in 0..decimals {
        factor = mul(factor, U256::from(10u8))?;
    }
    mul(U256::from(value), factor)
}

/// Serde adapter: amounts travel as decimal strings so JSON consumers never
/// truncate them to a float.
pub mod u256_dec {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw)
            .map_err(|_| de::Error::custom(format!("invalid decimal amount: {raw}")))
    }
}
