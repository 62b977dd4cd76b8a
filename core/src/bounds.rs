//! Bounds validation for checkpoint inputs
//!
//! Every public store operation passes its raw numeric arguments through
//! these checks before it inspects or mutates the record sequence: values
//! are bounded to 192 bits, times to 64 bits. Both checks are pure and
//! never touch store state.

use thiserror::Error;
use tidemark_types::{Value, Word};

/// Errors for out-of-domain checkpoint inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("value {value} exceeds the 192-bit checkpoint value domain")]
    ValueOverflow { value: Word },

    #[error("time {time} exceeds the 64-bit checkpoint time domain")]
    TimeOverflow { time: u128 },
}

/// Narrow a raw 256-bit word to the 192-bit stored value domain.
///
/// `2^192 - 1` is the largest accepted value; the result is numerically
/// unchanged.
pub fn check_value(raw: Word) -> Result<Value, BoundsError> {
    let hi = u64::try_from(raw.high()).map_err(|_| BoundsError::ValueOverflow { value: raw })?;
    Ok(Value::from_limbs(hi, raw.low()))
}

/// Narrow a raw time to the 64-bit stored time domain.
///
/// `2^64 - 1` is the largest accepted time; the result is numerically
/// unchanged.
pub fn check_time(raw: u128) -> Result<u64, BoundsError> {
    u64::try_from(raw).map_err(|_| BoundsError::TimeOverflow { time: raw })
}
