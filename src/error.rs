//! Unified error types for the Crossbook router.
//!
//! All fallible operations across the crate return [`RouterError`] as
//! their error type. Every failure is fatal to the call that produced it:
//! nothing is retried internally, and the hybrid entry points never apply
//! a partial fill once a bound check has failed.

use thiserror::Error;

use crate::domain::{Address, Amount};

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, RouterError>;

/// Unified error enum for routing, settlement, and the formula engine.
///
/// Variants carry the structured context a diagnostic consumer needs:
/// the offending token or trader, the violated bound, or a short static
/// description of the arithmetic step that failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RouterError {
    /// The caller could not be verified as the trader it claims to be.
    #[error("witness check failed for trader {trader}")]
    Forbidden {
        /// The account that failed verification.
        trader: Address,
    },

    /// The caller-supplied deadline lies in the past.
    #[error("deadline {deadline} exceeded (current time {now})")]
    DeadlineExceeded {
        /// The caller-supplied ceiling.
        deadline: u64,
        /// The clock reading at entry.
        now: u64,
    },

    /// A zero or otherwise unusable amount reached the formula engine.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A pool reserve required by a formula is zero.
    #[error("pool reserve is zero")]
    ZeroReserve,

    /// The aggregate output fell short of the caller's minimum.
    #[error("insufficient output: required at least {required}, got {available}")]
    InsufficientOutput {
        /// The caller's minimum-out bound.
        required: Amount,
        /// The aggregate output actually achievable.
        available: Amount,
    },

    /// The aggregate input exceeded the caller's maximum.
    #[error("excessive input: limit {limit}, required {required}")]
    ExcessiveInput {
        /// The caller's maximum-in bound.
        limit: Amount,
        /// The aggregate input actually required.
        required: Amount,
    },

    /// The token ledger refused or failed a transfer.
    #[error("transfer failed for token {token}")]
    TransferFailed {
        /// The token whose transfer failed.
        token: Address,
    },

    /// A venue could not supply the liquidity a slice required.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// An intermediate or final value exceeded its representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would have produced a negative amount.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero in a pricing computation.
    #[error("division by zero")]
    DivisionByZero,

    /// A price value violated its construction invariants.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A decimal count outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// Router configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
