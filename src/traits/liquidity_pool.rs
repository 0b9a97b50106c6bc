//! Constant-product pool contract.

use crate::domain::{Address, Amount, PoolReserves};
use crate::error::Result;

/// External contract of the constant-product pool venue.
///
/// The pool owns its reserves; the router reads them fresh at every point
/// of use and never caches a snapshot across calls. A swap follows the
/// pay-first convention: the router transfers the input into the pool's
/// account through the token ledger, then calls [`LiquidityPool::swap`]
/// naming only the outputs. The pool discovers the paid input from its
/// own balances and enforces its invariant internally — a swap that would
/// shrink the fee-adjusted product must fail.
///
/// Output positions follow the pool's canonical token ordering: the
/// amount for the canonically first token goes in `amount0_out`, the
/// other in `amount1_out`. Exactly one of the two is non-zero for a
/// router-initiated swap.
pub trait LiquidityPool {
    /// Returns the current reserve snapshot in canonical token order.
    ///
    /// # Errors
    ///
    /// Implementations report venue-specific failures through
    /// [`RouterError`](crate::error::RouterError).
    fn reserves(&self) -> Result<PoolReserves>;

    /// Executes a swap, sending `amount0_out`/`amount1_out` to
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// Fails if the pool's invariant would be violated, an output exceeds
    /// its reserve, or the output transfer fails.
    fn swap(&mut self, amount0_out: Amount, amount1_out: Amount, recipient: Address)
        -> Result<()>;
}
