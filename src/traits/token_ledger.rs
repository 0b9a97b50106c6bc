//! Token transfer contract.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// External contract of the token service.
///
/// One operation: move `amount` of `token` between two accounts. A
/// refusal (the token returning `false`) and a thrown error are both
/// surfaced as [`RouterError::TransferFailed`](crate::error::RouterError)
/// by implementations — the router treats the two identically and aborts
/// the call.
pub trait TokenLedger {
    /// Transfers `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::TransferFailed`](crate::error::RouterError)
    /// if the token refuses or the underlying call fails.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount)
        -> Result<()>;
}
