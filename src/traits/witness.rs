//! Caller verification contract.

use crate::domain::Address;

/// External oracle answering whether the current caller is authorized to
/// act as a given account.
///
/// Verification itself (signatures, session state) lives outside the
/// router; entry points only consult the result once, before any other
/// work.
pub trait WitnessChecker {
    /// Returns `true` if the caller may act as `account`.
    fn check_witness(&self, account: Address) -> bool;
}
