//! Time source contract.

/// External time source used for the single deadline check at entry.
///
/// The router never reads time anywhere else, so the granularity and
/// epoch are whatever the embedding environment uses for its deadlines.
pub trait Clock {
    /// Returns the current timestamp.
    fn now(&self) -> u64;
}
