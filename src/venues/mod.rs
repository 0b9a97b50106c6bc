//! In-memory reference implementations of the collaborator contracts.
//!
//! These venues exist so the router can be exercised end-to-end without
//! an external chain: a shared-balance token ledger, a constant-product
//! pair that enforces the fee-adjusted invariant against its own
//! balances, a price-level order book settling through the same ledger,
//! and trivial clock/witness oracles. Embedders targeting real venues
//! implement the [`crate::traits`] contracts themselves.

mod constant_product;
mod level_book;
mod memory_ledger;

pub use constant_product::MemoryPool;
pub use level_book::LevelBook;
pub use memory_ledger::{FixedClock, MemoryLedger, WitnessSet};
