//! Collaborator contracts consumed by the router.
//!
//! The router never owns venue state: the pool, the order book, the token
//! ledger, the caller-verification oracle, and the clock are all external
//! systems reached through the traits in this module. Reference
//! in-memory implementations live in [`crate::venues`]; tests and
//! embedders can substitute their own.

mod clock;
mod liquidity_pool;
mod order_book;
mod token_ledger;
mod witness;

pub use clock::Clock;
pub use liquidity_pool::LiquidityPool;
pub use order_book::OrderBookVenue;
pub use token_ledger::TokenLedger;
pub use witness::WitnessChecker;
