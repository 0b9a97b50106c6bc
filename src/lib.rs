//! # Crossbook
//!
//! Hybrid swap router: fills a token-exchange request across a
//! constant-product AMM pool and a price-level order book, alternating
//! between the venues so the taker always trades against whichever one
//! prices the next slice better.
//!
//! The core is the routing algorithm: the fee-adjusted constant-product
//! formulas, the price-convergence formula (the input that moves the
//! pool's marginal price onto a book level), and the iterative loop that
//! consumes the pool and successive book levels until the request is
//! filled or liquidity runs out. Whatever remains after the book is
//! exhausted is filled by the pool alone.
//!
//! External systems — the pool, the order book's matching engine, the
//! token ledger, caller verification, and the clock — are collaborators
//! behind the traits in [`traits`], never part of the router. In-memory
//! reference implementations live in [`venues`] so the crate can be
//! exercised end-to-end without a chain.
//!
//! # Quick Start
//!
//! ```rust
//! use crossbook::prelude::*;
//!
//! let base = Address::from_bytes([1u8; 32]);
//! let quote = Address::from_bytes([2u8; 32]);
//! let trader = Address::from_bytes([9u8; 32]);
//! let pool_account = Address::from_bytes([100u8; 32]);
//! let book_account = Address::from_bytes([101u8; 32]);
//! let decimals = Decimals::new(8).expect("valid decimals");
//! let ledger = MemoryLedger::new();
//!
//! // A pool at price 1.0 and a book bidding 0.95 for the base token.
//! let pool = MemoryPool::new(
//!     base, quote, pool_account, ledger.clone(),
//!     Amount::new(1_000_000), Amount::new(1_000_000),
//! ).expect("valid pool");
//! let mut book = LevelBook::new(base, quote, decimals, book_account, ledger.clone())
//!     .expect("valid book");
//! book.place(Side::Buy, Price::new(95_000_000), Amount::new(50_000)).expect("level placed");
//! ledger.mint(quote, book_account, Amount::new(100_000)).expect("escrow funded");
//!
//! let pair = TokenPair::new(base, quote).expect("distinct tokens");
//! let config = RouterConfig::new(pair, pool_account, true).expect("valid config");
//! let mut router = Router::new(
//!     config, pool, book, ledger.clone(),
//!     WitnessSet::allowing([trader]), FixedClock::at(0),
//! ).expect("valid router");
//!
//! // Quote, then execute against unchanged venues: identical outcome.
//! let amount_in = Amount::new(40_000);
//! let quoted = router.quote_amount_out_hybrid(amount_in, Direction::AToB)
//!     .expect("quote succeeds");
//! ledger.mint(base, trader, amount_in).expect("trader funded");
//! let fill = router.swap_exact_in_for_out_hybrid(
//!     trader, amount_in, quoted, Direction::AToB, Deadline::FAR_FUTURE,
//! ).expect("swap succeeds");
//!
//! assert_eq!(fill.total_out, quoted);
//! // The book bid beat the pool for part of the flow.
//! assert!(fill.book_in.get() > 0);
//! assert!(fill.amm_in.get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐
//! │   Caller    │  swap / quote entry points
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   Router    │  plan (read-only loop) → bound check → settle
//! └─────┬──────┘
//!       │ comparator picks the venue per slice
//!       ▼
//! ┌────────────┐   ┌────────────┐
//! │ AMM engine  │   │ Book venue  │  formulas vs. price levels
//! └─────┬──────┘   └─────┬──────┘
//!       ▼                ▼
//! ┌──────────────────────────────┐
//! │ Collaborators (traits)        │  pool, book, ledger, witness, clock
//! └──────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`Direction`](domain::Direction), [`Reserves`](domain::Reserves), … |
//! | [`math`]   | Integer square root, rounding division, and the constant-product formula engine |
//! | [`traits`] | Collaborator contracts: [`LiquidityPool`](traits::LiquidityPool), [`OrderBookVenue`](traits::OrderBookVenue), [`TokenLedger`](traits::TokenLedger), … |
//! | [`venues`] | In-memory reference venues: [`MemoryPool`](venues::MemoryPool), [`LevelBook`](venues::LevelBook), [`MemoryLedger`](venues::MemoryLedger) |
//! | [`router`] | [`Router`](router::Router), [`RouterConfig`](router::RouterConfig), planning and settlement |
//! | [`error`]  | [`RouterError`](error::RouterError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod domain;
pub mod error;
pub mod math;
pub mod prelude;
pub mod router;
pub mod traits;
pub mod venues;
