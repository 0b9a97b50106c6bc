//! The hybrid router: planning, quoting, and execution across venues.
//!
//! [`Router`] owns handles to its five collaborators and exposes the
//! public entry points:
//!
//! - AMM-only swaps (`swap_exact_in_for_out`, `swap_exact_out_for_in`)
//! - hybrid multi-venue swaps (`swap_exact_in_for_out_hybrid`,
//!   `swap_exact_out_for_in_hybrid`)
//! - the single-slice `swap_till_price`
//! - read-only hybrid quotes (`quote_amount_out_hybrid`,
//!   `quote_amount_in_hybrid`)
//!
//! Every entry point is one synchronous unit of work: verification and
//! deadline first, then planning from fresh venue reads, then the single
//! aggregate bound check, and only then settlement. The loop is bounded
//! by the number of book levels plus one AMM slice.

mod compare;
mod config;
mod execute;
mod plan;

pub use compare::{preferred_venue, Venue};
pub use config::RouterConfig;

use crate::domain::{Address, Amount, Deadline, Direction, Reserves};
use crate::error::{Result, RouterError};
use crate::traits::{Clock, LiquidityPool, OrderBookVenue, TokenLedger, WitnessChecker};

/// Routes swaps across a constant-product pool and an order book.
///
/// The router holds no venue state of its own: reserves and book prices
/// are read fresh at every point of use, because venue state may change
/// between calls. Collaborators are supplied at construction, so venues
/// are swappable and the whole router is testable against the in-memory
/// implementations in [`crate::venues`].
///
/// # Example
///
/// ```
/// use crossbook::domain::{Address, Amount, Deadline, Decimals, Direction, TokenPair};
/// use crossbook::router::{Router, RouterConfig};
/// use crossbook::venues::{FixedClock, LevelBook, MemoryLedger, MemoryPool, WitnessSet};
///
/// let base = Address::from_bytes([1u8; 32]);
/// let quote = Address::from_bytes([2u8; 32]);
/// let trader = Address::from_bytes([9u8; 32]);
/// let ledger = MemoryLedger::new();
///
/// let pool = MemoryPool::new(
///     base,
///     quote,
///     Address::from_bytes([100u8; 32]),
///     ledger.clone(),
///     Amount::new(1_000_000),
///     Amount::new(1_000_000),
/// )
/// .expect("valid pool");
/// let book = LevelBook::new(
///     base,
///     quote,
///     Decimals::new(8).expect("valid decimals"),
///     Address::from_bytes([101u8; 32]),
///     ledger.clone(),
/// )
/// .expect("valid book");
///
/// let pair = TokenPair::new(base, quote).expect("distinct tokens");
/// let config = RouterConfig::new(pair, Address::from_bytes([100u8; 32]), true)
///     .expect("valid config");
/// let mut router = Router::new(
///     config,
///     pool,
///     book,
///     ledger.clone(),
///     WitnessSet::allowing([trader]),
///     FixedClock::at(0),
/// )
/// .expect("valid router");
///
/// // An empty book degenerates to a pure AMM quote.
/// let out = router
///     .quote_amount_out_hybrid(Amount::new(10_000), Direction::AToB)
///     .expect("quote succeeds");
/// assert!(out.get() > 0);
///
/// ledger.mint(base, trader, Amount::new(10_000)).expect("mint");
/// let fill = router
///     .swap_exact_in_for_out_hybrid(
///         trader,
///         Amount::new(10_000),
///         out,
///         Direction::AToB,
///         Deadline::FAR_FUTURE,
///     )
///     .expect("swap succeeds");
/// assert_eq!(fill.total_out, out);
/// ```
pub struct Router<P, B, L, W, C>
where
    P: LiquidityPool,
    B: OrderBookVenue,
    L: TokenLedger,
    W: WitnessChecker,
    C: Clock,
{
    config: RouterConfig,
    pool: P,
    book: B,
    ledger: L,
    witness: W,
    clock: C,
}

impl<P, B, L, W, C> Router<P, B, L, W, C>
where
    P: LiquidityPool,
    B: OrderBookVenue,
    L: TokenLedger,
    W: WitnessChecker,
    C: Clock,
{
    /// Creates a router over the given collaborators.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RouterConfig::validate`].
    pub fn new(
        config: RouterConfig,
        pool: P,
        book: B,
        ledger: L,
        witness: W,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pool,
            book,
            ledger,
            witness,
            clock,
        })
    }

    /// Returns the router's configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the pool collaborator.
    #[must_use]
    pub const fn pool(&self) -> &P {
        &self.pool
    }

    /// Returns the order-book collaborator.
    #[must_use]
    pub const fn book(&self) -> &B {
        &self.book
    }

    /// Returns a mutable handle to the order-book collaborator, for
    /// placing resting liquidity in fixtures.
    pub fn book_mut(&mut self) -> &mut B {
        &mut self.book
    }

    /// Returns the ledger collaborator.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the pair's `(token_in, token_out)` for a direction.
    pub(crate) fn route_tokens(&self, direction: Direction) -> (Address, Address) {
        let pair = self.config.tokens();
        match direction {
            Direction::AToB => (pair.base(), pair.quote()),
            Direction::BToA => (pair.quote(), pair.base()),
        }
    }

    /// Reads a fresh reserve snapshot and orients it for `direction`.
    pub(crate) fn oriented_reserves(&self, direction: Direction) -> Result<Reserves> {
        let snapshot = self.pool.reserves()?;
        Ok(Reserves::oriented(
            snapshot,
            self.config.tokens().base_is_token0(),
            direction,
        ))
    }

    /// Verifies the caller may act as `trader`.
    pub(crate) fn authorize(&self, trader: Address) -> Result<()> {
        if !self.witness.check_witness(trader) {
            return Err(RouterError::Forbidden { trader });
        }
        Ok(())
    }

    /// Checks the caller-supplied deadline against the clock, once.
    pub(crate) fn check_deadline(&self, deadline: Deadline) -> Result<()> {
        let now = self.clock.now();
        if deadline.is_expired(now) {
            return Err(RouterError::DeadlineExceeded {
                deadline: deadline.get(),
                now,
            });
        }
        Ok(())
    }

    /// Invokes the pool swap with `amount_out` on the output position
    /// dictated by canonical token ordering.
    pub(crate) fn pool_swap_out(
        &mut self,
        direction: Direction,
        amount_out: Amount,
        recipient: Address,
    ) -> Result<()> {
        let (_, token_out) = self.route_tokens(direction);
        if token_out == self.config.tokens().token0() {
            self.pool.swap(amount_out, Amount::ZERO, recipient)
        } else {
            self.pool.swap(Amount::ZERO, amount_out, recipient)
        }
    }
}
