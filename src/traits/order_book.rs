//! Order-book venue contract.

use crate::domain::{Address, Amount, Decimals, Price, Side};
use crate::error::Result;

/// External contract of the order-book venue.
///
/// The book's matching and storage internals are out of scope; the
/// router consumes only this query/execute surface and treats each call
/// as an atomic black box. Prices are quote-per-base integers scaled by
/// [`quote_decimals`](OrderBookVenue::quote_decimals), and a side with no
/// resting liquidity reports `None` rather than a sentinel value.
///
/// The two quote operations simulate fills across a contiguous price
/// range without touching book state; `start` is the better price and
/// `end` the worse one (equal for a single level). Amounts on the input
/// side are always denominated in the taker's input token.
pub trait OrderBookVenue {
    /// Returns the best resting price on `side`, or `None` if that side
    /// is empty.
    ///
    /// # Errors
    ///
    /// Implementations report venue-specific failures through
    /// [`RouterError`](crate::error::RouterError).
    fn best_price(&self, token_in: Address, token_out: Address, side: Side)
        -> Result<Option<Price>>;

    /// Returns the next price level strictly worse than `from` on
    /// `side`, or `None` when the side is exhausted past `from`.
    ///
    /// # Errors
    ///
    /// See [`OrderBookVenue::best_price`].
    fn next_price(
        &self,
        token_in: Address,
        token_out: Address,
        side: Side,
        from: Price,
    ) -> Result<Option<Price>>;

    /// Simulates spending up to `amount_in` across the levels in
    /// `[start, end]`, returning `(leftover_in, amount_out)`.
    ///
    /// # Errors
    ///
    /// See [`OrderBookVenue::best_price`].
    fn quote_amount_out(
        &self,
        token_in: Address,
        token_out: Address,
        start: Price,
        end: Price,
        amount_in: Amount,
    ) -> Result<(Amount, Amount)>;

    /// Simulates acquiring up to `amount_out` across the levels in
    /// `[start, end]`, returning `(leftover_out, amount_in)`.
    ///
    /// # Errors
    ///
    /// See [`OrderBookVenue::best_price`].
    fn quote_amount_in(
        &self,
        token_in: Address,
        token_out: Address,
        start: Price,
        end: Price,
        amount_out: Amount,
    ) -> Result<(Amount, Amount)>;

    /// Fills against resting orders at exactly `price`, spending up to
    /// `amount` of the input token on behalf of `trader`. Returns the
    /// unfilled input remainder (zero when fully filled).
    ///
    /// # Errors
    ///
    /// Fails if settlement against the trader or the book's escrow
    /// fails; partial fills are reported via the remainder, not as
    /// errors.
    fn execute_market_order(
        &mut self,
        token_in: Address,
        token_out: Address,
        trader: Address,
        side: Side,
        price: Price,
        amount: Amount,
    ) -> Result<Amount>;

    /// Returns the price scaling for the pair, as the book quotes it.
    ///
    /// # Errors
    ///
    /// See [`OrderBookVenue::best_price`].
    fn quote_decimals(&self, token_in: Address, token_out: Address) -> Result<Decimals>;
}
