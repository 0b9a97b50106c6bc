//! Route planning: the read-only loop that splits a request between the
//! venues.
//!
//! Planning mutates nothing. Each iteration compares the AMM's marginal
//! price against the current book level; while the AMM is strictly
//! better, it absorbs flow up to the convergence amount that pulls its
//! price level-even, then the book level is consumed, then the loop
//! advances to the next worse level. Whatever remains after the book is
//! exhausted is filled entirely by the AMM against the final simulated
//! reserves. The planned leftover shrinks monotonically and ends at zero
//! or venue exhaustion.
//!
//! A slice whose output would round to zero is never planned: executing
//! it would burn input for nothing, and the pool rejects zero-output
//! swaps outright.

use tracing::debug;

use crate::domain::{Amount, Direction, FillPlan};
use crate::error::{Result, RouterError};
use crate::math::constant_product;
use crate::router::compare::{preferred_venue, Venue};
use crate::router::Router;
use crate::traits::{Clock, LiquidityPool, OrderBookVenue, TokenLedger, WitnessChecker};

/// Clamps a signed convergence amount to a usable slice size.
///
/// Negative values mean the pool already sits at or beyond the target
/// price, so there is nothing to route its way.
fn clamp_positive(value: i128) -> Amount {
    if value <= 0 {
        return Amount::ZERO;
    }
    #[allow(clippy::cast_sign_loss)]
    let clamped = value as u128;
    Amount::new(clamped)
}

impl<P, B, L, W, C> Router<P, B, L, W, C>
where
    P: LiquidityPool,
    B: OrderBookVenue,
    L: TokenLedger,
    W: WitnessChecker,
    C: Clock,
{
    /// Simulates a full multi-venue fill of up to `amount_in_max` input
    /// and returns the aggregate output, without mutating any venue.
    ///
    /// # Errors
    ///
    /// Propagates formula precondition and venue errors; see
    /// [`RouterError`].
    pub fn quote_amount_out_hybrid(
        &self,
        amount_in_max: Amount,
        direction: Direction,
    ) -> Result<Amount> {
        Ok(self.plan_exact_in(amount_in_max, direction)?.total_out())
    }

    /// Simulates acquiring `amount_out_target` output across both venues
    /// and returns the aggregate input required, without mutating any
    /// venue.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InsufficientLiquidity`] if the venues
    /// cannot supply the requested output; otherwise propagates formula
    /// and venue errors.
    pub fn quote_amount_in_hybrid(
        &self,
        amount_out_target: Amount,
        direction: Direction,
    ) -> Result<Amount> {
        Ok(self.plan_exact_out(amount_out_target, direction)?.total_in())
    }

    /// Builds the slice plan for an exact-input route.
    pub(crate) fn plan_exact_in(
        &self,
        amount_in_max: Amount,
        direction: Direction,
    ) -> Result<FillPlan> {
        if amount_in_max.is_zero() {
            return Err(RouterError::InvalidAmount(
                "requested amount must be non-zero",
            ));
        }
        let (token_in, token_out) = self.route_tokens(direction);
        let side = direction.taker_side();
        let decimals = self.book.quote_decimals(token_in, token_out)?;
        let mut reserves = self.oriented_reserves(direction)?;
        let mut plan = FillPlan::new();
        let mut left = amount_in_max;
        let mut level = self.book.best_price(token_in, token_out, side)?;
        debug!(%direction, amount = %amount_in_max, "planning exact-in route");

        while let Some(book_price) = level {
            if left.is_zero() {
                break;
            }
            let amm_price = reserves.marginal_price(direction, decimals)?;
            if preferred_venue(direction, amm_price, book_price) == Venue::Amm {
                let to_pool = clamp_positive(constant_product::amount_to_reach_price(
                    direction.is_buying_base(),
                    book_price,
                    decimals,
                    reserves,
                )?);
                if to_pool >= left {
                    // The whole remainder fits inside the region where the
                    // AMM beats the level; the tail fill below takes it.
                    break;
                }
                if !to_pool.is_zero() {
                    let out = constant_product::amount_out(to_pool, reserves)?;
                    if !out.is_zero() {
                        debug!(slice_in = %to_pool, slice_out = %out, target = %book_price,
                            "amm slice to book price");
                        plan.push_amm(to_pool, out)?;
                        reserves.apply_slice(to_pool, out)?;
                        left = left
                            .checked_sub(&to_pool)
                            .ok_or(RouterError::Underflow("amm slice exceeds leftover"))?;
                    }
                }
            }
            if left.is_zero() {
                break;
            }

            let (leftover, out) =
                self.book
                    .quote_amount_out(token_in, token_out, book_price, book_price, left)?;
            let consumed = left
                .checked_sub(&leftover)
                .ok_or(RouterError::Underflow("book consumed more than offered"))?;
            if !consumed.is_zero() {
                debug!(price = %book_price, %consumed, slice_out = %out, "book slice");
                plan.push_book(book_price, consumed, out)?;
                left = leftover;
            }

            level = if self.config().walk_book_levels() {
                self.book
                    .next_price(token_in, token_out, side, book_price)?
            } else {
                None
            };
        }

        if !left.is_zero() {
            let out = constant_product::amount_out(left, reserves)?;
            if !out.is_zero() {
                debug!(tail_in = %left, tail_out = %out, "amm tail fill");
                plan.push_amm(left, out)?;
            }
        }
        Ok(plan)
    }

    /// Builds the slice plan for an exact-output route.
    pub(crate) fn plan_exact_out(
        &self,
        amount_out_target: Amount,
        direction: Direction,
    ) -> Result<FillPlan> {
        if amount_out_target.is_zero() {
            return Err(RouterError::InvalidAmount(
                "requested amount must be non-zero",
            ));
        }
        let (token_in, token_out) = self.route_tokens(direction);
        let side = direction.taker_side();
        let decimals = self.book.quote_decimals(token_in, token_out)?;
        let mut reserves = self.oriented_reserves(direction)?;
        let mut plan = FillPlan::new();
        let mut left = amount_out_target;
        let mut level = self.book.best_price(token_in, token_out, side)?;
        debug!(%direction, amount = %amount_out_target, "planning exact-out route");

        while let Some(book_price) = level {
            if left.is_zero() {
                break;
            }
            let amm_price = reserves.marginal_price(direction, decimals)?;
            if preferred_venue(direction, amm_price, book_price) == Venue::Amm {
                let to_pool = clamp_positive(constant_product::amount_to_reach_price(
                    direction.is_buying_base(),
                    book_price,
                    decimals,
                    reserves,
                )?);
                if !to_pool.is_zero() {
                    let out_pool = constant_product::amount_out(to_pool, reserves)?;
                    if out_pool >= left {
                        // The remainder is available from the AMM at
                        // better-than-level prices; the tail fill sizes
                        // the exact input.
                        break;
                    }
                    if !out_pool.is_zero() {
                        debug!(slice_in = %to_pool, slice_out = %out_pool, target = %book_price,
                            "amm slice to book price");
                        plan.push_amm(to_pool, out_pool)?;
                        reserves.apply_slice(to_pool, out_pool)?;
                        left = left
                            .checked_sub(&out_pool)
                            .ok_or(RouterError::Underflow("amm slice exceeds leftover"))?;
                    }
                }
            }
            if left.is_zero() {
                break;
            }

            let (leftover, paid) =
                self.book
                    .quote_amount_in(token_in, token_out, book_price, book_price, left)?;
            let filled = left
                .checked_sub(&leftover)
                .ok_or(RouterError::Underflow("book filled more than requested"))?;
            if !filled.is_zero() {
                debug!(price = %book_price, %filled, slice_in = %paid, "book slice");
                plan.push_book(book_price, paid, filled)?;
                left = leftover;
            }

            level = if self.config().walk_book_levels() {
                self.book
                    .next_price(token_in, token_out, side, book_price)?
            } else {
                None
            };
        }

        if !left.is_zero() {
            let need_in = constant_product::amount_in(left, reserves)?;
            debug!(tail_in = %need_in, tail_out = %left, "amm tail fill");
            plan.push_amm(need_in, left)?;
        }
        Ok(plan)
    }
}
