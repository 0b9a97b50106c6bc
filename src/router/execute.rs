//! Entry points with effects, and the settlement gateway.
//!
//! Every mutating entry point follows the same shape: verify the
//! trader's witness, check the deadline once, build or compute the fill
//! from fresh venue reads, check the caller's bound against the
//! aggregate, and only then move tokens. No effect precedes the bound
//! check, so a violated bound aborts with all balances untouched. A
//! failure during settlement itself (a refused transfer, a book level
//! that vanished) is fatal and reported for the embedder to unwind.

use tracing::{debug, info, warn};

use crate::domain::{Amount, Deadline, Decimals, Direction, FillPlan, Price, RouteFill, Slice};
use crate::error::{Result, RouterError};
use crate::math::constant_product;
use crate::router::Router;
use crate::traits::{Clock, LiquidityPool, OrderBookVenue, TokenLedger, WitnessChecker};

fn amm_only_fill(amount_in: Amount, amount_out: Amount) -> RouteFill {
    RouteFill {
        total_in: amount_in,
        total_out: amount_out,
        amm_in: amount_in,
        amm_out: amount_out,
        book_in: Amount::ZERO,
        book_out: Amount::ZERO,
    }
}

impl<P, B, L, W, C> Router<P, B, L, W, C>
where
    P: LiquidityPool,
    B: OrderBookVenue,
    L: TokenLedger,
    W: WitnessChecker,
    C: Clock,
{
    /// Swaps an exact input against the AMM only.
    ///
    /// # Errors
    ///
    /// [`RouterError::Forbidden`], [`RouterError::DeadlineExceeded`],
    /// formula preconditions, [`RouterError::InsufficientOutput`] if the
    /// output falls below `min_out`, or a transfer/pool failure during
    /// settlement.
    pub fn swap_exact_in_for_out(
        &mut self,
        trader: crate::domain::Address,
        amount_in: Amount,
        min_out: Amount,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<RouteFill> {
        self.authorize(trader)?;
        self.check_deadline(deadline)?;

        let reserves = self.oriented_reserves(direction)?;
        let amount_out = constant_product::amount_out(amount_in, reserves)?;
        if amount_out < min_out {
            warn!(%amount_out, %min_out, "aborting: output below minimum");
            return Err(RouterError::InsufficientOutput {
                required: min_out,
                available: amount_out,
            });
        }

        self.transfer_in_and_swap(trader, direction, amount_in, amount_out)?;
        info!(%trader, %direction, %amount_in, %amount_out, "amm swap executed");
        Ok(amm_only_fill(amount_in, amount_out))
    }

    /// Swaps for an exact output against the AMM only.
    ///
    /// # Errors
    ///
    /// As [`Router::swap_exact_in_for_out`], with
    /// [`RouterError::ExcessiveInput`] if the required input exceeds
    /// `max_in`.
    pub fn swap_exact_out_for_in(
        &mut self,
        trader: crate::domain::Address,
        amount_out: Amount,
        max_in: Amount,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<RouteFill> {
        self.authorize(trader)?;
        self.check_deadline(deadline)?;

        let reserves = self.oriented_reserves(direction)?;
        let amount_in = constant_product::amount_in(amount_out, reserves)?;
        if amount_in > max_in {
            warn!(%amount_in, %max_in, "aborting: input above maximum");
            return Err(RouterError::ExcessiveInput {
                limit: max_in,
                required: amount_in,
            });
        }

        self.transfer_in_and_swap(trader, direction, amount_in, amount_out)?;
        info!(%trader, %direction, %amount_in, %amount_out, "amm swap executed");
        Ok(amm_only_fill(amount_in, amount_out))
    }

    /// Fills up to `amount_in_max` across both venues, best price first.
    ///
    /// The fill is planned from fresh venue reads, the aggregate output
    /// is checked against `min_out`, and only then are the slices
    /// settled in order.
    ///
    /// # Errors
    ///
    /// As [`Router::swap_exact_in_for_out`];
    /// [`RouterError::InsufficientLiquidity`] if a planned book slice can
    /// no longer fill completely.
    pub fn swap_exact_in_for_out_hybrid(
        &mut self,
        trader: crate::domain::Address,
        amount_in_max: Amount,
        min_out: Amount,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<RouteFill> {
        self.authorize(trader)?;
        self.check_deadline(deadline)?;

        let plan = self.plan_exact_in(amount_in_max, direction)?;
        if plan.total_out() < min_out {
            warn!(available = %plan.total_out(), %min_out, "aborting: output below minimum");
            return Err(RouterError::InsufficientOutput {
                required: min_out,
                available: plan.total_out(),
            });
        }

        let fill = self.settle_plan(trader, direction, &plan)?;
        info!(%trader, %direction, %fill, "hybrid swap executed");
        Ok(fill)
    }

    /// Acquires `amount_out` across both venues, best price first.
    ///
    /// # Errors
    ///
    /// As [`Router::swap_exact_out_for_in`];
    /// [`RouterError::InsufficientLiquidity`] if the venues cannot supply
    /// the output or a planned book slice can no longer fill.
    pub fn swap_exact_out_for_in_hybrid(
        &mut self,
        trader: crate::domain::Address,
        amount_out: Amount,
        max_in: Amount,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<RouteFill> {
        self.authorize(trader)?;
        self.check_deadline(deadline)?;

        let plan = self.plan_exact_out(amount_out, direction)?;
        if plan.total_in() > max_in {
            warn!(required = %plan.total_in(), %max_in, "aborting: input above maximum");
            return Err(RouterError::ExcessiveInput {
                limit: max_in,
                required: plan.total_in(),
            });
        }

        let fill = self.settle_plan(trader, direction, &plan)?;
        info!(%trader, %direction, %fill, "hybrid swap executed");
        Ok(fill)
    }

    /// Executes a single AMM slice sized to move the pool's marginal
    /// price to `target_price`.
    ///
    /// The target comes from the caller, not the book — external
    /// arbitrage closers supply the price they want the pool parked at.
    /// Both bounds are enforced: the slice must yield at least `min_out`
    /// and cost at most `max_in`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidAmount`] if the pool already sits at or
    /// beyond the target; otherwise as
    /// [`Router::swap_exact_in_for_out`] and
    /// [`Router::swap_exact_out_for_in`].
    #[allow(clippy::too_many_arguments)]
    pub fn swap_till_price(
        &mut self,
        trader: crate::domain::Address,
        max_in: Amount,
        min_out: Amount,
        target_price: Price,
        decimals: Decimals,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<RouteFill> {
        self.authorize(trader)?;
        self.check_deadline(deadline)?;

        let reserves = self.oriented_reserves(direction)?;
        let needed = constant_product::amount_to_reach_price(
            direction.is_buying_base(),
            target_price,
            decimals,
            reserves,
        )?;
        if needed <= 0 {
            return Err(RouterError::InvalidAmount(
                "pool already at or beyond the target price",
            ));
        }
        #[allow(clippy::cast_sign_loss)]
        let amount_in = Amount::new(needed as u128);
        let amount_out = constant_product::amount_out(amount_in, reserves)?;

        if amount_out < min_out {
            warn!(%amount_out, %min_out, "aborting: output below minimum");
            return Err(RouterError::InsufficientOutput {
                required: min_out,
                available: amount_out,
            });
        }
        if amount_in > max_in {
            warn!(%amount_in, %max_in, "aborting: input above maximum");
            return Err(RouterError::ExcessiveInput {
                limit: max_in,
                required: amount_in,
            });
        }

        self.transfer_in_and_swap(trader, direction, amount_in, amount_out)?;
        info!(%trader, %direction, %amount_in, %amount_out, %target_price,
            "price-targeted swap executed");
        Ok(amm_only_fill(amount_in, amount_out))
    }

    /// Pays the input into the pool account and invokes the pool swap
    /// for the given output.
    fn transfer_in_and_swap(
        &mut self,
        trader: crate::domain::Address,
        direction: Direction,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<()> {
        let (token_in, _) = self.route_tokens(direction);
        let pool_account = self.config().pool_account();
        self.ledger_transfer(token_in, trader, pool_account, amount_in)?;
        self.pool_swap_out(direction, amount_out, trader)
    }

    /// Applies a fill plan slice by slice.
    ///
    /// AMM slices never trust the simulated reserves: each one re-reads
    /// the pool (its state advanced with the previous slice) and
    /// recomputes the output before transferring. Book slices execute at
    /// their planned level and must fill completely — a non-zero
    /// leftover means the venue diverged from the plan, which the
    /// serialized execution model rules out.
    fn settle_plan(
        &mut self,
        trader: crate::domain::Address,
        direction: Direction,
        plan: &FillPlan,
    ) -> Result<RouteFill> {
        let (token_in, token_out) = self.route_tokens(direction);
        let side = direction.taker_side();
        let pool_account = self.config().pool_account();

        let mut amm_in = Amount::ZERO;
        let mut amm_out = Amount::ZERO;
        let mut book_in = Amount::ZERO;
        let mut book_out = Amount::ZERO;

        for slice in plan.slices() {
            match *slice {
                Slice::Amm { amount_in, .. } => {
                    let reserves = self.oriented_reserves(direction)?;
                    let amount_out = constant_product::amount_out(amount_in, reserves)?;
                    self.ledger_transfer(token_in, trader, pool_account, amount_in)?;
                    self.pool_swap_out(direction, amount_out, trader)?;
                    debug!(%amount_in, %amount_out, "settled amm slice");
                    amm_in = amm_in
                        .checked_add(&amount_in)
                        .ok_or(RouterError::Overflow("settled input exceeds u128"))?;
                    amm_out = amm_out
                        .checked_add(&amount_out)
                        .ok_or(RouterError::Overflow("settled output exceeds u128"))?;
                }
                Slice::Book {
                    price,
                    amount_in,
                    amount_out,
                } => {
                    let leftover = self.book_execute(
                        token_in, token_out, trader, side, price, amount_in,
                    )?;
                    if !leftover.is_zero() {
                        warn!(%price, %leftover, "book level no longer covers planned slice");
                        return Err(RouterError::InsufficientLiquidity);
                    }
                    debug!(%price, %amount_in, %amount_out, "settled book slice");
                    book_in = book_in
                        .checked_add(&amount_in)
                        .ok_or(RouterError::Overflow("settled input exceeds u128"))?;
                    book_out = book_out
                        .checked_add(&amount_out)
                        .ok_or(RouterError::Overflow("settled output exceeds u128"))?;
                }
            }
        }

        let total_in = amm_in
            .checked_add(&book_in)
            .ok_or(RouterError::Overflow("settled input exceeds u128"))?;
        let total_out = amm_out
            .checked_add(&book_out)
            .ok_or(RouterError::Overflow("settled output exceeds u128"))?;
        Ok(RouteFill {
            total_in,
            total_out,
            amm_in,
            amm_out,
            book_in,
            book_out,
        })
    }

    fn ledger_transfer(
        &mut self,
        token: crate::domain::Address,
        from: crate::domain::Address,
        to: crate::domain::Address,
        amount: Amount,
    ) -> Result<()> {
        self.ledger.transfer(token, from, to, amount)
    }

    fn book_execute(
        &mut self,
        token_in: crate::domain::Address,
        token_out: crate::domain::Address,
        trader: crate::domain::Address,
        side: crate::domain::Side,
        price: Price,
        amount: Amount,
    ) -> Result<Amount> {
        self.book
            .execute_market_order(token_in, token_out, trader, side, price, amount)
    }
}
