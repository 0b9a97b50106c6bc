//! Reference price-level order book.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::domain::{Address, Amount, Decimals, Price, Rounding, Side};
use crate::error::{Result, RouterError};
use crate::math::div_round;
use crate::traits::{OrderBookVenue, TokenLedger};
use crate::venues::MemoryLedger;

/// An in-memory order book holding resting liquidity at discrete price
/// levels.
///
/// Only the external contract the router consumes is modeled: two sides
/// of price levels (quantities in base units), range quoting, and
/// exact-price market-order execution settled through the shared ledger.
/// Order identities, time priority, and cancellation are matching-engine
/// internals and deliberately absent.
///
/// The book's escrow account must hold the tokens its resting orders
/// promise: quote tokens behind resting buys, base tokens behind resting
/// sells. [`place`](LevelBook::place) does not move tokens; fixtures fund
/// the escrow directly.
#[derive(Debug, Clone)]
pub struct LevelBook {
    base: Address,
    quote: Address,
    decimals: Decimals,
    account: Address,
    /// Resting buy orders: price → base quantity. Best price is the
    /// highest key.
    buys: BTreeMap<u128, u128>,
    /// Resting sell orders: price → base quantity. Best price is the
    /// lowest key.
    sells: BTreeMap<u128, u128>,
    ledger: MemoryLedger,
}

impl LevelBook {
    /// Creates an empty book for the pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if the tokens are
    /// equal.
    pub fn new(
        base: Address,
        quote: Address,
        decimals: Decimals,
        account: Address,
        ledger: MemoryLedger,
    ) -> Result<Self> {
        if base == quote {
            return Err(RouterError::InvalidConfiguration(
                "order book requires two distinct tokens",
            ));
        }
        Ok(Self {
            base,
            quote,
            decimals,
            account,
            buys: BTreeMap::new(),
            sells: BTreeMap::new(),
            ledger,
        })
    }

    /// Returns the book's escrow account.
    #[must_use]
    pub const fn account(&self) -> Address {
        self.account
    }

    /// Adds resting liquidity of `quantity` base units at `price`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPrice`] if `price` is zero.
    /// - [`RouterError::InvalidAmount`] if `quantity` is zero.
    /// - [`RouterError::Overflow`] if the level quantity exceeds `u128`.
    pub fn place(&mut self, side: Side, price: Price, quantity: Amount) -> Result<()> {
        if price.is_zero() {
            return Err(RouterError::InvalidPrice("resting price must be non-zero"));
        }
        if quantity.is_zero() {
            return Err(RouterError::InvalidAmount(
                "resting quantity must be non-zero",
            ));
        }
        let levels = match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        };
        let level = levels.entry(price.get()).or_insert(0);
        *level = level
            .checked_add(quantity.get())
            .ok_or(RouterError::Overflow("level quantity exceeds u128"))?;
        Ok(())
    }

    /// Returns the number of price levels on `side`.
    #[must_use]
    pub fn depth(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.buys.len(),
            Side::Sell => self.sells.len(),
        }
    }

    /// Maps a `(token_in, token_out)` orientation onto the side the
    /// taker consumes.
    fn taker_side(&self, token_in: Address, token_out: Address) -> Result<Side> {
        if token_in == self.base && token_out == self.quote {
            Ok(Side::Buy)
        } else if token_in == self.quote && token_out == self.base {
            Ok(Side::Sell)
        } else {
            Err(RouterError::InvalidConfiguration(
                "token pair not traded on this book",
            ))
        }
    }

    fn mul_div(a: u128, b: u128, divisor: u128, rounding: Rounding) -> Result<u128> {
        let product = a
            .checked_mul(b)
            .ok_or(RouterError::Overflow("level arithmetic exceeds u128"))?;
        div_round(product, divisor, rounding).ok_or(RouterError::DivisionByZero)
    }

    /// Collects the levels of `side` between `start` (better) and `end`
    /// (worse), best first. An inverted range yields no levels.
    fn levels_in_range(&self, side: Side, start: Price, end: Price) -> Vec<(u128, u128)> {
        match side {
            // Buy levels are walked downwards: start is the higher price.
            Side::Buy => {
                if end.get() > start.get() {
                    return Vec::new();
                }
                self.buys
                    .range(end.get()..=start.get())
                    .rev()
                    .map(|(&p, &q)| (p, q))
                    .collect()
            }
            // Sell levels are walked upwards: start is the lower price.
            Side::Sell => {
                if start.get() > end.get() {
                    return Vec::new();
                }
                self.sells
                    .range(start.get()..=end.get())
                    .map(|(&p, &q)| (p, q))
                    .collect()
            }
        }
    }
}

impl OrderBookVenue for LevelBook {
    fn best_price(
        &self,
        token_in: Address,
        token_out: Address,
        side: Side,
    ) -> Result<Option<Price>> {
        self.taker_side(token_in, token_out)?;
        let best = match side {
            Side::Buy => self.buys.keys().next_back(),
            Side::Sell => self.sells.keys().next(),
        };
        Ok(best.map(|&p| Price::new(p)))
    }

    fn next_price(
        &self,
        token_in: Address,
        token_out: Address,
        side: Side,
        from: Price,
    ) -> Result<Option<Price>> {
        self.taker_side(token_in, token_out)?;
        let next = match side {
            // Next worse buy level is the next lower price.
            Side::Buy => self.buys.range(..from.get()).next_back(),
            // Next worse sell level is the next higher price.
            Side::Sell => self
                .sells
                .range((Bound::Excluded(from.get()), Bound::Unbounded))
                .next(),
        };
        Ok(next.map(|(&p, _)| Price::new(p)))
    }

    fn quote_amount_out(
        &self,
        token_in: Address,
        token_out: Address,
        start: Price,
        end: Price,
        amount_in: Amount,
    ) -> Result<(Amount, Amount)> {
        let side = self.taker_side(token_in, token_out)?;
        let factor = self.decimals.factor();
        let mut left = amount_in.get();
        let mut out: u128 = 0;

        for (price, quantity) in self.levels_in_range(side, start, end) {
            if left == 0 {
                break;
            }
            match side {
                // Selling base: input is base, output is quote.
                Side::Buy => {
                    let fill = left.min(quantity);
                    let proceeds = Self::mul_div(fill, price, factor, Rounding::Down)?;
                    out = out
                        .checked_add(proceeds)
                        .ok_or(RouterError::Overflow("quote output exceeds u128"))?;
                    left -= fill;
                }
                // Buying base: input is quote, output is base.
                Side::Sell => {
                    let affordable = Self::mul_div(left, factor, price, Rounding::Down)?;
                    let take = affordable.min(quantity);
                    if take == 0 {
                        break;
                    }
                    let cost = Self::mul_div(take, price, factor, Rounding::Up)?;
                    out = out
                        .checked_add(take)
                        .ok_or(RouterError::Overflow("quote output exceeds u128"))?;
                    left -= cost;
                }
            }
        }
        Ok((Amount::new(left), Amount::new(out)))
    }

    fn quote_amount_in(
        &self,
        token_in: Address,
        token_out: Address,
        start: Price,
        end: Price,
        amount_out: Amount,
    ) -> Result<(Amount, Amount)> {
        let side = self.taker_side(token_in, token_out)?;
        let factor = self.decimals.factor();
        let mut left = amount_out.get();
        let mut paid: u128 = 0;

        for (price, quantity) in self.levels_in_range(side, start, end) {
            if left == 0 {
                break;
            }
            match side {
                // Output is quote; the level can yield quantity·price.
                Side::Buy => {
                    let capacity = Self::mul_div(quantity, price, factor, Rounding::Down)?;
                    let take = left.min(capacity);
                    if take == 0 {
                        continue;
                    }
                    let cost = Self::mul_div(take, factor, price, Rounding::Up)?;
                    paid = paid
                        .checked_add(cost)
                        .ok_or(RouterError::Overflow("quote input exceeds u128"))?;
                    left -= take;
                }
                // Output is base; pay quantity·price in quote.
                Side::Sell => {
                    let take = left.min(quantity);
                    let cost = Self::mul_div(take, price, factor, Rounding::Up)?;
                    paid = paid
                        .checked_add(cost)
                        .ok_or(RouterError::Overflow("quote input exceeds u128"))?;
                    left -= take;
                }
            }
        }
        Ok((Amount::new(left), Amount::new(paid)))
    }

    fn execute_market_order(
        &mut self,
        token_in: Address,
        token_out: Address,
        trader: Address,
        side: Side,
        price: Price,
        amount: Amount,
    ) -> Result<Amount> {
        let oriented = self.taker_side(token_in, token_out)?;
        if oriented != side {
            return Err(RouterError::InvalidConfiguration(
                "order side does not match token orientation",
            ));
        }
        let factor = self.decimals.factor();

        let levels = match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        };
        let Some(&quantity) = levels.get(&price.get()) else {
            return Ok(amount);
        };

        let (consumed_in, amount_out, filled_base) = match side {
            Side::Buy => {
                let fill = amount.get().min(quantity);
                let proceeds = Self::mul_div(fill, price.get(), factor, Rounding::Down)?;
                (fill, proceeds, fill)
            }
            Side::Sell => {
                let affordable = Self::mul_div(amount.get(), factor, price.get(), Rounding::Down)?;
                let take = affordable.min(quantity);
                let cost = Self::mul_div(take, price.get(), factor, Rounding::Up)?;
                (cost, take, take)
            }
        };
        if filled_base == 0 {
            return Ok(amount);
        }

        // Settle taker input into escrow, escrowed output to the taker.
        self.ledger
            .transfer(token_in, trader, self.account, Amount::new(consumed_in))?;
        self.ledger
            .transfer(token_out, self.account, trader, Amount::new(amount_out))?;

        let levels = match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        };
        if quantity == filled_base {
            levels.remove(&price.get());
        } else {
            levels.insert(price.get(), quantity - filled_base);
        }

        Ok(Amount::new(amount.get() - consumed_in))
    }

    fn quote_decimals(&self, token_in: Address, token_out: Address) -> Result<Decimals> {
        self.taker_side(token_in, token_out)?;
        Ok(self.decimals)
    }
}
