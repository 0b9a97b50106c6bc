//! Scaled integer exchange rate between the pair's tokens.

use core::fmt;

use super::{Amount, Decimals};
use crate::error::{Result, RouterError};

/// An exchange rate expressed as quote units per base unit, scaled by
/// `10^decimals` (see [`Decimals`]).
///
/// Both venues quote in this representation: the AMM's instantaneous
/// marginal price is `reserve_quote * 10^d / reserve_base`, and the order
/// book's resting levels are integers on the same scale. A book side with
/// no resting liquidity is represented as `Option<Price>::None` by the
/// venue contract, so zero never doubles as a sentinel; it remains a
/// valid (degenerate) marginal price that heavily skewed reserves can
/// floor to.
///
/// Prices are directional at the point of use — a buy-side and a
/// sell-side book price for the same pair need not be equal — but the
/// representation is the same for both.
///
/// # Examples
///
/// ```
/// use crossbook::domain::{Amount, Decimals, Price};
///
/// let d = Decimals::new(8).expect("valid decimals");
/// // 1 base = 1.5 quote, scaled by 10^8:
/// let price = Price::from_ratio(Amount::new(3), Amount::new(2), d).expect("finite ratio");
/// assert_eq!(price.get(), 150_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct Price(u128);

impl Price {
    /// Degenerate price of zero.
    pub const ZERO: Self = Self(0);

    /// Creates a `Price` from an already-scaled integer value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying scaled integer.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes a scaled price from two amounts:
    /// `quote * 10^decimals / base`, rounded down.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DivisionByZero`] if `base` is zero.
    /// - [`RouterError::Overflow`] if the scaled numerator exceeds `u128`.
    pub fn from_ratio(quote: Amount, base: Amount, decimals: Decimals) -> Result<Self> {
        if base.is_zero() {
            return Err(RouterError::DivisionByZero);
        }
        let scaled = quote
            .get()
            .checked_mul(decimals.factor())
            .ok_or(RouterError::Overflow("price numerator exceeds u128"))?;
        Ok(Self(scaled / base.get()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
