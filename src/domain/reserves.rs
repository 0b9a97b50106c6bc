//! Pool reserve snapshots, raw and direction-oriented.

use super::{Amount, Decimals, Direction, Price};
use crate::error::{Result, RouterError};

/// A raw reserve snapshot as the pool venue reports it.
///
/// `reserve0`/`reserve1` follow the pool's canonical token ordering;
/// [`Reserves::oriented`] maps them onto a trade direction. The snapshot
/// is taken fresh on every query — the router never caches one across
/// calls, because the pool is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    /// Reserve of the canonically first token.
    pub reserve0: Amount,
    /// Reserve of the canonically second token.
    pub reserve1: Amount,
    /// Venue timestamp of the last reserve update.
    pub block_timestamp: u64,
}

/// Reserves oriented for one trade direction: the input-token reserve and
/// the output-token reserve.
///
/// During read-only planning the router advances a copy of this pair
/// slice by slice via [`Reserves::apply_slice`]; during settlement it
/// always re-reads the real thing instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    reserve_in: Amount,
    reserve_out: Amount,
}

impl Reserves {
    /// Creates an oriented reserve pair.
    pub const fn new(reserve_in: Amount, reserve_out: Amount) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Orients a raw snapshot for a trade direction.
    ///
    /// `base_is_token0` states whether the pair's base token is the
    /// canonically first token (see
    /// [`TokenPair::base_is_token0`](super::TokenPair::base_is_token0)).
    #[must_use]
    pub const fn oriented(
        snapshot: PoolReserves,
        base_is_token0: bool,
        direction: Direction,
    ) -> Self {
        // First express the snapshot as (base reserve, quote reserve),
        // then pick input/output by direction.
        let (base, quote) = if base_is_token0 {
            (snapshot.reserve0, snapshot.reserve1)
        } else {
            (snapshot.reserve1, snapshot.reserve0)
        };
        match direction {
            Direction::AToB => Self {
                reserve_in: base,
                reserve_out: quote,
            },
            Direction::BToA => Self {
                reserve_in: quote,
                reserve_out: base,
            },
        }
    }

    /// Returns the input-token reserve.
    #[must_use]
    pub const fn reserve_in(&self) -> Amount {
        self.reserve_in
    }

    /// Returns the output-token reserve.
    #[must_use]
    pub const fn reserve_out(&self) -> Amount {
        self.reserve_out
    }

    /// Returns `true` if either reserve is zero.
    #[must_use]
    pub const fn has_zero_side(&self) -> bool {
        self.reserve_in.is_zero() || self.reserve_out.is_zero()
    }

    /// Computes the pool's instantaneous marginal price, quote units per
    /// base unit scaled by `10^decimals`.
    ///
    /// The quoting convention is direction-independent; only which
    /// reserve holds the quote token changes with the direction.
    ///
    /// # Errors
    ///
    /// - [`RouterError::DivisionByZero`] if the base-side reserve is zero.
    /// - [`RouterError::Overflow`] if the scaled numerator exceeds `u128`.
    pub fn marginal_price(&self, direction: Direction, decimals: Decimals) -> Result<Price> {
        match direction {
            // in = base, out = quote
            Direction::AToB => Price::from_ratio(self.reserve_out, self.reserve_in, decimals),
            // in = quote, out = base
            Direction::BToA => Price::from_ratio(self.reserve_in, self.reserve_out, decimals),
        }
    }

    /// Advances the simulated reserves by one consumed AMM slice.
    ///
    /// # Errors
    ///
    /// - [`RouterError::Overflow`] if the input reserve would exceed `u128`.
    /// - [`RouterError::Underflow`] if the slice output exceeds the
    ///   output reserve.
    pub fn apply_slice(&mut self, amount_in: Amount, amount_out: Amount) -> Result<()> {
        self.reserve_in = self
            .reserve_in
            .checked_add(&amount_in)
            .ok_or(RouterError::Overflow("reserve_in overflow after slice"))?;
        self.reserve_out = self
            .reserve_out
            .checked_sub(&amount_out)
            .ok_or(RouterError::Underflow("reserve_out underflow after slice"))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn d8() -> Decimals {
        let Ok(d) = Decimals::new(8) else {
            panic!("valid decimals");
        };
        d
    }

    fn snapshot(r0: u128, r1: u128) -> PoolReserves {
        PoolReserves {
            reserve0: Amount::new(r0),
            reserve1: Amount::new(r1),
            block_timestamp: 0,
        }
    }

    #[test]
    fn oriented_base_is_token0() {
        let r = Reserves::oriented(snapshot(10, 20), true, Direction::AToB);
        assert_eq!(r.reserve_in(), Amount::new(10));
        assert_eq!(r.reserve_out(), Amount::new(20));

        let r = Reserves::oriented(snapshot(10, 20), true, Direction::BToA);
        assert_eq!(r.reserve_in(), Amount::new(20));
        assert_eq!(r.reserve_out(), Amount::new(10));
    }

    #[test]
    fn oriented_base_is_token1() {
        let r = Reserves::oriented(snapshot(10, 20), false, Direction::AToB);
        // base reserve is reserve1 here
        assert_eq!(r.reserve_in(), Amount::new(20));
        assert_eq!(r.reserve_out(), Amount::new(10));
    }

    #[test]
    fn marginal_price_both_directions_agree() {
        // 2_000_000 quote against 1_000_000 base => price 2.0 scaled
        let a_to_b = Reserves::new(Amount::new(1_000_000), Amount::new(2_000_000));
        let Ok(p1) = a_to_b.marginal_price(Direction::AToB, d8()) else {
            panic!("expected Ok");
        };
        assert_eq!(p1.get(), 200_000_000);

        let b_to_a = Reserves::new(Amount::new(2_000_000), Amount::new(1_000_000));
        let Ok(p2) = b_to_a.marginal_price(Direction::BToA, d8()) else {
            panic!("expected Ok");
        };
        assert_eq!(p2.get(), 200_000_000);
    }

    #[test]
    fn marginal_price_zero_base_rejected() {
        let r = Reserves::new(Amount::ZERO, Amount::new(1));
        assert_eq!(
            r.marginal_price(Direction::AToB, d8()),
            Err(RouterError::DivisionByZero)
        );
    }

    #[test]
    fn apply_slice_moves_both_sides() {
        let mut r = Reserves::new(Amount::new(1_000), Amount::new(1_000));
        let Ok(()) = r.apply_slice(Amount::new(100), Amount::new(90)) else {
            panic!("expected Ok");
        };
        assert_eq!(r.reserve_in(), Amount::new(1_100));
        assert_eq!(r.reserve_out(), Amount::new(910));
    }

    #[test]
    fn apply_slice_underflow_rejected() {
        let mut r = Reserves::new(Amount::new(1_000), Amount::new(50));
        let result = r.apply_slice(Amount::new(100), Amount::new(90));
        assert!(matches!(result, Err(RouterError::Underflow(_))));
    }

    #[test]
    fn has_zero_side() {
        assert!(Reserves::new(Amount::ZERO, Amount::new(1)).has_zero_side());
        assert!(Reserves::new(Amount::new(1), Amount::ZERO).has_zero_side());
        assert!(!Reserves::new(Amount::new(1), Amount::new(1)).has_zero_side());
    }
}
