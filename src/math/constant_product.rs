//! Constant-product formula engine (`x · y = k` with a 0.3% input fee).
//!
//! The three formulas that drive routing:
//!
//! - [`amount_out`] — output for a fixed input, fee deducted from the
//!   input before the invariant division, result rounded down.
//! - [`amount_in`] — input for a fixed output, rounded up so the pool is
//!   never under-compensated.
//! - [`amount_to_reach_price`] — the input that moves the pool's
//!   post-trade marginal price to a target, the closed-form solution of
//!   the fee-adjusted invariant quadratic.
//!
//! All intermediates are computed in arbitrary-width integers, so no
//! reserve magnitude can overflow mid-formula; only the final conversion
//! back to `u128`/`i128` can fail. Division truncates at every step in
//! the same order the formulas are written, which keeps results
//! bit-for-bit reproducible.

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

use crate::domain::{Amount, Decimals, Price, Reserves};
use crate::error::{Result, RouterError};

/// Fee numerator: the pool keeps 3 of every 1000 input units.
pub const FEE_NUMERATOR: u32 = 997;

/// Fee denominator.
pub const FEE_DENOMINATOR: u32 = 1000;

fn big(amount: Amount) -> BigUint {
    BigUint::from(amount.get())
}

fn to_amount(value: &BigUint, context: &'static str) -> Result<Amount> {
    value
        .to_u128()
        .map(Amount::new)
        .ok_or(RouterError::Overflow(context))
}

fn require_reserves(reserves: Reserves) -> Result<()> {
    if reserves.has_zero_side() {
        return Err(RouterError::ZeroReserve);
    }
    Ok(())
}

/// Computes the output amount for an exact input.
///
/// `out = floor(in · 997 · reserve_out / (reserve_in · 1000 + in · 997))`
///
/// # Errors
///
/// - [`RouterError::InvalidAmount`] if `amount_in` is zero.
/// - [`RouterError::ZeroReserve`] if either reserve is zero.
pub fn amount_out(amount_in: Amount, reserves: Reserves) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(RouterError::InvalidAmount("amount_in must be positive"));
    }
    require_reserves(reserves)?;

    let in_with_fee = big(amount_in) * FEE_NUMERATOR;
    let numerator = &in_with_fee * big(reserves.reserve_out());
    let denominator = big(reserves.reserve_in()) * FEE_DENOMINATOR + &in_with_fee;
    let out = numerator / denominator;
    to_amount(&out, "amount_out exceeds u128")
}

/// Computes the input amount for an exact output, rounded up.
///
/// `in = floor(reserve_in · out · 1000 / ((reserve_out − out) · 997)) + 1`
///
/// # Errors
///
/// - [`RouterError::InvalidAmount`] if `amount_out` is zero.
/// - [`RouterError::ZeroReserve`] if either reserve is zero.
/// - [`RouterError::InsufficientLiquidity`] if `amount_out` is not
///   strictly below the output reserve.
/// - [`RouterError::Overflow`] if the required input exceeds `u128`.
pub fn amount_in(amount_out: Amount, reserves: Reserves) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(RouterError::InvalidAmount("amount_out must be positive"));
    }
    require_reserves(reserves)?;
    if amount_out >= reserves.reserve_out() {
        return Err(RouterError::InsufficientLiquidity);
    }

    let numerator = big(reserves.reserve_in()) * big(amount_out) * FEE_DENOMINATOR;
    let denominator = (big(reserves.reserve_out()) - big(amount_out)) * FEE_NUMERATOR;
    let required = numerator / denominator + 1u32;
    to_amount(&required, "amount_in exceeds u128")
}

/// Computes the input amount that brings the pool's post-trade marginal
/// price to `target`, given the 0.3% input fee.
///
/// Solving the fee-adjusted invariant for the post-trade reserve ratio
/// gives the closed form
///
/// ```text
/// t = reserve_in² · 9 / 1_000_000 + reserve_in · reserve_out · term · 3988 / 1000
/// x = (isqrt(t) − reserve_in · 3 / 1000) · 1000 / 1994 − reserve_in
/// ```
///
/// where `term` is `target / 10^d` when buying the base token and its
/// reciprocal `10^d / target` when selling it, since the two directions
/// move the price opposite ways.
///
/// The result can be negative (the pool already sits at or beyond the
/// target) or exceed the available liquidity; callers clamp it against
/// the amount actually remaining.
///
/// # Errors
///
/// - [`RouterError::ZeroReserve`] if either reserve is zero.
/// - [`RouterError::DivisionByZero`] if selling towards a zero target
///   price.
/// - [`RouterError::Overflow`] if the result exceeds `i128`.
pub fn amount_to_reach_price(
    is_buying_base: bool,
    target: Price,
    decimals: Decimals,
    reserves: Reserves,
) -> Result<i128> {
    require_reserves(reserves)?;
    if !is_buying_base && target.is_zero() {
        return Err(RouterError::DivisionByZero);
    }

    let r_in = big(reserves.reserve_in());
    let r_out = big(reserves.reserve_out());
    let pow = BigUint::from(10u32).pow(u32::from(decimals.get()));

    let mut t = &r_in * &r_in * 9u32 / 1_000_000u32;
    t += if is_buying_base {
        &r_in * &r_out * target.get() * 3988u32 / &pow / 1000u32
    } else {
        &r_in * &r_out * &pow * 3988u32 / target.get() / 1000u32
    };

    let root = BigInt::from(crate::math::isqrt(&t));
    let adjusted = BigInt::from(&r_in * 3u32 / 1000u32);
    let x = (root - adjusted) * 1000u32 / 1994u32 - BigInt::from(r_in);
    x.to_i128()
        .ok_or(RouterError::Overflow("amount to reach price exceeds i128"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn reserves(r_in: u128, r_out: u128) -> Reserves {
        Reserves::new(Amount::new(r_in), Amount::new(r_out))
    }

    fn d8() -> Decimals {
        let Ok(d) = Decimals::new(8) else {
            panic!("valid decimals");
        };
        d
    }

    // -- amount_out -----------------------------------------------------------

    #[test]
    fn amount_out_worked_example() {
        // floor(100 * 997 * 1000 / (1000 * 1000 + 100 * 997)) = 90
        let Ok(out) = amount_out(Amount::new(100), reserves(1_000, 1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, Amount::new(90));
    }

    #[test]
    fn amount_out_zero_input_rejected() {
        let result = amount_out(Amount::ZERO, reserves(1_000, 1_000));
        assert!(matches!(result, Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn amount_out_zero_reserve_rejected() {
        assert_eq!(
            amount_out(Amount::new(10), reserves(0, 1_000)),
            Err(RouterError::ZeroReserve)
        );
        assert_eq!(
            amount_out(Amount::new(10), reserves(1_000, 0)),
            Err(RouterError::ZeroReserve)
        );
    }

    #[test]
    fn amount_out_never_drains_reserve() {
        // Even an enormous input cannot extract the whole output reserve.
        let Ok(out) = amount_out(Amount::new(u128::MAX / 2), reserves(1_000, 1_000)) else {
            panic!("expected Ok");
        };
        assert!(out < Amount::new(1_000));
    }

    #[test]
    fn amount_out_huge_reserves_no_overflow() {
        let big = u128::MAX / 4;
        let Ok(out) = amount_out(Amount::new(big / 1_000), reserves(big, big)) else {
            panic!("expected Ok");
        };
        assert!(out.get() > 0);
    }

    // -- amount_in ------------------------------------------------------------

    #[test]
    fn amount_in_inverts_worked_example() {
        // floor(1000 * 90 * 1000 / ((1000 - 90) * 997)) + 1 = 100
        let Ok(required) = amount_in(Amount::new(90), reserves(1_000, 1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(required, Amount::new(100));
    }

    #[test]
    fn amount_in_zero_output_rejected() {
        let result = amount_in(Amount::ZERO, reserves(1_000, 1_000));
        assert!(matches!(result, Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn amount_in_output_at_reserve_rejected() {
        assert_eq!(
            amount_in(Amount::new(1_000), reserves(1_000, 1_000)),
            Err(RouterError::InsufficientLiquidity)
        );
        assert_eq!(
            amount_in(Amount::new(1_001), reserves(1_000, 1_000)),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn amount_in_covers_requested_output() {
        // The rounded-up input must always buy at least the requested output.
        for out in [1u128, 7, 90, 499, 900] {
            let Ok(needed) = amount_in(Amount::new(out), reserves(1_000, 1_000)) else {
                panic!("expected Ok for out={out}");
            };
            let Ok(got) = amount_out(needed, reserves(1_000, 1_000)) else {
                panic!("expected Ok for in={needed}");
            };
            assert!(got.get() >= out, "out={out}: got {got} for input {needed}");
        }
    }

    // -- amount_to_reach_price ------------------------------------------------

    #[test]
    fn reach_price_selling_base_down_to_target() {
        // Balanced pool at price 1.0 (scaled 1e8); sell base until 0.9.
        let Ok(x) = amount_to_reach_price(
            false,
            Price::new(90_000_000),
            d8(),
            reserves(1_000_000, 1_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(x, 54_173);

        // Applying the slice lands the marginal price just above the
        // target: the floored input stops short of overshooting.
        let mut sim = reserves(1_000_000, 1_000_000);
        let Ok(out) = amount_out(Amount::new(54_173), sim) else {
            panic!("expected Ok");
        };
        assert_eq!(out, Amount::new(51_242));
        let Ok(()) = sim.apply_slice(Amount::new(54_173), out) else {
            panic!("expected Ok");
        };
        let Ok(after) = sim.marginal_price(crate::domain::Direction::AToB, d8()) else {
            panic!("expected Ok");
        };
        assert!(
            after.get() >= 90_000_000 && after.get() <= 90_000_500,
            "price after slice: {after}"
        );
    }

    #[test]
    fn reach_price_buying_base_up_to_target() {
        // Buying base with quote: reserves oriented (quote, base).
        let Ok(x) = amount_to_reach_price(
            true,
            Price::new(110_000_000),
            d8(),
            reserves(1_000_000, 1_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(x, 48_882);

        let mut sim = reserves(1_000_000, 1_000_000);
        let Ok(out) = amount_out(Amount::new(48_882), sim) else {
            panic!("expected Ok");
        };
        let Ok(()) = sim.apply_slice(Amount::new(48_882), out) else {
            panic!("expected Ok");
        };
        let Ok(after) = sim.marginal_price(crate::domain::Direction::BToA, d8()) else {
            panic!("expected Ok");
        };
        assert!(
            after.get() <= 110_000_000 && after.get() >= 109_999_000,
            "price after slice: {after}"
        );
    }

    #[test]
    fn reach_price_at_current_price_is_zero() {
        let Ok(x) = amount_to_reach_price(
            false,
            Price::new(100_000_000),
            d8(),
            reserves(1_000_000, 1_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(x, 0);
    }

    #[test]
    fn reach_price_beyond_current_is_negative() {
        // Selling base cannot raise the price; a target above the current
        // price yields a negative amount for callers to clamp.
        let Ok(x) = amount_to_reach_price(
            false,
            Price::new(110_000_000),
            d8(),
            reserves(1_000_000, 1_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert!(x < 0, "expected negative, got {x}");
    }

    #[test]
    fn reach_price_zero_target_sell_rejected() {
        assert_eq!(
            amount_to_reach_price(false, Price::ZERO, d8(), reserves(1_000, 1_000)),
            Err(RouterError::DivisionByZero)
        );
    }

    #[test]
    fn reach_price_zero_reserve_rejected() {
        assert_eq!(
            amount_to_reach_price(false, Price::new(1), d8(), reserves(0, 1_000)),
            Err(RouterError::ZeroReserve)
        );
    }
}
