//! Property-based tests for the constant-product formula engine.
//!
//! Three families of properties:
//!
//! 1. **Monotonicity** — both formulas are non-decreasing in their amount
//!    argument for fixed reserves.
//! 2. **Pool-favoring round trip** — the rounded-up `amount_in` always
//!    buys at least the requested output, and the minimal input
//!    recovered from a quoted output never exceeds the original input by
//!    more than the single rounding unit.
//! 3. **Price convergence** — applying an `amount_to_reach_price` slice
//!    lands the marginal price within the resolution one input unit can
//!    achieve (about `2·P / reserve`).

use proptest::prelude::*;

use crate::domain::{Amount, Decimals, Direction, Price, Reserves};
use crate::math::constant_product::{amount_in, amount_out, amount_to_reach_price};

fn d8() -> Decimals {
    let Ok(d) = Decimals::new(8) else {
        panic!("valid decimals");
    };
    d
}

proptest! {
    #[test]
    fn amount_out_monotonic_in_input(
        r_in in 1_000u128..=1_000_000_000_000,
        r_out in 1_000u128..=1_000_000_000_000,
        x in 1u128..=1_000_000_000,
    ) {
        let reserves = Reserves::new(Amount::new(r_in), Amount::new(r_out));
        let Ok(out_small) = amount_out(Amount::new(x), reserves) else {
            panic!("amount_out failed for valid input");
        };
        let Ok(out_large) = amount_out(Amount::new(x + 1), reserves) else {
            panic!("amount_out failed for valid input");
        };
        prop_assert!(out_large >= out_small);
    }

    #[test]
    fn amount_in_monotonic_in_output(
        r_in in 1_000u128..=1_000_000_000_000,
        r_out in 1_000u128..=1_000_000_000_000,
        frac in 1u128..=800,
    ) {
        // Request up to 80% of the output reserve, leaving room for y + 1.
        let y = (r_out * frac / 1_000).max(1);
        let reserves = Reserves::new(Amount::new(r_in), Amount::new(r_out));
        let Ok(in_small) = amount_in(Amount::new(y), reserves) else {
            panic!("amount_in failed for valid output");
        };
        let Ok(in_large) = amount_in(Amount::new(y + 1), reserves) else {
            panic!("amount_in failed for valid output");
        };
        prop_assert!(in_large >= in_small);
    }

    #[test]
    fn rounded_up_input_covers_output(
        r_in in 1_000u128..=1_000_000_000_000,
        r_out in 1_000u128..=1_000_000_000_000,
        frac in 1u128..=900,
    ) {
        let y = (r_out * frac / 1_000).max(1);
        let reserves = Reserves::new(Amount::new(r_in), Amount::new(r_out));
        let Ok(needed) = amount_in(Amount::new(y), reserves) else {
            panic!("amount_in failed for valid output");
        };
        let Ok(got) = amount_out(needed, reserves) else {
            panic!("amount_out failed for valid input");
        };
        prop_assert!(got.get() >= y, "input {needed} bought {got}, wanted {y}");
    }

    #[test]
    fn recovered_input_never_exceeds_original(
        r_in in 1_000u128..=1_000_000_000_000,
        r_out in 1_000u128..=1_000_000_000_000,
        x in 1u128..=1_000_000_000,
    ) {
        let reserves = Reserves::new(Amount::new(r_in), Amount::new(r_out));
        let Ok(out) = amount_out(Amount::new(x), reserves) else {
            panic!("amount_out failed for valid input");
        };
        prop_assume!(!out.is_zero());
        let Ok(recovered) = amount_in(out, reserves) else {
            panic!("amount_in failed for valid output");
        };
        // The minimal input for the same quoted output, plus the explicit
        // +1 rounding, can never exceed the original input by more than 1.
        prop_assert!(recovered.get() <= x + 1, "recovered {recovered} from {x}");
    }

    #[test]
    fn reach_price_converges_selling_base(
        reserve in 1_000_000u128..=1_000_000_000_000,
        target_ppm in 500_000u128..=999_000,
    ) {
        // Balanced pool at scaled price 1e8; sell base towards a target
        // 0.5%–50% below it.
        let target = Price::new(target_ppm * 100);
        let mut sim = Reserves::new(Amount::new(reserve), Amount::new(reserve));
        let Ok(x) = amount_to_reach_price(false, target, d8(), sim) else {
            panic!("amount_to_reach_price failed");
        };
        prop_assert!(x > 0, "target below current price needs positive input");

        let slice = Amount::new(u128::try_from(x).expect("positive"));
        let Ok(out) = amount_out(slice, sim) else {
            panic!("amount_out failed for slice");
        };
        sim.apply_slice(slice, out).expect("slice fits reserves");
        let Ok(after) = sim.marginal_price(Direction::AToB, d8()) else {
            panic!("marginal price failed");
        };

        // One input unit moves the price by at most 2·P over the smaller
        // reserve; allow a few quanta (and a floor of a few scaled
        // units) of slack.
        let smaller = Amount::min(&sim.reserve_in(), &sim.reserve_out()).get();
        let quantum = 2 * after.get() / smaller + 4;
        let tolerance = 4 * quantum;
        let diff = after.get().abs_diff(target.get());
        prop_assert!(
            diff <= tolerance,
            "price {after} vs target {target}, tolerance {tolerance}"
        );
    }

    #[test]
    fn reach_price_converges_buying_base(
        reserve in 1_000_000u128..=1_000_000_000_000,
        target_ppm in 1_001_000u128..=2_000_000,
    ) {
        // Buying base: reserves oriented (quote, base), target 0.1%–100%
        // above the current price.
        let target = Price::new(target_ppm * 100);
        let mut sim = Reserves::new(Amount::new(reserve), Amount::new(reserve));
        let Ok(x) = amount_to_reach_price(true, target, d8(), sim) else {
            panic!("amount_to_reach_price failed");
        };
        prop_assert!(x > 0, "target above current price needs positive input");

        let slice = Amount::new(u128::try_from(x).expect("positive"));
        let Ok(out) = amount_out(slice, sim) else {
            panic!("amount_out failed for slice");
        };
        sim.apply_slice(slice, out).expect("slice fits reserves");
        let Ok(after) = sim.marginal_price(Direction::BToA, d8()) else {
            panic!("marginal price failed");
        };

        let smaller = Amount::min(&sim.reserve_in(), &sim.reserve_out()).get();
        let quantum = 2 * after.get() / smaller + 4;
        let tolerance = 4 * quantum;
        let diff = after.get().abs_diff(target.get());
        prop_assert!(
            diff <= tolerance,
            "price {after} vs target {target}, tolerance {tolerance}"
        );
    }

    #[test]
    fn reach_price_monotonic_in_target(
        reserve in 1_000_000u128..=1_000_000_000_000,
        target_ppm in 500_000u128..=990_000,
    ) {
        // A target further below the current price requires a larger sell.
        let near = Price::new((target_ppm + 1_000) * 100);
        let far = Price::new(target_ppm * 100);
        let sim = Reserves::new(Amount::new(reserve), Amount::new(reserve));
        let Ok(x_near) = amount_to_reach_price(false, near, d8(), sim) else {
            panic!("amount_to_reach_price failed");
        };
        let Ok(x_far) = amount_to_reach_price(false, far, d8(), sim) else {
            panic!("amount_to_reach_price failed");
        };
        prop_assert!(x_far >= x_near);
    }
}
