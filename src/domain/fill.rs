//! Routing fill plans and route reports.

use core::fmt;

use super::{Amount, Price};
use crate::error::{Result, RouterError};

/// One indivisible portion of a routed trade, filled entirely by a single
/// venue at a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// A slice swapped through the constant-product pool.
    Amm {
        /// Input paid into the pool.
        amount_in: Amount,
        /// Output taken from the pool.
        amount_out: Amount,
    },
    /// A slice filled against one order-book price level.
    Book {
        /// The resting level consumed.
        price: Price,
        /// Input delivered to the book.
        amount_in: Amount,
        /// Output received from the book.
        amount_out: Amount,
    },
}

impl Slice {
    /// Returns the slice's input amount.
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        match self {
            Self::Amm { amount_in, .. } | Self::Book { amount_in, .. } => *amount_in,
        }
    }

    /// Returns the slice's output amount.
    #[must_use]
    pub const fn amount_out(&self) -> Amount {
        match self {
            Self::Amm { amount_out, .. } | Self::Book { amount_out, .. } => *amount_out,
        }
    }
}

/// An ordered sequence of venue slices plus running totals, produced by
/// the planning loop.
///
/// The plan is built entirely from read-only venue queries; nothing has
/// been executed when a plan exists. Slices are applied in order during
/// settlement, and the aggregate slippage bound is checked against the
/// totals before the first slice runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillPlan {
    slices: Vec<Slice>,
    total_in: Amount,
    total_out: Amount,
}

impl FillPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an AMM slice and updates the totals.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if a running total exceeds `u128`.
    pub fn push_amm(&mut self, amount_in: Amount, amount_out: Amount) -> Result<()> {
        self.accumulate(amount_in, amount_out)?;
        self.slices.push(Slice::Amm {
            amount_in,
            amount_out,
        });
        Ok(())
    }

    /// Appends a book slice and updates the totals.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if a running total exceeds `u128`.
    pub fn push_book(&mut self, price: Price, amount_in: Amount, amount_out: Amount) -> Result<()> {
        self.accumulate(amount_in, amount_out)?;
        self.slices.push(Slice::Book {
            price,
            amount_in,
            amount_out,
        });
        Ok(())
    }

    fn accumulate(&mut self, amount_in: Amount, amount_out: Amount) -> Result<()> {
        self.total_in = self
            .total_in
            .checked_add(&amount_in)
            .ok_or(RouterError::Overflow("plan input total exceeds u128"))?;
        self.total_out = self
            .total_out
            .checked_add(&amount_out)
            .ok_or(RouterError::Overflow("plan output total exceeds u128"))?;
        Ok(())
    }

    /// Returns the planned slices in execution order.
    #[must_use]
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Returns the aggregate input across all slices.
    #[must_use]
    pub const fn total_in(&self) -> Amount {
        self.total_in
    }

    /// Returns the aggregate output across all slices.
    #[must_use]
    pub const fn total_out(&self) -> Amount {
        self.total_out
    }

    /// Returns `true` if the plan contains no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Summarizes the plan into a [`RouteFill`] report.
    #[must_use]
    pub fn fill(&self) -> RouteFill {
        let mut fill = RouteFill {
            total_in: self.total_in,
            total_out: self.total_out,
            amm_in: Amount::ZERO,
            amm_out: Amount::ZERO,
            book_in: Amount::ZERO,
            book_out: Amount::ZERO,
        };
        for slice in &self.slices {
            // Totals were already checked while the plan was built, so the
            // per-venue partial sums cannot overflow.
            match slice {
                Slice::Amm {
                    amount_in,
                    amount_out,
                } => {
                    fill.amm_in = Amount::new(fill.amm_in.get() + amount_in.get());
                    fill.amm_out = Amount::new(fill.amm_out.get() + amount_out.get());
                }
                Slice::Book {
                    amount_in,
                    amount_out,
                    ..
                } => {
                    fill.book_in = Amount::new(fill.book_in.get() + amount_in.get());
                    fill.book_out = Amount::new(fill.book_out.get() + amount_out.get());
                }
            }
        }
        fill
    }
}

/// The outcome of a quoted or executed route, split by venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFill {
    /// Aggregate input across both venues.
    pub total_in: Amount,
    /// Aggregate output across both venues.
    pub total_out: Amount,
    /// Input routed through the pool.
    pub amm_in: Amount,
    /// Output received from the pool.
    pub amm_out: Amount,
    /// Input routed through the order book.
    pub book_in: Amount,
    /// Output received from the order book.
    pub book_out: Amount,
}

impl fmt::Display for RouteFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteFill(in={}, out={}, amm={}/{}, book={}/{})",
            self.total_in, self.total_out, self.amm_in, self.amm_out, self.book_in, self.book_out
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan() {
        let plan = FillPlan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.total_in(), Amount::ZERO);
        assert_eq!(plan.total_out(), Amount::ZERO);
    }

    #[test]
    fn totals_track_pushes() {
        let mut plan = FillPlan::new();
        let Ok(()) = plan.push_amm(Amount::new(100), Amount::new(90)) else {
            panic!("expected Ok");
        };
        let Ok(()) = plan.push_book(Price::new(50), Amount::new(30), Amount::new(15)) else {
            panic!("expected Ok");
        };
        assert_eq!(plan.total_in(), Amount::new(130));
        assert_eq!(plan.total_out(), Amount::new(105));
        assert_eq!(plan.slices().len(), 2);
    }

    #[test]
    fn fill_splits_by_venue() {
        let mut plan = FillPlan::new();
        let Ok(()) = plan.push_amm(Amount::new(100), Amount::new(90)) else {
            panic!("expected Ok");
        };
        let Ok(()) = plan.push_amm(Amount::new(10), Amount::new(9)) else {
            panic!("expected Ok");
        };
        let Ok(()) = plan.push_book(Price::new(50), Amount::new(30), Amount::new(15)) else {
            panic!("expected Ok");
        };
        let fill = plan.fill();
        assert_eq!(fill.amm_in, Amount::new(110));
        assert_eq!(fill.amm_out, Amount::new(99));
        assert_eq!(fill.book_in, Amount::new(30));
        assert_eq!(fill.book_out, Amount::new(15));
        assert_eq!(fill.total_in, Amount::new(140));
        assert_eq!(fill.total_out, Amount::new(114));
    }

    #[test]
    fn overflow_in_totals_rejected() {
        let mut plan = FillPlan::new();
        let Ok(()) = plan.push_amm(Amount::MAX, Amount::ZERO) else {
            panic!("expected Ok");
        };
        let result = plan.push_amm(Amount::new(1), Amount::ZERO);
        assert!(matches!(result, Err(RouterError::Overflow(_))));
    }

    #[test]
    fn slice_accessors() {
        let s = Slice::Book {
            price: Price::new(7),
            amount_in: Amount::new(3),
            amount_out: Amount::new(2),
        };
        assert_eq!(s.amount_in(), Amount::new(3));
        assert_eq!(s.amount_out(), Amount::new(2));
    }

    #[test]
    fn route_fill_display() {
        let fill = RouteFill {
            total_in: Amount::new(1),
            total_out: Amount::new(2),
            amm_in: Amount::new(1),
            amm_out: Amount::new(2),
            book_in: Amount::ZERO,
            book_out: Amount::ZERO,
        };
        assert!(format!("{fill}").contains("RouteFill"));
    }
}
