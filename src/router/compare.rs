//! Venue price comparison.

use core::fmt;

use crate::domain::{Direction, Price};

/// The venue chosen for the next slice of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    /// The constant-product pool.
    Amm,
    /// The order book.
    Book,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amm => write!(f, "amm"),
            Self::Book => write!(f, "book"),
        }
    }
}

/// Decides which venue prices the next increment of flow better.
///
/// Selling base (A→B) wants the highest quote-per-base price, so the AMM
/// wins while its marginal price sits *above* the book level; buying base
/// (B→A) wants the lowest, so the AMM wins while it sits *below*. Ties
/// go to the book — the AMM is only entered on strict inequality, which
/// also guarantees a convergence slice towards the level is non-trivial.
#[must_use]
pub const fn preferred_venue(direction: Direction, amm_price: Price, book_price: Price) -> Venue {
    let amm_better = match direction {
        Direction::AToB => amm_price.get() > book_price.get(),
        Direction::BToA => amm_price.get() < book_price.get(),
    };
    if amm_better {
        Venue::Amm
    } else {
        Venue::Book
    }
}
