//! Trade direction and order-book side.

use core::fmt;

/// Which way a trade flows through the pair.
///
/// `AToB` sells the base token for the quote token; `BToA` does the
/// reverse. The direction determines which reserve is the input, which
/// book side the taker consumes, and which branch of the
/// price-convergence formula applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sell base (token A), receive quote (token B).
    AToB,
    /// Sell quote (token B), receive base (token A).
    BToA,
}

impl Direction {
    /// Returns `true` for the base-to-quote direction.
    #[must_use]
    pub const fn is_a_to_b(&self) -> bool {
        matches!(self, Self::AToB)
    }

    /// Returns `true` if the trade buys the base token.
    ///
    /// Buying base pushes the quote-per-base price up; selling base
    /// pushes it down. The price-convergence formula selects its target
    /// term on this flag.
    #[must_use]
    pub const fn is_buying_base(&self) -> bool {
        matches!(self, Self::BToA)
    }

    /// Returns the book side the taker consumes in this direction.
    ///
    /// Selling base fills resting buy orders; buying base fills resting
    /// sell orders.
    #[must_use]
    pub const fn taker_side(&self) -> Side {
        match self {
            Self::AToB => Side::Buy,
            Self::BToA => Side::Sell,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::AToB => Self::BToA,
            Self::BToA => Self::AToB,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => write!(f, "A->B"),
            Self::BToA => write!(f, "B->A"),
        }
    }
}

/// One side of the order book: the resting orders a taker trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Resting buy orders (bids); best price is the highest.
    Buy,
    /// Resting sell orders (asks); best price is the lowest.
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_flags() {
        assert!(Direction::AToB.is_a_to_b());
        assert!(!Direction::BToA.is_a_to_b());
        assert!(Direction::BToA.is_buying_base());
        assert!(!Direction::AToB.is_buying_base());
    }

    #[test]
    fn taker_side_mapping() {
        assert_eq!(Direction::AToB.taker_side(), Side::Buy);
        assert_eq!(Direction::BToA.taker_side(), Side::Sell);
    }

    #[test]
    fn reversed_round_trips() {
        assert_eq!(Direction::AToB.reversed(), Direction::BToA);
        assert_eq!(Direction::AToB.reversed().reversed(), Direction::AToB);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Direction::AToB), "A->B");
        assert_eq!(format!("{}", Side::Sell), "sell");
    }
}
