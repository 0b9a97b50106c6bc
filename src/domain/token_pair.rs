//! Ordered pair of distinct token addresses.

use super::Address;
use crate::error::{Result, RouterError};

/// The two tokens a router instance trades, canonically sorted.
///
/// The canonical ordering guarantees `token0() < token1()` by address,
/// matching the convention the pool venue uses for its `(reserve0,
/// reserve1)` pair. The pair also remembers which token the caller
/// designated as the *base* of the quoting convention: prices are always
/// expressed as quote units per base unit, independent of canonical
/// order.
///
/// # Examples
///
/// ```
/// use crossbook::domain::{Address, TokenPair};
///
/// let base = Address::from_bytes([2u8; 32]);
/// let quote = Address::from_bytes([1u8; 32]);
/// let pair = TokenPair::new(base, quote).expect("distinct tokens");
///
/// // Canonical order is independent of the base/quote roles:
/// assert_eq!(pair.token0(), quote);
/// assert_eq!(pair.token1(), base);
/// assert_eq!(pair.base(), base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    base: Address,
    quote: Address,
}

impl TokenPair {
    /// Creates a new `TokenPair` with `base` as the pricing base token.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if both tokens have
    /// the same address.
    pub fn new(base: Address, quote: Address) -> Result<Self> {
        if base == quote {
            return Err(RouterError::InvalidConfiguration(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { base, quote })
    }

    /// Returns the base token of the quoting convention.
    #[must_use]
    pub const fn base(&self) -> Address {
        self.base
    }

    /// Returns the quote token of the quoting convention.
    #[must_use]
    pub const fn quote(&self) -> Address {
        self.quote
    }

    /// Returns the canonically first token (lower address).
    #[must_use]
    pub fn token0(&self) -> Address {
        if self.base < self.quote {
            self.base
        } else {
            self.quote
        }
    }

    /// Returns the canonically second token (higher address).
    #[must_use]
    pub fn token1(&self) -> Address {
        if self.base < self.quote {
            self.quote
        } else {
            self.base
        }
    }

    /// Returns `true` if the base token sorts before the quote token,
    /// i.e. `base == token0`.
    #[must_use]
    pub fn base_is_token0(&self) -> bool {
        self.base < self.quote
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.base == *token || self.quote == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if `token` is not in
    /// the pair.
    pub fn other(&self, token: &Address) -> Result<Address> {
        if *token == self.base {
            Ok(self.quote)
        } else if *token == self.quote {
            Ok(self.base)
        } else {
            Err(RouterError::InvalidConfiguration(
                "token is not part of this pair",
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    #[test]
    fn base_and_quote_roles_preserved() {
        let Ok(pair) = TokenPair::new(addr(9), addr(1)) else {
            panic!("valid pair");
        };
        assert_eq!(pair.base(), addr(9));
        assert_eq!(pair.quote(), addr(1));
    }

    #[test]
    fn canonical_order_by_address() {
        let Ok(pair) = TokenPair::new(addr(9), addr(1)) else {
            panic!("valid pair");
        };
        assert_eq!(pair.token0(), addr(1));
        assert_eq!(pair.token1(), addr(9));
        assert!(!pair.base_is_token0());

        let Ok(flipped) = TokenPair::new(addr(1), addr(9)) else {
            panic!("valid pair");
        };
        assert_eq!(flipped.token0(), addr(1));
        assert!(flipped.base_is_token0());
    }

    #[test]
    fn same_address_rejected() {
        assert!(TokenPair::new(addr(5), addr(5)).is_err());
    }

    #[test]
    fn contains_and_other() {
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("valid pair");
        };
        assert!(pair.contains(&addr(1)));
        assert!(pair.contains(&addr(2)));
        assert!(!pair.contains(&addr(3)));
        assert_eq!(pair.other(&addr(1)), Ok(addr(2)));
        assert_eq!(pair.other(&addr(2)), Ok(addr(1)));
        assert!(pair.other(&addr(3)).is_err());
    }
}
