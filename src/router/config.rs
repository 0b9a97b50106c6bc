//! Router construction parameters.

use crate::domain::{Address, TokenPair};
use crate::error::{Result, RouterError};

/// Immutable wiring for a [`Router`](crate::router::Router) instance.
///
/// The venues and tokens a router talks to are explicit construction
/// parameters, never process-wide state, so instances over different
/// pairs or mock venues can coexist freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    tokens: TokenPair,
    pool_account: Address,
    walk_book_levels: bool,
}

impl RouterConfig {
    /// Creates a configuration for the given pair.
    ///
    /// `pool_account` is the ledger account swap inputs are paid into.
    /// `walk_book_levels` selects whether routing walks successive book
    /// levels after exhausting the best one, or consults the best level
    /// only and sends any remainder to the AMM.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if `pool_account`
    /// collides with one of the pair's token addresses.
    pub fn new(tokens: TokenPair, pool_account: Address, walk_book_levels: bool) -> Result<Self> {
        let config = Self {
            tokens,
            pool_account,
            walk_book_levels,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] on any violation.
    pub fn validate(&self) -> Result<()> {
        if self.tokens.contains(&self.pool_account) {
            return Err(RouterError::InvalidConfiguration(
                "pool account must not be a token address",
            ));
        }
        Ok(())
    }

    /// Returns the traded pair.
    #[must_use]
    pub const fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Returns the pool's ledger account.
    #[must_use]
    pub const fn pool_account(&self) -> Address {
        self.pool_account
    }

    /// Returns `true` if routing walks past the best book level.
    #[must_use]
    pub const fn walk_book_levels(&self) -> bool {
        self.walk_book_levels
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    fn pair() -> TokenPair {
        let Ok(p) = TokenPair::new(addr(1), addr(2)) else {
            panic!("valid pair");
        };
        p
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = RouterConfig::new(pair(), addr(100), true) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pool_account(), addr(100));
        assert!(cfg.walk_book_levels());
        assert_eq!(cfg.tokens().base(), addr(1));
    }

    #[test]
    fn pool_account_colliding_with_token_rejected() {
        let result = RouterConfig::new(pair(), addr(1), true);
        assert!(matches!(
            result,
            Err(RouterError::InvalidConfiguration(_))
        ));
    }
}
