//! Reference constant-product pair.

use num_bigint::BigUint;

use crate::domain::{Address, Amount, PoolReserves};
use crate::error::{Result, RouterError};
use crate::traits::{LiquidityPool, TokenLedger};
use crate::venues::MemoryLedger;

/// An in-memory constant-product pair (`x · y = k`, 0.3% input fee).
///
/// The pair follows the pay-first swap convention: callers transfer the
/// input into [`account`](MemoryPool::account) through the ledger, then
/// call [`LiquidityPool::swap`] naming only the outputs. The pair infers
/// the paid input by comparing its ledger balances against its recorded
/// reserves and rejects any swap that would shrink the fee-adjusted
/// invariant
///
/// ```text
/// (balance0·1000 − in0·3) · (balance1·1000 − in1·3) >= reserve0·reserve1·1000²
/// ```
///
/// Reserves are kept in canonical token order (`token0 < token1` by
/// address), the same ordering the router derives from its
/// [`TokenPair`](crate::domain::TokenPair).
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPool {
    token0: Address,
    token1: Address,
    account: Address,
    reserve0: Amount,
    reserve1: Amount,
    last_update: u64,
    ledger: MemoryLedger,
}

impl MemoryPool {
    /// Creates a pair holding `reserve_a` of `token_a` and `reserve_b`
    /// of `token_b`, minting those balances into the pool account.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidConfiguration`] if the tokens are equal.
    /// - [`RouterError::ZeroReserve`] if either reserve is zero.
    /// - [`RouterError::Overflow`] if minting overflows a balance.
    pub fn new(
        token_a: Address,
        token_b: Address,
        account: Address,
        ledger: MemoryLedger,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Self> {
        if token_a == token_b {
            return Err(RouterError::InvalidConfiguration(
                "pool requires two distinct tokens",
            ));
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(RouterError::ZeroReserve);
        }

        let (token0, token1, reserve0, reserve1) = if token_a < token_b {
            (token_a, token_b, reserve_a, reserve_b)
        } else {
            (token_b, token_a, reserve_b, reserve_a)
        };
        ledger.mint(token0, account, reserve0)?;
        ledger.mint(token1, account, reserve1)?;

        Ok(Self {
            token0,
            token1,
            account,
            reserve0,
            reserve1,
            last_update: 0,
            ledger,
        })
    }

    /// Returns the pool's ledger account.
    #[must_use]
    pub const fn account(&self) -> Address {
        self.account
    }

    /// Returns the reserve of the canonically first token.
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// Returns the reserve of the canonically second token.
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }
}

impl LiquidityPool for MemoryPool {
    fn reserves(&self) -> Result<PoolReserves> {
        Ok(PoolReserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            block_timestamp: self.last_update,
        })
    }

    /// Sends the requested outputs, infers the paid inputs from the
    /// pool's balances, and enforces the fee-adjusted invariant.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidAmount`] if no output was requested, no
    ///   input was paid, or the input is too small for the output.
    /// - [`RouterError::InsufficientLiquidity`] if an output meets or
    ///   exceeds its reserve.
    /// - [`RouterError::TransferFailed`] if an output transfer fails.
    fn swap(
        &mut self,
        amount0_out: Amount,
        amount1_out: Amount,
        recipient: Address,
    ) -> Result<()> {
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(RouterError::InvalidAmount("swap requires a non-zero output"));
        }
        if amount0_out >= self.reserve0 && !amount0_out.is_zero() {
            return Err(RouterError::InsufficientLiquidity);
        }
        if amount1_out >= self.reserve1 && !amount1_out.is_zero() {
            return Err(RouterError::InsufficientLiquidity);
        }

        if !amount0_out.is_zero() {
            self.ledger
                .transfer(self.token0, self.account, recipient, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            self.ledger
                .transfer(self.token1, self.account, recipient, amount1_out)?;
        }

        let balance0 = self.ledger.balance_of(self.token0, self.account);
        let balance1 = self.ledger.balance_of(self.token1, self.account);

        // Input paid = balance grown beyond (reserve - output).
        let floor0 = self.reserve0.get() - amount0_out.get();
        let floor1 = self.reserve1.get() - amount1_out.get();
        let amount0_in = balance0.get().saturating_sub(floor0);
        let amount1_in = balance1.get().saturating_sub(floor1);
        if amount0_in == 0 && amount1_in == 0 {
            return Err(RouterError::InvalidAmount("swap requires an input transfer"));
        }

        let adjusted0 = BigUint::from(balance0.get()) * 1000u32 - BigUint::from(amount0_in) * 3u32;
        let adjusted1 = BigUint::from(balance1.get()) * 1000u32 - BigUint::from(amount1_in) * 3u32;
        let invariant_before =
            BigUint::from(self.reserve0.get()) * BigUint::from(self.reserve1.get())
                * 1_000_000u32;
        if adjusted0 * adjusted1 < invariant_before {
            return Err(RouterError::InvalidAmount(
                "insufficient input for requested output",
            ));
        }

        self.reserve0 = balance0;
        self.reserve1 = balance1;
        self.last_update += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Reserves;
    use crate::math::constant_product::amount_out;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    fn setup(r0: u128, r1: u128) -> (MemoryPool, MemoryLedger) {
        let ledger = MemoryLedger::new();
        let Ok(pool) = MemoryPool::new(
            addr(1),
            addr(2),
            addr(100),
            ledger.clone(),
            Amount::new(r0),
            Amount::new(r1),
        ) else {
            panic!("valid pool");
        };
        (pool, ledger)
    }

    #[test]
    fn new_canonicalizes_token_order() {
        let ledger = MemoryLedger::new();
        let Ok(pool) = MemoryPool::new(
            addr(2),
            addr(1),
            addr(100),
            ledger.clone(),
            Amount::new(500),
            Amount::new(900),
        ) else {
            panic!("valid pool");
        };
        // token_a = addr(2) sorts second, so its reserve lands in reserve1.
        assert_eq!(pool.reserve0(), Amount::new(900));
        assert_eq!(pool.reserve1(), Amount::new(500));
        assert_eq!(ledger.balance_of(addr(1), addr(100)), Amount::new(900));
        assert_eq!(ledger.balance_of(addr(2), addr(100)), Amount::new(500));
    }

    #[test]
    fn new_rejects_equal_tokens_and_zero_reserves() {
        let ledger = MemoryLedger::new();
        assert!(MemoryPool::new(
            addr(1),
            addr(1),
            addr(100),
            ledger.clone(),
            Amount::new(1),
            Amount::new(1),
        )
        .is_err());
        assert_eq!(
            MemoryPool::new(
                addr(1),
                addr(2),
                addr(100),
                ledger,
                Amount::ZERO,
                Amount::new(1),
            ),
            Err(RouterError::ZeroReserve)
        );
    }

    #[test]
    fn paid_swap_succeeds_and_updates_reserves() {
        let (mut pool, mut ledger) = setup(1_000, 1_000);
        let trader = addr(9);
        let Ok(()) = ledger.mint(addr(1), trader, Amount::new(100)) else {
            panic!("expected Ok");
        };

        // Pay 100 of token0 in, take the formula output of token1 out.
        let Ok(out) = amount_out(
            Amount::new(100),
            Reserves::new(Amount::new(1_000), Amount::new(1_000)),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out, Amount::new(90));

        let Ok(()) = ledger.transfer(addr(1), trader, pool.account(), Amount::new(100)) else {
            panic!("expected Ok");
        };
        let Ok(()) = pool.swap(Amount::ZERO, out, trader) else {
            panic!("expected Ok");
        };

        assert_eq!(pool.reserve0(), Amount::new(1_100));
        assert_eq!(pool.reserve1(), Amount::new(910));
        assert_eq!(ledger.balance_of(addr(2), trader), Amount::new(90));
    }

    #[test]
    fn unpaid_swap_rejected() {
        let (mut pool, _ledger) = setup(1_000, 1_000);
        let result = pool.swap(Amount::ZERO, Amount::new(90), addr(9));
        assert!(matches!(result, Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn underpaid_swap_rejected() {
        let (mut pool, mut ledger) = setup(1_000, 1_000);
        let trader = addr(9);
        let Ok(()) = ledger.mint(addr(1), trader, Amount::new(50)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.transfer(addr(1), trader, pool.account(), Amount::new(50)) else {
            panic!("expected Ok");
        };
        // 50 in cannot buy 90 out of a balanced 1000/1000 pool.
        let result = pool.swap(Amount::ZERO, Amount::new(90), trader);
        assert!(matches!(result, Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn output_exceeding_reserve_rejected() {
        let (mut pool, _ledger) = setup(1_000, 1_000);
        assert_eq!(
            pool.swap(Amount::ZERO, Amount::new(1_000), addr(9)),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn zero_output_swap_rejected() {
        let (mut pool, _ledger) = setup(1_000, 1_000);
        let result = pool.swap(Amount::ZERO, Amount::ZERO, addr(9));
        assert!(matches!(result, Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn reserves_snapshot_tracks_updates() {
        let (pool, _ledger) = setup(1_000, 2_000);
        let Ok(snapshot) = pool.reserves() else {
            panic!("expected Ok");
        };
        assert_eq!(snapshot.reserve0, Amount::new(1_000));
        assert_eq!(snapshot.reserve1, Amount::new(2_000));
        assert_eq!(snapshot.block_timestamp, 0);
    }
}
