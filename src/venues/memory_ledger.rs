//! Shared in-memory token ledger, clock, and witness oracle.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::domain::{Address, Amount};
use crate::error::{Result, RouterError};
use crate::traits::{Clock, TokenLedger, WitnessChecker};

/// An in-memory token ledger with shared-handle semantics.
///
/// Cloning a `MemoryLedger` produces another handle onto the same
/// balances, which is how the reference pool and book observe the
/// transfers the router makes into their accounts — the same way real
/// venues observe their own token balances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryLedger {
    accounts: Rc<RefCell<HashMap<(Address, Address), u128>>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `token` in `account`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the balance would exceed
    /// `u128`.
    pub fn mint(&self, token: Address, account: Address, amount: Amount) -> Result<()> {
        let mut accounts = self.accounts.borrow_mut();
        let balance = accounts.entry((token, account)).or_insert(0);
        *balance = balance
            .checked_add(amount.get())
            .ok_or(RouterError::Overflow("minted balance exceeds u128"))?;
        Ok(())
    }

    /// Returns the balance of `token` held by `account`.
    #[must_use]
    pub fn balance_of(&self, token: Address, account: Address) -> Amount {
        Amount::new(
            self.accounts
                .borrow()
                .get(&(token, account))
                .copied()
                .unwrap_or(0),
        )
    }
}

impl TokenLedger for MemoryLedger {
    /// Moves `amount` between accounts; a zero-amount transfer is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::TransferFailed`] if `from` holds less than
    /// `amount`, mirroring a token contract returning `false`.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let mut accounts = self.accounts.borrow_mut();
        let from_balance = accounts.get(&(token, from)).copied().unwrap_or(0);
        if from_balance < amount.get() {
            return Err(RouterError::TransferFailed { token });
        }
        accounts.insert((token, from), from_balance - amount.get());
        let to_balance = accounts.entry((token, to)).or_insert(0);
        *to_balance = to_balance
            .checked_add(amount.get())
            .ok_or(RouterError::TransferFailed { token })?;
        Ok(())
    }
}

/// A clock whose reading is set by the test or embedder.
///
/// Clones share the same reading, so time can be advanced after the
/// router takes ownership of a handle.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Rc<Cell<u64>>,
}

impl FixedClock {
    /// Creates a clock reading `now`.
    #[must_use]
    pub fn at(now: u64) -> Self {
        let clock = Self::default();
        clock.set(now);
        clock
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// A witness oracle backed by an allow-list of accounts.
#[derive(Debug, Clone, Default)]
pub struct WitnessSet {
    verified: HashSet<Address>,
}

impl WitnessSet {
    /// Creates an oracle that verifies exactly the given accounts.
    #[must_use]
    pub fn allowing<I: IntoIterator<Item = Address>>(accounts: I) -> Self {
        Self {
            verified: accounts.into_iter().collect(),
        }
    }
}

impl WitnessChecker for WitnessSet {
    fn check_witness(&self, account: Address) -> bool {
        self.verified.contains(&account)
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
    fn mint_and_balance() {
        let ledger = MemoryLedger::new();
        let Ok(()) = ledger.mint(addr(1), addr(9), Amount::new(500)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(addr(1), addr(9)), Amount::new(500));
        assert_eq!(ledger.balance_of(addr(2), addr(9)), Amount::ZERO);
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = MemoryLedger::new();
        let Ok(()) = ledger.mint(addr(1), addr(9), Amount::new(500)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.transfer(addr(1), addr(9), addr(8), Amount::new(200)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(addr(1), addr(9)), Amount::new(300));
        assert_eq!(ledger.balance_of(addr(1), addr(8)), Amount::new(200));
    }

    #[test]
    fn transfer_insufficient_balance_fails() {
        let mut ledger = MemoryLedger::new();
        let result = ledger.transfer(addr(1), addr(9), addr(8), Amount::new(1));
        assert_eq!(
            result,
            Err(RouterError::TransferFailed { token: addr(1) })
        );
    }

    #[test]
    fn zero_transfer_is_noop() {
        let mut ledger = MemoryLedger::new();
        let Ok(()) = ledger.transfer(addr(1), addr(9), addr(8), Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(addr(1), addr(8)), Amount::ZERO);
    }

    #[test]
    fn clones_share_balances() {
        let ledger = MemoryLedger::new();
        let handle = ledger.clone();
        let Ok(()) = handle.mint(addr(1), addr(9), Amount::new(42)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(addr(1), addr(9)), Amount::new(42));
    }

    #[test]
    fn fixed_clock_shares_reading() {
        let clock = FixedClock::at(10);
        let handle = clock.clone();
        handle.set(99);
        assert_eq!(clock.now(), 99);
    }

    #[test]
    fn witness_set_membership() {
        let set = WitnessSet::allowing([addr(1), addr(2)]);
        assert!(set.check_witness(addr(1)));
        assert!(!set.check_witness(addr(3)));
    }
}
