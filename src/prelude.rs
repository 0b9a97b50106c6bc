//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use crossbook::prelude::*;
//! ```

// Domain types
pub use crate::domain::{
    Address, Amount, Deadline, Decimals, Direction, Price, Reserves, RouteFill, Rounding, Side,
    TokenPair,
};

// Errors
pub use crate::error::{Result, RouterError};

// Router and configuration
pub use crate::router::{Router, RouterConfig};

// Collaborator contracts
pub use crate::traits::{Clock, LiquidityPool, OrderBookVenue, TokenLedger, WitnessChecker};

// Reference venues
pub use crate::venues::{FixedClock, LevelBook, MemoryLedger, MemoryPool, WitnessSet};
