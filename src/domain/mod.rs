//! Fundamental domain value types used throughout the router.
//!
//! This module contains the core value types that model the routing
//! domain: addresses, amounts, scaled prices, trade directions, reserves,
//! and the fill accumulator. All types use newtypes with validated
//! constructors to enforce invariants.

mod address;
mod amount;
mod deadline;
mod decimals;
mod direction;
mod fill;
mod price;
mod reserves;
mod rounding;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use deadline::Deadline;
pub use decimals::Decimals;
pub use direction::{Direction, Side};
pub use fill::{FillPlan, RouteFill, Slice};
pub use price::Price;
pub use reserves::{PoolReserves, Reserves};
pub use rounding::Rounding;
pub use token_pair::TokenPair;
