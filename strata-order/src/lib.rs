//! # strata-order
//!
//! Turns a binary precedence matrix into a leveled causal order.
//! Kahn's algorithm with breadth-first frontiers; nodes the leveling never
//! reaches are reported as cycle nodes instead of failing.

pub mod cycles;
pub mod resolver;

pub use resolver::{resolve_causal_order, OrderResolution, OrderResolver};
