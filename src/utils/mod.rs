//! Utility helpers shared by the clock and the world.

pub mod logging;

pub use logging::{warn_if_tick_budget_exceeded, ScopedTimer};
