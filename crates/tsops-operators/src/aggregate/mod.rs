//! Aggregating stages.
//!
//! `Cumsum` keeps an unbounded accumulator whose field set only grows;
//! `Sma` keeps the last `n` raw records and recomputes its field set from
//! the window on every call. The two presence rules differ on purpose.

mod cumsum;
mod sma;

pub use cumsum::Cumsum;
pub use sma::Sma;
