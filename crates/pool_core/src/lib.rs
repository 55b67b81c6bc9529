//! Ride-pooling assignment engine.
//!
//! Pairs vehicles with trip requests so that total added pickup time is
//! minimal under seat capacity and pickup windows, by solving a min-cost
//! max-flow over a vehicle/request network. A greedy baseline is provided as
//! a fallback mode and as a comparator.
//!
//! Every entry point is a pure, synchronous function of its inputs.

pub mod cost;
pub mod matching;
pub mod model;
pub mod spatial;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use cost::CostMode;
pub use matching::{match_requests, MatchMode, MatchOptions, MatchResult};
pub use model::{Request, Vehicle};
