//! Request-handling layer around the `pool_core` matching engine.
//!
//! Validates batches, owns the in-memory fleet store and counters, and exposes
//! them over HTTP (`pool_server`) and as a batch CLI (`pool_match`).

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod server;
pub mod service;
pub mod store;
