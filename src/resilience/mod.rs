//! # Resilience
//!
//! Bounded retry with exponential backoff for calls that cross the network
//! boundary to the identity source. Store writes are never retried here;
//! every store failure surfaces to the caller.

pub mod retry;

pub use retry::{retry_with_backoff, RetryPolicy};
