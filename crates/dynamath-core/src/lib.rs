//! Dynamath Core: deterministic randomness and review-seed plumbing.
//!
//! This crate defines the seeded random stream every generator draws from,
//! the clock and salt abstractions used to synthesize fresh seeds, the
//! key-value channel that carries a seed from a card's front render to its
//! back render, and the shared error taxonomy. It knows nothing about
//! individual templates.

pub mod clock;
pub mod error;
pub mod rng;
pub mod seed;
pub mod storage;
