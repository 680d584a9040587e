//! Shared test fakes and utilities for the Dynamath flashcard generators.

mod clock;
mod logging;
mod rng;
mod store;

pub use clock::{FixedClock, FixedSalt};
pub use logging::init_test_tracing;
pub use rng::SequenceStream;
pub use store::{FailingSeedStore, RecordingSeedStore, StoreOp};
