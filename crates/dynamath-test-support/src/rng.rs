//! Scripted random stream for tests that need exact draws.

use dynamath_core::rng::RandomStream;

/// A stream that replays a predetermined list of floats. Panics if the
/// list is exhausted, so a test fails loudly when code draws more often
/// than expected.
#[derive(Debug)]
pub struct SequenceStream {
    values: Vec<f64>,
    index: usize,
}

impl SequenceStream {
    /// Create a new `SequenceStream` replaying `values` in order.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomStream for SequenceStream {
    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
