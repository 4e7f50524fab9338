use wfsynth::rng::RandomSource;

/// A `RandomSource` that replays a fixed list of unit fractions.
///
/// Each draw maps the next fraction `f` onto `low + (high - low) * f`, so a
/// fraction of 0.0 yields the lower bound and 0.5 the midpoint. The list
/// wraps around when exhausted. Every requested range is recorded.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    fractions: Vec<f64>,
    next: usize,
    pub requested: Vec<(f64, f64)>,
}

impl FixedSequence {
    pub fn new(fractions: impl Into<Vec<f64>>) -> Self {
        let fractions = fractions.into();
        assert!(!fractions.is_empty(), "FixedSequence needs at least one value");
        Self {
            fractions,
            next: 0,
            requested: Vec::new(),
        }
    }

    /// Always returns the midpoint of the requested range.
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }

    pub fn draws(&self) -> usize {
        self.requested.len()
    }
}

impl RandomSource for FixedSequence {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let f = self.fractions[self.next % self.fractions.len()];
        self.next += 1;
        self.requested.push((low, high));
        low + (high - low) * f
    }
}
