//! Sequential and parallel filter composition.
//!
//! - [`FilterChain`] threads a sample through its members in insertion order.
//! - [`CompositeFilter`] feeds the same sample to several chains and folds
//!   their gain-weighted outputs together.
//!
//! Members are stored as `Box<dyn Filter>`, so building a chain allocates;
//! processing never does.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Filter;

/// Ordered sequence of filters applied one after another.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Filter, FilterChain, HighPassIir, LowPassIir};
///
/// let mut chain = FilterChain::new();
/// chain.push(HighPassIir::with_cutoff(44100, 80.0));
/// chain.push(LowPassIir::with_cutoff(44100, 8000.0));
///
/// let out = chain.process(0.5);
/// assert!(out.is_finite());
/// ```
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Create an empty chain (passes samples through unchanged).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter; it runs after every filter already in the chain.
    pub fn push<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Append an already boxed filter.
    pub fn push_boxed(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Number of filters in the chain.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when the chain holds no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

impl Filter for FilterChain {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        self.filters
            .iter_mut()
            .fold(input, |value, filter| filter.process(value))
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }
}

/// Parallel bank of filter chains, each with its own gain.
///
/// Every chain receives the same input. Outputs are combined by the running
/// fold
///
/// ```text
/// out = 0
/// for (chain, gain) in chains: out = (out + chain(x) · gain) / 2
/// ```
///
/// which halves the accumulator on every step, including the last. A single
/// chain therefore yields `chain(x) · gain / 2`; earlier chains are weighted
/// down geometrically relative to later ones.
#[derive(Debug, Default)]
pub struct CompositeFilter {
    chains: Vec<(FilterChain, f64)>,
}

impl CompositeFilter {
    /// Create an empty composite (outputs silence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chain with its gain. Gains in `[0, 1]` act as weights.
    pub fn push(&mut self, chain: FilterChain, gain: f64) {
        self.chains.push((chain, gain));
    }

    /// Remove every chain.
    pub fn clear(&mut self) {
        self.chains.clear();
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// True when no chains are present.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Filter for CompositeFilter {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let mut out = 0.0;
        for (chain, gain) in &mut self.chains {
            out += chain.process(input) * *gain;
            out /= 2.0;
        }
        out
    }

    fn reset(&mut self) {
        for (chain, _) in &mut self.chains {
            chain.reset();
        }
    }
}
