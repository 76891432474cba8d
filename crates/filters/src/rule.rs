use crate::{FilterSense, PathFilter};

/// Ordered `(sense, filter)` pair inside a composite.
///
/// The sense is captured when the pair is built and reported verbatim on a
/// match; it is never recomputed from the wrapped filter.
#[derive(Clone, Debug)]
pub struct RulePair {
    sense: FilterSense,
    filter: PathFilter,
}

impl RulePair {
    /// Creates a pair that reports `sense` when `filter` matches.
    #[must_use]
    pub fn new(sense: FilterSense, filter: PathFilter) -> Self {
        Self { sense, filter }
    }

    /// Creates an include pair.
    #[must_use]
    pub fn include(filter: PathFilter) -> Self {
        Self::new(FilterSense::Include, filter)
    }

    /// Creates an exclude pair.
    #[must_use]
    pub fn exclude(filter: PathFilter) -> Self {
        Self::new(FilterSense::Exclude, filter)
    }

    /// Returns the reported sense.
    #[must_use]
    pub const fn sense(&self) -> FilterSense {
        self.sense
    }

    /// Returns the wrapped filter.
    #[must_use]
    pub const fn filter(&self) -> &PathFilter {
        &self.filter
    }
}
