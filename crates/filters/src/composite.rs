use std::fmt;
use std::path::Path;

use crate::decision::MatchOutcome;
use crate::identity::{IdentityHash, IdentityHasher};
use crate::{FilterSense, RulePair};

/// Ordered rule list evaluated first-match-wins, with a default sense.
///
/// Rules are tried strictly in insertion order; the first pair whose filter
/// matches determines the outcome and later rules are never evaluated. The
/// engine never reorders, sorts, or deduplicates the list — precedence is
/// entirely caller-determined. The composite is immutable once built.
#[derive(Clone, Debug)]
pub struct CompositeFilter {
    rules: Vec<RulePair>,
    default_sense: FilterSense,
}

impl CompositeFilter {
    /// Builds a composite from `rules` in exactly the supplied order.
    #[must_use]
    pub fn new(rules: Vec<RulePair>, default_sense: FilterSense) -> Self {
        Self {
            rules,
            default_sense,
        }
    }

    /// A composite with no rules.
    ///
    /// Empty composites never match, which lets [`join`](crate::join) elide
    /// them without changing behavior.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), FilterSense::Include)
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RulePair] {
        &self.rules
    }

    /// The sense reported when no rule matches.
    #[must_use]
    pub const fn default_sense(&self) -> FilterSense {
        self.default_sense
    }

    /// Returns `true` when the composite holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates the rules in order; the first match wins.
    #[must_use]
    pub fn matches<'a>(&'a self, path: &Path) -> MatchOutcome<'a> {
        for pair in &self.rules {
            if pair.filter().is_hit(path) {
                return MatchOutcome::hit(pair.sense(), pair.filter());
            }
        }
        MatchOutcome::miss(self.default_sense)
    }

    /// The shared sense when every rule carries the same one.
    ///
    /// Empty composites report `None`; they are elided before merging is
    /// considered.
    pub(crate) fn uniform_sense(&self) -> Option<FilterSense> {
        let mut rules = self.rules.iter();
        let first = rules.next()?.sense();
        rules.all(|pair| pair.sense() == first).then_some(first)
    }

    pub(crate) fn into_rules(self) -> Vec<RulePair> {
        self.rules
    }

    pub(crate) fn identity_hash(&self) -> IdentityHash {
        let mut hasher = IdentityHasher::new(b"composite\0");
        hasher.update(&[self.default_sense.tag()]);
        for pair in &self.rules {
            hasher.update(&[pair.sense().tag()]);
            hasher.child(&pair.filter().identity_hash());
        }
        hasher.finish()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, pair) in self.rules.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pair.sense().sign())?;
            pair.filter().fmt_bare(f)?;
        }
        f.write_str("]")
    }
}
