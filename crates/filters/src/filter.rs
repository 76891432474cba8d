use std::fmt;
use std::path::Path;

use crate::decision::MatchOutcome;
use crate::identity::IdentityHash;
use crate::{CompositeFilter, FilelistFilter, FilterSense, JoinedFilter, PatternFilter};

/// A composable path filter.
///
/// One capability set spans every shape the engine composes: pattern and
/// filelist atoms, ordered composites, and joined pairs. Every variant can
/// report emptiness, evaluate a path, and produce a content-derived
/// [`IdentityHash`].
///
/// Filters are immutable after construction and evaluation is pure, so a
/// composed tree can be shared freely across traversal threads. Rebuilding
/// configuration must produce a new tree and swap the reference, never
/// mutate in place.
#[derive(Clone, Debug)]
pub enum PathFilter {
    /// Pattern-backed atomic rule (glob or regex).
    Pattern(PatternFilter),
    /// Literal-membership atomic rule.
    Filelist(FilelistFilter),
    /// Ordered first-match-wins rule list.
    Composite(CompositeFilter),
    /// Left-priority OR of two filters.
    Joined(JoinedFilter),
}

impl PathFilter {
    /// A filter with no rules.
    ///
    /// Never matches any path, so [`join`](crate::join) can elide it without
    /// changing behavior.
    #[must_use]
    pub fn empty() -> Self {
        Self::Composite(CompositeFilter::empty())
    }

    /// Returns `true` iff the filter can never affect any decision.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Pattern(_) => false,
            Self::Filelist(list) => list.is_empty(),
            Self::Composite(composite) => composite.is_empty(),
            Self::Joined(joined) => joined.is_empty(),
        }
    }

    /// Evaluates the filter against `path`.
    ///
    /// Empty filters always report a miss. Atomic misses carry the
    /// permissive [`FilterSense::Include`] default; composite misses carry
    /// the composite's own default sense.
    #[must_use]
    pub fn matches(&self, path: &Path) -> MatchOutcome<'_> {
        match self {
            Self::Pattern(pattern) => {
                if pattern.is_match(path) {
                    MatchOutcome::hit(pattern.sense(), self)
                } else {
                    MatchOutcome::miss(FilterSense::Include)
                }
            }
            Self::Filelist(list) => {
                if list.is_match(path) {
                    MatchOutcome::hit(list.sense(), self)
                } else {
                    MatchOutcome::miss(FilterSense::Include)
                }
            }
            Self::Composite(composite) => composite.matches(path),
            Self::Joined(joined) => joined.matches(path),
        }
    }

    /// Returns `true` when any rule fires for `path`.
    pub(crate) fn is_hit(&self, path: &Path) -> bool {
        self.matches(path).is_match()
    }

    /// Content digest over the effective rule set.
    ///
    /// Structurally identical trees hash identically across process runs.
    /// Nested joins are flattened in evaluation order before hashing, so
    /// the fold direction used to build a join chain does not perturb the
    /// digest of behavior-equivalent trees.
    #[must_use]
    pub fn identity_hash(&self) -> IdentityHash {
        match self {
            Self::Pattern(pattern) => pattern.identity_hash(),
            Self::Filelist(list) => list.identity_hash(),
            Self::Composite(composite) => composite.identity_hash(),
            Self::Joined(joined) => joined.identity_hash(),
        }
    }

    /// The shared sense when the filter is a uniform rule carrier: an atom,
    /// or a composite whose rules all agree. Joined nodes never merge.
    pub(crate) fn uniform_sense(&self) -> Option<FilterSense> {
        match self {
            Self::Pattern(pattern) => Some(pattern.sense()),
            Self::Filelist(list) => Some(list.sense()),
            Self::Composite(composite) => composite.uniform_sense(),
            Self::Joined(_) => None,
        }
    }

    /// Renders the filter without a leading sense sign.
    pub(crate) fn fmt_bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => write!(f, "{pattern}"),
            Self::Filelist(list) => write!(f, "{list}"),
            Self::Composite(composite) => write!(f, "{composite}"),
            Self::Joined(joined) => write!(f, "{joined}"),
        }
    }
}

impl fmt::Display for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => write!(f, "{}{pattern}", pattern.sense().sign()),
            Self::Filelist(list) => write!(f, "{}{list}", list.sense().sign()),
            Self::Composite(composite) => write!(f, "{composite}"),
            Self::Joined(joined) => write!(f, "{joined}"),
        }
    }
}
