use crate::{FilterSense, IdentityHash, PathFilter};

/// Result of evaluating a filter against a single path.
///
/// Distinguishes "a rule fired" from "fell through to a default": when
/// [`is_match`](Self::is_match) is `false`, [`sense`](Self::sense) carries
/// the applicable default and [`matched_by`](Self::matched_by) is `None`.
#[derive(Clone, Copy, Debug)]
pub struct MatchOutcome<'a> {
    matched: bool,
    sense: FilterSense,
    matched_by: Option<&'a PathFilter>,
}

impl<'a> MatchOutcome<'a> {
    pub(crate) const fn hit(sense: FilterSense, matched_by: &'a PathFilter) -> Self {
        Self {
            matched: true,
            sense,
            matched_by: Some(matched_by),
        }
    }

    pub(crate) const fn miss(default_sense: FilterSense) -> Self {
        Self {
            matched: false,
            sense: default_sense,
            matched_by: None,
        }
    }

    /// Whether any rule fired for the path.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.matched
    }

    /// The sense of the firing rule, or the applicable default on a miss.
    #[must_use]
    pub const fn sense(&self) -> FilterSense {
        self.sense
    }

    /// The filter whose rule fired, when one did.
    #[must_use]
    pub const fn matched_by(&self) -> Option<&'a PathFilter> {
        self.matched_by
    }

    /// Identity hash of the firing filter, for "included due to rule X"
    /// style reporting.
    #[must_use]
    pub fn matched_hash(&self) -> Option<IdentityHash> {
        self.matched_by.map(PathFilter::identity_hash)
    }
}

/// Per-entry verdict handed back to the traversal layer.
///
/// Produced by [`EnumerationGate::evaluate`](crate::EnumerationGate::evaluate)
/// for every visited filesystem entry; nothing here is persisted between
/// traversal steps.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EnumerationDecision {
    included: bool,
    recurse: bool,
    direct: bool,
}

impl EnumerationDecision {
    /// The entry is dropped and, for directories, the whole subtree pruned.
    pub(crate) const fn excluded() -> Self {
        Self {
            included: false,
            recurse: false,
            direct: false,
        }
    }

    /// An include rule explicitly matched the entry.
    pub(crate) const fn direct_match(is_dir: bool) -> Self {
        Self {
            included: true,
            recurse: is_dir,
            direct: true,
        }
    }

    /// No rule fired; the ambient default policy applies.
    pub(crate) const fn ambient(include: bool, is_dir: bool) -> Self {
        Self {
            included: include,
            recurse: is_dir && include,
            direct: false,
        }
    }

    /// Whether the entry should be yielded to the caller.
    #[must_use]
    pub const fn is_included(self) -> bool {
        self.included
    }

    /// Whether a directory entry's children should be visited.
    ///
    /// `false` for an excluded directory prunes the entire subtree; the
    /// enumerator must not evaluate any of its children.
    #[must_use]
    pub const fn should_recurse(self) -> bool {
        self.recurse
    }

    /// Whether inclusion came from an explicit rule rather than ambient
    /// pass-through.
    #[must_use]
    pub const fn is_direct_match(self) -> bool {
        self.direct
    }
}
