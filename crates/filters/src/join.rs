use std::fmt;
use std::path::Path;

use crate::decision::MatchOutcome;
use crate::identity::{IdentityHash, IdentityHasher};
use crate::{CompositeFilter, FilterSense, PathFilter, RulePair, trace};

/// Left-priority OR combination of two filters.
///
/// Evaluation asks `left` first; whenever `left` has an opinion (a rule
/// fires) its outcome stands and `right` is never consulted. This is an OR
/// over "did a rule fire", not over boolean results — the priority is
/// structural.
///
/// Both sides are always present; the [`join`] combinator normalizes absent
/// operands away instead of storing them.
#[derive(Clone, Debug)]
pub struct JoinedFilter {
    left: Box<PathFilter>,
    right: Box<PathFilter>,
}

impl JoinedFilter {
    /// Combines two filters; `left` wins whenever it has an opinion.
    ///
    /// Prefer [`join`] when building trees from optional or possibly-empty
    /// operands — it applies the simplification rules this constructor
    /// deliberately skips.
    #[must_use]
    pub fn new(left: PathFilter, right: PathFilter) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The prioritized side.
    #[must_use]
    pub fn left(&self) -> &PathFilter {
        &self.left
    }

    /// The fallback side.
    #[must_use]
    pub fn right(&self) -> &PathFilter {
        &self.right
    }

    /// Returns `true` iff both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub(crate) fn matches<'a>(&'a self, path: &Path) -> MatchOutcome<'a> {
        let left = self.left.matches(path);
        if left.is_match() {
            return left;
        }
        let right = self.right.matches(path);
        if right.is_match() {
            return right;
        }
        MatchOutcome::miss(FilterSense::Include)
    }

    pub(crate) fn identity_hash(&self) -> IdentityHash {
        let mut hasher = IdentityHasher::new(b"joined\0");
        collect_leaf_hashes(&self.left, &mut hasher);
        collect_leaf_hashes(&self.right, &mut hasher);
        hasher.finish()
    }
}

/// Hashes the non-joined descendants in evaluation order.
///
/// Flattening keeps `join(join(a, b), c)` and `join(a, join(b, c))` — which
/// evaluate identically — on the same digest.
fn collect_leaf_hashes(filter: &PathFilter, hasher: &mut IdentityHasher) {
    match filter {
        PathFilter::Joined(joined) => {
            collect_leaf_hashes(&joined.left, hasher);
            collect_leaf_hashes(&joined.right, hasher);
        }
        other => hasher.child(&other.identity_hash()),
    }
}

impl fmt::Display for JoinedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // render the effective structure: an empty side disappears
        match (self.left.is_empty(), self.right.is_empty()) {
            (true, true) => Ok(()),
            (true, false) => self.right.fmt_bare(f),
            (false, true) => self.left.fmt_bare(f),
            (false, false) => {
                f.write_str("(")?;
                self.left.fmt_bare(f)?;
                f.write_str(") || (")?;
                self.right.fmt_bare(f)?;
                f.write_str(")")
            }
        }
    }
}

/// Joins two optional filters, simplifying trivial shapes.
///
/// Normalization rules, applied in priority order:
///
/// 1. Both operands absent — the result is absent; callers treat an absent
///    filter as "no filtering at all".
/// 2. One operand absent — the other operand, unchanged.
/// 3. One operand empty — the other operand, unchanged; empty filters
///    contribute nothing and accumulate as dead nodes if kept.
/// 4. Both operands uniform rule carriers of the same sense — their rules
///    are concatenated into a single flat [`CompositeFilter`], so a run of
///    same-sense flags collapses into one node instead of a chain.
/// 5. Otherwise — a genuine [`JoinedFilter`] with `first` prioritized.
///
/// The collapse in rule 4 keeps tree depth bounded by sense alternations
/// rather than flag count, so evaluation and hashing stay close to
/// linear-in-rules however many flags were supplied.
#[must_use]
pub fn join(first: Option<PathFilter>, second: Option<PathFilter>) -> Option<PathFilter> {
    let (first, second) = match (first, second) {
        (None, None) => return None,
        (Some(filter), None) | (None, Some(filter)) => return Some(filter),
        (Some(first), Some(second)) => (first, second),
    };
    if first.is_empty() {
        return Some(second);
    }
    if second.is_empty() {
        return Some(first);
    }
    match (first.uniform_sense(), second.uniform_sense()) {
        (Some(left_sense), Some(right_sense)) if left_sense == right_sense => {
            let mut rules = rule_pairs(first);
            rules.extend(rule_pairs(second));
            trace::join_collapsed(left_sense, rules.len());
            Some(PathFilter::Composite(CompositeFilter::new(
                rules,
                FilterSense::Include,
            )))
        }
        _ => Some(PathFilter::Joined(JoinedFilter::new(first, second))),
    }
}

/// Decomposes a filter into composite rule pairs for same-sense merging.
fn rule_pairs(filter: PathFilter) -> Vec<RulePair> {
    match filter {
        PathFilter::Pattern(pattern) => {
            let sense = pattern.sense();
            vec![RulePair::new(sense, PathFilter::Pattern(pattern))]
        }
        PathFilter::Filelist(list) => {
            let sense = list.sense();
            vec![RulePair::new(sense, PathFilter::Filelist(list))]
        }
        PathFilter::Composite(composite) => composite.into_rules(),
        // join() never merges joined nodes, but flattening keeps this total
        PathFilter::Joined(joined) => {
            let mut rules = rule_pairs(*joined.left);
            rules.extend(rule_pairs(*joined.right));
            rules
        }
    }
}
