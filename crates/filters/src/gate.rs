use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::decision::{EnumerationDecision, MatchOutcome};
use crate::{IdentityHash, PathFilter, trace};

/// Traversal-facing boundary translating filter verdicts into inclusion and
/// recursion decisions.
///
/// The gate performs no matching itself; it delegates to the composed
/// filter and maps the outcome onto an [`EnumerationDecision`]:
///
/// - matched include — the entry is a direct match; directories recurse.
/// - matched exclude — the entry is dropped and, for directories, the whole
///   subtree is pruned without visiting children.
/// - no match — the ambient default policy supplied by the enumerator
///   decides (the default ambient policy includes and recurses).
#[derive(Clone, Debug)]
pub struct EnumerationGate {
    filter: PathFilter,
    ambient_include: bool,
}

impl EnumerationGate {
    /// Wraps a composed filter with the permissive ambient default.
    #[must_use]
    pub fn new(filter: PathFilter) -> Self {
        Self {
            filter,
            ambient_include: true,
        }
    }

    /// Overrides the policy applied when no rule fires.
    #[must_use]
    pub const fn with_ambient_default(mut self, include: bool) -> Self {
        self.ambient_include = include;
        self
    }

    /// The composed filter behind the gate.
    #[must_use]
    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Identity hash of the composed filter.
    ///
    /// Callers persist this to detect whether the filter configuration
    /// changed between runs, e.g. to invalidate cached enumeration state.
    #[must_use]
    pub fn identity_hash(&self) -> IdentityHash {
        self.filter.identity_hash()
    }

    /// Decides inclusion and recursion for one visited entry.
    #[must_use]
    pub fn evaluate(&self, path: &Path, is_dir: bool) -> EnumerationDecision {
        let decision = self.decide(&self.filter.matches(path), is_dir);
        trace::gate_decision(path, &decision);
        decision
    }

    /// Decides an entry by probing the separator-prefixed relative path
    /// first and falling back to the absolute path.
    ///
    /// Rules are conventionally written against rooted relative paths
    /// (`/logs/debug.log`), but absolute-path rules must keep working, so
    /// the absolute form is consulted when the relative probe falls
    /// through unmatched.
    #[must_use]
    pub fn evaluate_entry(&self, relative: &Path, full: &Path, is_dir: bool) -> EnumerationDecision {
        let probe = rooted_probe(relative);
        let outcome = self.filter.matches(&probe);
        let outcome = if outcome.is_match() {
            outcome
        } else {
            self.filter.matches(full)
        };
        let decision = self.decide(&outcome, is_dir);
        trace::gate_decision(relative, &decision);
        decision
    }

    /// Raw filter verdict for diagnostics and reporting.
    #[must_use]
    pub fn matches(&self, path: &Path) -> MatchOutcome<'_> {
        self.filter.matches(path)
    }

    fn decide(&self, outcome: &MatchOutcome<'_>, is_dir: bool) -> EnumerationDecision {
        if outcome.is_match() {
            if outcome.sense().is_include() {
                EnumerationDecision::direct_match(is_dir)
            } else {
                EnumerationDecision::excluded()
            }
        } else {
            EnumerationDecision::ambient(self.ambient_include, is_dir)
        }
    }
}

/// Prefixes a single directory separator unless the path already carries one.
fn rooted_probe(relative: &Path) -> PathBuf {
    let text = relative.to_string_lossy();
    if text.starts_with(MAIN_SEPARATOR) {
        relative.to_path_buf()
    } else {
        PathBuf::from(format!("{MAIN_SEPARATOR}{text}"))
    }
}
