//! Structured tracing for filter construction and gate decisions.
//!
//! All helpers are conditionally compiled behind the `tracing` feature and
//! collapse to no-op inline functions when it is disabled.

#[cfg(feature = "tracing")]
use std::path::Path;

#[cfg(feature = "tracing")]
use crate::decision::EnumerationDecision;
#[cfg(feature = "tracing")]
use crate::sense::FilterSense;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "packrat::filter";

/// Traces a filter rule collected from the argument list.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn rule_collected(pattern: &str, is_include: bool, is_regex: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        pattern = %pattern,
        is_include = is_include,
        is_regex = is_regex,
        "filter_rule_collected"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn rule_collected(_pattern: &str, _is_include: bool, _is_regex: bool) {}

/// Traces a same-sense collapse performed by the join combinator.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn join_collapsed(sense: FilterSense, rule_count: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        sense = %sense,
        rule_count = rule_count,
        "join_collapsed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn join_collapsed(_sense: crate::sense::FilterSense, _rule_count: usize) {}

/// Traces a gate decision for a visited entry.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn gate_decision(path: &Path, decision: &EnumerationDecision) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path.display(),
        included = decision.is_included(),
        recurse = decision.should_recurse(),
        direct = decision.is_direct_match(),
        "gate_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn gate_decision(_path: &std::path::Path, _decision: &crate::decision::EnumerationDecision) {
}
