//! Tests for the `join` combinator's simplification and priority rules.
//!
//! `join` is a left-priority OR over "did a rule fire". Its constructor
//! collapses trivial shapes — absent operands, empty operands, and runs of
//! same-sense rules — so folding many CLI flags produces a tree whose depth
//! is bounded by sense alternations rather than flag count.

use std::path::Path;

use filters::{CaseSensitivity, FilterSense, JoinedFilter, PathFilter, PatternFilter, join};
use proptest::prelude::*;

const CASE: CaseSensitivity = CaseSensitivity::Sensitive;

fn glob(sense: FilterSense, pattern: &str) -> PathFilter {
    PathFilter::Pattern(PatternFilter::glob(sense, pattern, CASE).expect("glob compiles"))
}

// =============================================================================
// Absent and Empty Operands
// =============================================================================

#[test]
fn absent_operands_collapse_to_absent() {
    assert!(join(None, None).is_none());
}

#[test]
fn single_present_operand_is_returned_unchanged() {
    let original = glob(FilterSense::Exclude, "*.bak");
    let hash = original.identity_hash();

    let left = join(Some(original.clone()), None).expect("present");
    assert_eq!(left.identity_hash(), hash);

    let right = join(None, Some(original)).expect("present");
    assert_eq!(right.identity_hash(), hash);
}

/// `join(empty, x)` and `join(x, empty)` both behave exactly like `x` and
/// share its identity hash.
#[test]
fn empty_operands_are_absorbed() {
    let original = glob(FilterSense::Exclude, "*.bak");
    let hash = original.identity_hash();
    let probes = ["notes.bak", "notes.txt", "deep/dir/file.bak"];

    for joined in [
        join(Some(PathFilter::empty()), Some(original.clone())).expect("present"),
        join(Some(original.clone()), Some(PathFilter::empty())).expect("present"),
    ] {
        assert_eq!(joined.identity_hash(), hash);
        for probe in probes {
            let expected = original.matches(Path::new(probe));
            let actual = joined.matches(Path::new(probe));
            assert_eq!(actual.is_match(), expected.is_match(), "probe {probe}");
            assert_eq!(actual.sense(), expected.sense(), "probe {probe}");
        }
    }
}

// =============================================================================
// Short-Circuit Priority
// =============================================================================

/// When both sides would match with different senses, the left side wins.
#[test]
fn left_side_wins_on_overlap() {
    let filter = join(
        Some(glob(FilterSense::Exclude, "*.log")),
        Some(glob(FilterSense::Include, "debug.log")),
    )
    .expect("present");
    assert_eq!(
        filter.matches(Path::new("debug.log")).sense(),
        FilterSense::Exclude
    );

    let flipped = join(
        Some(glob(FilterSense::Include, "debug.log")),
        Some(glob(FilterSense::Exclude, "*.log")),
    )
    .expect("present");
    assert_eq!(
        flipped.matches(Path::new("debug.log")).sense(),
        FilterSense::Include
    );
}

/// The right side is only consulted when the left has no opinion.
#[test]
fn right_side_fills_in_for_left_misses() {
    let filter = join(
        Some(glob(FilterSense::Exclude, "*.log")),
        Some(glob(FilterSense::Include, "notes.txt")),
    )
    .expect("present");

    assert_eq!(
        filter.matches(Path::new("notes.txt")).sense(),
        FilterSense::Include
    );
    assert!(!filter.matches(Path::new("other.md")).is_match());
}

// =============================================================================
// Same-Sense Collapse
// =============================================================================

/// Two same-sense atoms merge into one composite instead of nesting.
#[test]
fn same_sense_operands_merge_flat() {
    let merged = join(
        Some(glob(FilterSense::Exclude, "*.log")),
        Some(glob(FilterSense::Exclude, "*.tmp")),
    )
    .expect("present");

    assert!(matches!(merged, PathFilter::Composite(_)));
    assert!(merged.matches(Path::new("a.log")).is_match());
    assert!(merged.matches(Path::new("b.tmp")).is_match());
    assert!(!merged.matches(Path::new("c.txt")).is_match());
}

/// A whole run of same-sense flags collapses into a single node.
#[test]
fn same_sense_runs_collapse_to_one_node() {
    let patterns = ["*.log", "*.tmp", "*.bak", "*.orig"];
    let mut folded = None;
    for pattern in patterns {
        folded = join(folded.take(), Some(glob(FilterSense::Exclude, pattern)));
    }
    match folded.expect("present") {
        PathFilter::Composite(composite) => assert_eq!(composite.rules().len(), patterns.len()),
        other => panic!("expected a flat composite, got {other}"),
    }
}

/// Alternating senses produce genuine joined nodes.
#[test]
fn alternating_senses_nest_joined_nodes() {
    let folded = join(
        join(
            Some(glob(FilterSense::Exclude, "*.log")),
            Some(glob(FilterSense::Include, "important.log")),
        ),
        Some(glob(FilterSense::Exclude, "*.tmp")),
    )
    .expect("present");
    assert!(matches!(folded, PathFilter::Joined(_)));
}

/// Direct construction skips simplification, keeping both sides verbatim.
#[test]
fn direct_constructor_does_not_simplify() {
    let joined = JoinedFilter::new(
        glob(FilterSense::Exclude, "*.log"),
        glob(FilterSense::Exclude, "*.tmp"),
    );
    assert!(!joined.is_empty());
    assert!(joined.left().matches(Path::new("a.log")).is_match());
    assert!(joined.right().matches(Path::new("b.tmp")).is_match());
}

// =============================================================================
// Fold Equivalence (property)
// =============================================================================

/// Reference model: global first-match-wins over the flat flag sequence.
fn reference_sense(rules: &[(bool, String)], probe: &str) -> Option<FilterSense> {
    rules.iter().find(|(_, pattern)| pattern == probe).map(
        |(include, _)| {
            if *include {
                FilterSense::Include
            } else {
                FilterSense::Exclude
            }
        },
    )
}

proptest! {
    /// Folding any flag sequence through `join` preserves global
    /// first-match-wins semantics, however the collapse rules shaped the
    /// tree.
    #[test]
    fn folding_preserves_first_match_semantics(
        rules in prop::collection::vec((any::<bool>(), "[a-c]{1,3}"), 0..8),
        probe in "[a-c]{1,3}",
    ) {
        let mut folded = None;
        for (include, pattern) in &rules {
            let sense = if *include { FilterSense::Include } else { FilterSense::Exclude };
            folded = join(folded.take(), Some(glob(sense, pattern)));
        }

        let expected = reference_sense(&rules, &probe);
        match folded {
            None => prop_assert!(expected.is_none()),
            Some(filter) => {
                let outcome = filter.matches(Path::new(&probe));
                match expected {
                    Some(sense) => {
                        prop_assert!(outcome.is_match());
                        prop_assert_eq!(outcome.sense(), sense);
                    }
                    None => prop_assert!(!outcome.is_match()),
                }
            }
        }
    }

    /// Two independent folds of the same flag sequence agree on the hash.
    #[test]
    fn folding_twice_hashes_identically(
        rules in prop::collection::vec((any::<bool>(), "[a-c]{1,3}"), 0..8),
    ) {
        let fold = |rules: &[(bool, String)]| {
            let mut folded = None;
            for (include, pattern) in rules {
                let sense = if *include { FilterSense::Include } else { FilterSense::Exclude };
                folded = join(folded.take(), Some(glob(sense, pattern)));
            }
            folded
        };
        let first = fold(&rules);
        let second = fold(&rules);
        match (first, second) {
            (None, None) => {}
            (Some(a), Some(b)) => prop_assert_eq!(a.identity_hash(), b.identity_hash()),
            _ => prop_assert!(false, "folds disagreed on presence"),
        }
    }
}
