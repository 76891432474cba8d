//! Tests for order-preserving CLI filter collection.
//!
//! Filter flags are the one position-sensitive part of the command line, so
//! the collector scans the raw token list itself: recognized filter flags
//! are consumed in their original left-to-right order, everything else is
//! left for the regular (position-ignorant) option handling.

use std::path::Path;

use filters::{CaseSensitivity, FilterCollector, FilterSense, PathFilter};

const CASE: CaseSensitivity = CaseSensitivity::Sensitive;

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_owned()).collect()
}

// =============================================================================
// Consumption and Fold Equivalence
// =============================================================================

/// The canonical collection scenario: filter flags are consumed, the
/// unrelated option stays behind, and the folded filter evaluates with
/// first-match-wins over the original flag order.
#[test]
fn filter_flags_are_consumed_and_folded_in_order() {
    let mut tokens = args(&["--exclude=*.log", "--include=important.log", "--other=1"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");

    assert_eq!(tokens, args(&["--other=1"]));

    let filter = &collected.filter;

    let excluded = filter.matches(Path::new("important.log"));
    assert!(excluded.is_match());
    assert_eq!(excluded.sense(), FilterSense::Exclude);

    let debug = filter.matches(Path::new("debug.log"));
    assert!(debug.is_match());
    assert_eq!(debug.sense(), FilterSense::Exclude);

    let readme = filter.matches(Path::new("readme.md"));
    assert!(!readme.is_match());
}

/// Include-first ordering makes the include rule effective.
#[test]
fn include_before_exclude_rescues_the_match() {
    let mut tokens = args(&["--include=important.log", "--exclude=*.log"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");

    assert!(tokens.is_empty());
    assert_eq!(
        collected.filter.matches(Path::new("important.log")).sense(),
        FilterSense::Include
    );
    assert_eq!(
        collected.filter.matches(Path::new("debug.log")).sense(),
        FilterSense::Exclude
    );
}

/// Flag keys are case-insensitive; the leading `--` is mandatory.
#[test]
fn keys_are_case_insensitive_and_double_dash_is_required() {
    let mut tokens = args(&["--EXCLUDE=*.log", "--Include=keep.log", "-exclude=*.tmp"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");

    // the single-dash token is not an option and stays untouched
    assert_eq!(tokens, args(&["-exclude=*.tmp"]));
    assert!(collected.filter.matches(Path::new("debug.log")).is_match());
    assert!(
        collected
            .filter
            .matches(Path::new("keep.log"))
            .sense()
            == FilterSense::Exclude
    );
}

/// Quoted pattern values are unwrapped before compilation.
#[test]
fn quoted_values_are_unwrapped() {
    let mut tokens = args(&["--exclude=\"*.log\""]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");
    assert!(collected.filter.matches(Path::new("debug.log")).is_match());
}

/// Regexp flag variants compile regular expressions that must span the
/// whole path.
#[test]
fn regexp_variants_are_anchored() {
    let mut tokens = args(&["--exclude-regexp=.*\\.te?mp"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");

    assert!(collected.filter.matches(Path::new("a.tmp")).is_match());
    assert!(collected.filter.matches(Path::new("a.temp")).is_match());
    assert!(!collected.filter.matches(Path::new("a.tmpx")).is_match());
}

/// No flags at all degrade to an empty composite that allows everything
/// through at the consuming layer's default policy.
#[test]
fn no_flags_yield_empty_filter() {
    let mut tokens = args(&["source", "dest"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("nothing to compile");
    assert!(collected.filter.is_empty());
    assert!(matches!(collected.filter, PathFilter::Composite(_)));
    assert_eq!(tokens, args(&["source", "dest"]));
}

/// A malformed pattern fails during collection, not on first match.
#[test]
fn malformed_pattern_fails_collection() {
    let mut tokens = args(&["--include=a["]);
    let error = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .unwrap_err();
    assert_eq!(error.pattern(), "a[");
}

// =============================================================================
// Option Map and Fallback
// =============================================================================

/// Without a fallback, unowned options are recorded last-occurrence-wins.
#[test]
fn option_map_keeps_last_occurrence() {
    let mut tokens = args(&["--level=1", "--exclude=*.log", "--level=2"]);
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, None)
        .expect("patterns compile");

    assert_eq!(collected.options.get("level").map(String::as_str), Some("2"));
    assert_eq!(tokens, args(&["--level=1", "--level=2"]));
}

/// A fallback that declines drops the option instead of recording it.
#[test]
fn declined_options_are_dropped() {
    let mut tokens = args(&["--keep=yes", "--drop=no"]);
    let mut fallback = |key: &str, _value: &str| key == "keep";
    let collected = FilterCollector::new(CASE)
        .collect(&mut tokens, Some(&mut fallback))
        .expect("nothing to compile");

    assert_eq!(collected.options.get("keep").map(String::as_str), Some("yes"));
    assert!(!collected.options.contains_key("drop"));
    // unowned tokens stay in the list either way
    assert_eq!(tokens, args(&["--keep=yes", "--drop=no"]));
}

/// The fallback observes every unowned option in order.
#[test]
fn fallback_sees_unowned_options_in_order() {
    let mut tokens = args(&["--alpha=1", "--exclude=*.log", "--beta=2"]);
    let mut seen = Vec::new();
    let mut fallback = |key: &str, value: &str| {
        seen.push(format!("{key}={value}"));
        true
    };
    FilterCollector::new(CASE)
        .collect(&mut tokens, Some(&mut fallback))
        .expect("patterns compile");

    assert_eq!(seen, vec!["alpha=1".to_owned(), "beta=2".to_owned()]);
}
