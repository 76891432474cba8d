//! Tests for the traversal-facing enumeration gate.
//!
//! The gate owns no matching logic; it translates a filter verdict into a
//! per-entry decision. The pruning contract matters most: when a directory
//! is excluded, the enumerator must not evaluate any of its children, so
//! these tests drive a mock enumerator and count gate evaluations.

use std::path::{Path, PathBuf};

use filters::{
    CaseSensitivity, EnumerationGate, FilterCollector, FilterSense, PathFilter, PatternFilter,
    join,
};

const CASE: CaseSensitivity = CaseSensitivity::Sensitive;

fn glob(sense: FilterSense, pattern: &str) -> PathFilter {
    PathFilter::Pattern(PatternFilter::glob(sense, pattern, CASE).expect("glob compiles"))
}

/// Minimal in-memory directory tree for driving the gate like a real
/// enumerator would.
struct MockEntry {
    path: &'static str,
    children: Vec<MockEntry>,
}

fn file(path: &'static str) -> MockEntry {
    MockEntry {
        path,
        children: Vec::new(),
    }
}

fn dir(path: &'static str, children: Vec<MockEntry>) -> MockEntry {
    MockEntry { path, children }
}

/// Walks the mock tree the way the traversal layer consumes the gate:
/// every visited entry is evaluated exactly once, and children of entries
/// whose decision forbids recursion are never visited.
fn enumerate(gate: &EnumerationGate, entries: &[MockEntry], visited: &mut Vec<PathBuf>) {
    for entry in entries {
        let is_dir = !entry.children.is_empty();
        visited.push(PathBuf::from(entry.path));
        let decision = gate.evaluate(Path::new(entry.path), is_dir);
        if decision.should_recurse() {
            enumerate(gate, &entry.children, visited);
        }
    }
}

// =============================================================================
// Directory Pruning
// =============================================================================

/// Excluding a directory prunes the entire subtree: none of its children
/// are ever presented to the gate.
#[test]
fn excluded_directory_children_are_never_evaluated() {
    let tree = vec![
        dir(
            "cache",
            vec![file("cache/a.bin"), dir("cache/deep", vec![file("cache/deep/b.bin")])],
        ),
        file("notes.txt"),
    ];
    let gate = EnumerationGate::new(glob(FilterSense::Exclude, "cache"));

    let mut visited = Vec::new();
    enumerate(&gate, &tree, &mut visited);

    assert_eq!(
        visited,
        vec![PathBuf::from("cache"), PathBuf::from("notes.txt")]
    );
}

/// An unmatched directory recurses under the ambient default, so its
/// children are each evaluated once.
#[test]
fn ambient_directories_recurse() {
    let tree = vec![dir("src", vec![file("src/main.rs"), file("src/lib.rs")])];
    let gate = EnumerationGate::new(glob(FilterSense::Exclude, "*.log"));

    let mut visited = Vec::new();
    enumerate(&gate, &tree, &mut visited);

    assert_eq!(visited.len(), 3);
}

/// A restrictive ambient default stops recursion for unmatched directories.
#[test]
fn restrictive_ambient_default_stops_recursion() {
    let tree = vec![dir("src", vec![file("src/main.rs")])];
    let gate = EnumerationGate::new(PathFilter::empty()).with_ambient_default(false);

    let mut visited = Vec::new();
    enumerate(&gate, &tree, &mut visited);

    assert_eq!(visited, vec![PathBuf::from("src")]);
}

// =============================================================================
// Decision Shape
// =============================================================================

/// Direct matches are distinguished from ambient inclusion so callers can
/// report which entries an explicit rule selected.
#[test]
fn direct_match_is_distinguished_from_ambient() {
    let filter = join(
        Some(glob(FilterSense::Exclude, "*.tmp")),
        Some(glob(FilterSense::Include, "report.pdf")),
    )
    .expect("present");
    let gate = EnumerationGate::new(filter);

    let direct = gate.evaluate(Path::new("report.pdf"), false);
    assert!(direct.is_included());
    assert!(direct.is_direct_match());

    let ambient = gate.evaluate(Path::new("notes.txt"), false);
    assert!(ambient.is_included());
    assert!(!ambient.is_direct_match());
}

/// The gate exposes the raw verdict for rule attribution.
#[test]
fn raw_verdict_reports_the_matched_rule() {
    let keep = glob(FilterSense::Include, "report.pdf");
    let keep_hash = keep.identity_hash();
    let gate = EnumerationGate::new(
        join(Some(keep), Some(glob(FilterSense::Exclude, "*.tmp"))).expect("present"),
    );

    let outcome = gate.matches(Path::new("report.pdf"));
    assert_eq!(outcome.matched_hash(), Some(keep_hash));
}

/// The gate's identity hash mirrors the composed filter's.
#[test]
fn gate_hash_tracks_filter_configuration() {
    let build = |flags: &[&str]| {
        let mut tokens: Vec<String> = flags.iter().map(|flag| (*flag).to_owned()).collect();
        let collected = FilterCollector::new(CASE)
            .collect(&mut tokens, None)
            .expect("patterns compile");
        EnumerationGate::new(collected.filter)
    };

    let first = build(&["--exclude=*.log", "--include=keep.log"]);
    let second = build(&["--exclude=*.log", "--include=keep.log"]);
    let changed = build(&["--include=keep.log", "--exclude=*.log"]);

    assert_eq!(first.identity_hash(), second.identity_hash());
    assert_ne!(first.identity_hash(), changed.identity_hash());
}
