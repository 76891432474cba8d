#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` implements the path-filter evaluation engine used by the
//! `packrat` workspace when selecting filesystem entries for a backup or
//! sync traversal. The engine decides, per candidate path, whether the
//! path is included, excluded, or left to the caller's default policy, and
//! whether a directory should be recursed into. Pattern matching itself is
//! delegated to [`globset`] for glob rules and [`regex`] for regular
//! expression rules; this crate owns the composition algebra on top:
//! ordered first-match-wins rule lists, short-circuiting left-priority
//! joins with equivalence-preserving simplification, order-preserving CLI
//! flag collection, and a content-derived identity hash used to detect
//! configuration changes between runs.
//!
//! # Design
//!
//! - [`PathFilter`] is the single capability set spanning every filter
//!   shape: [`PatternFilter`] and [`FilelistFilter`] atoms with a fixed
//!   [`FilterSense`], ordered [`CompositeFilter`] rule lists, and
//!   [`JoinedFilter`] pairs. Every variant reports emptiness, evaluates a
//!   path, and hashes its content.
//! - [`join`] folds filters together while collapsing trivial shapes:
//!   absent and empty operands are elided, and runs of same-sense rules
//!   merge into one flat composite so tree depth is bounded by sense
//!   alternations rather than flag count.
//! - [`FilterCollector`] pulls `--include`/`--exclude` flags out of a raw
//!   argument list in their original order — precedence is positional, so
//!   the flags cannot go through a position-ignorant option parser — and
//!   folds them into a single filter.
//! - [`EnumerationGate`] translates filter verdicts into per-entry
//!   [`EnumerationDecision`]s for the traversal layer, including subtree
//!   pruning for excluded directories.
//!
//! # Invariants
//!
//! - Composite rules are evaluated strictly in insertion order and the
//!   first match wins; the engine never reorders or deduplicates rules.
//! - Empty filters never match, so eliding them during joins cannot change
//!   behavior.
//! - A joined filter's left side wins whenever any of its rules fires,
//!   regardless of either side's sense.
//! - Filter trees are immutable after construction and evaluation is pure,
//!   so trees may be shared across threads without locking.
//! - Identical ordered rule content produces an identical
//!   [`IdentityHash`] across independent process runs.
//!
//! # Errors
//!
//! Pattern compilation fails eagerly at construction with [`FilterError`],
//! surfacing malformed globs and regexes at the CLI layer instead of on
//! first match. Evaluation itself never fails for a well-formed filter.
//!
//! # Examples
//!
//! Build the classic "exclude scratch files, but a later include cannot
//! rescue them" composite and evaluate it:
//!
//! ```
//! use filters::{
//!     CaseSensitivity, CompositeFilter, FilterSense, PathFilter, PatternFilter, RulePair,
//! };
//! use std::path::Path;
//!
//! # fn demo() -> Result<(), filters::FilterError> {
//! let case = CaseSensitivity::Sensitive;
//! let scratch = PatternFilter::glob(FilterSense::Exclude, "*.tmp", case)?;
//! let keep = PatternFilter::glob(FilterSense::Include, "keep.tmp", case)?;
//! let filter = PathFilter::Composite(CompositeFilter::new(
//!     vec![
//!         RulePair::exclude(PathFilter::Pattern(scratch)),
//!         RulePair::include(PathFilter::Pattern(keep)),
//!     ],
//!     FilterSense::Include,
//! ));
//!
//! // first-match-wins: the exclude rule fires before the include is tried
//! let outcome = filter.matches(Path::new("keep.tmp"));
//! assert!(outcome.is_match());
//! assert!(!outcome.sense().is_include());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - `walk` for the filter-aware traversal that consumes
//!   [`EnumerationGate`].
//! - [`globset`] and [`regex`] for the atomic matching primitives.

mod case;
mod collector;
mod composite;
mod decision;
mod error;
mod filelist;
mod filter;
mod gate;
mod identity;
mod join;
mod pattern;
mod rule;
mod sense;
pub(crate) mod trace;

pub use case::CaseSensitivity;
pub use collector::{CollectedFilters, FilterCollector, OptionFallback};
pub use composite::CompositeFilter;
pub use decision::{EnumerationDecision, MatchOutcome};
pub use error::FilterError;
pub use filelist::FilelistFilter;
pub use filter::PathFilter;
pub use gate::EnumerationGate;
pub use identity::IdentityHash;
pub use join::{JoinedFilter, join};
pub use pattern::{PatternFilter, PatternKind};
pub use rule::RulePair;
pub use sense::FilterSense;
