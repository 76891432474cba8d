use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::identity::{IdentityHash, IdentityHasher};
use crate::{CaseSensitivity, FilterError, FilterSense};

/// How an atomic pattern's text is interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatternKind {
    /// Shell-style glob compiled through [`globset`]. `*` and `?` are not
    /// stopped by directory separators, so `*.log` matches at any depth.
    Glob,
    /// Regular expression compiled through [`regex`]. The expression must
    /// span the entire path; a substring match never fires.
    Regex,
}

impl PatternKind {
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Glob => b'g',
            Self::Regex => b'r',
        }
    }
}

/// Atomic pattern rule with a fixed sense.
///
/// The sense and case sensitivity are assigned at construction and never
/// mutated. Matching is pure and deterministic; compilation failures are
/// reported eagerly as [`FilterError`].
#[derive(Clone, Debug)]
pub struct PatternFilter {
    sense: FilterSense,
    kind: PatternKind,
    case: CaseSensitivity,
    source: String,
    matcher: PatternMatcher,
}

#[derive(Clone, Debug)]
enum PatternMatcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl PatternFilter {
    /// Compiles a glob pattern with the given sense.
    pub fn glob(
        sense: FilterSense,
        pattern: impl Into<String>,
        case: CaseSensitivity,
    ) -> Result<Self, FilterError> {
        let source = pattern.into();
        let glob = GlobBuilder::new(&source)
            .case_insensitive(case.is_insensitive())
            .build()
            .map_err(|error| FilterError::Glob {
                pattern: source.clone(),
                source: error,
            })?;
        Ok(Self {
            sense,
            kind: PatternKind::Glob,
            case,
            matcher: PatternMatcher::Glob(glob.compile_matcher()),
            source,
        })
    }

    /// Compiles a regular-expression pattern with the given sense.
    ///
    /// The expression is anchored so it must match the entire path; callers
    /// wanting substring behavior must spell it out with `.*`.
    pub fn regex(
        sense: FilterSense,
        pattern: impl Into<String>,
        case: CaseSensitivity,
    ) -> Result<Self, FilterError> {
        let source = pattern.into();
        let anchored = format!(r"\A(?:{source})\z");
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(case.is_insensitive())
            .build()
            .map_err(|error| FilterError::Regex {
                pattern: source.clone(),
                source: Box::new(error),
            })?;
        Ok(Self {
            sense,
            kind: PatternKind::Regex,
            case,
            matcher: PatternMatcher::Regex(regex),
            source,
        })
    }

    /// Returns the sense assigned at construction.
    #[must_use]
    pub const fn sense(&self) -> FilterSense {
        self.sense
    }

    /// Returns how the pattern text is interpreted.
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Tests the pattern against a path.
    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        match &self.matcher {
            PatternMatcher::Glob(glob) => glob.is_match(path),
            PatternMatcher::Regex(regex) => regex.is_match(&path.to_string_lossy()),
        }
    }

    pub(crate) fn identity_hash(&self) -> IdentityHash {
        let mut hasher = IdentityHasher::new(b"pattern\0");
        hasher.update(&[self.kind.tag(), self.sense.tag(), self.case.tag()]);
        hasher.update(self.source.as_bytes());
        hasher.finish()
    }
}

impl fmt::Display for PatternFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PatternKind::Glob => write!(f, "{}", self.source),
            PatternKind::Regex => write!(f, "regex:{}", self.source),
        }
    }
}
