use std::fmt;
use std::path::{MAIN_SEPARATOR, Path};

use rustc_hash::FxHashSet;

use crate::identity::{IdentityHash, IdentityHasher};
use crate::{CaseSensitivity, FilterSense};

/// Atomic rule matching by exact membership in a list of path names.
///
/// Non-rooted entries are normalized by prefixing a single directory
/// separator before insertion, so `foo` is stored as `/foo` and a relative
/// short name only matches when probed in the separator-prefixed form. This
/// keeps list entries aligned with the rooted relative paths the traversal
/// layer presents.
#[derive(Clone, Debug)]
pub struct FilelistFilter {
    sense: FilterSense,
    case: CaseSensitivity,
    lookup: FxHashSet<String>,
    // insertion order retained for stable hashing and rendering
    entries: Vec<String>,
}

impl FilelistFilter {
    /// Builds a lookup filter from `entries` with the given sense.
    ///
    /// Duplicate entries (after normalization and case folding) collapse to
    /// their first occurrence.
    pub fn new<I, S>(sense: FilterSense, entries: I, case: CaseSensitivity) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lookup = FxHashSet::default();
        let mut ordered = Vec::new();
        for entry in entries {
            let entry = entry.into();
            let rooted = if entry.starts_with(MAIN_SEPARATOR) || Path::new(&entry).is_absolute() {
                entry
            } else {
                format!("{MAIN_SEPARATOR}{entry}")
            };
            if lookup.insert(case.fold(&rooted).into_owned()) {
                ordered.push(rooted);
            }
        }
        Self {
            sense,
            case,
            lookup,
            entries: ordered,
        }
    }

    /// Returns the sense assigned at construction.
    #[must_use]
    pub const fn sense(&self) -> FilterSense {
        self.sense
    }

    /// Number of distinct entries in the lookup set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the list holds no entries and can never match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tests the path for exact membership.
    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.lookup.contains(self.case.fold(&text).as_ref())
    }

    pub(crate) fn identity_hash(&self) -> IdentityHash {
        let mut hasher = IdentityHasher::new(b"filelist\0");
        hasher.update(&[self.sense.tag(), self.case.tag()]);
        for entry in &self.entries {
            hasher.update(entry.as_bytes());
            hasher.update(b"\0");
        }
        hasher.finish()
    }
}

impl fmt::Display for FilelistFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filelist[{}]", self.entries.len())
    }
}
