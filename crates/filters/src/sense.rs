use std::fmt;

/// Direction a rule imposes on a path when it matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FilterSense {
    /// The matching path is brought into the selection.
    Include,
    /// The matching path is dropped from the selection.
    Exclude,
}

impl FilterSense {
    /// Returns `true` for [`FilterSense::Include`].
    #[must_use]
    pub const fn is_include(self) -> bool {
        matches!(self, Self::Include)
    }

    /// Single-byte tag mixed into identity hashes.
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Include => b'i',
            Self::Exclude => b'e',
        }
    }

    /// Sign character used when rendering rules for diagnostics.
    pub(crate) const fn sign(self) -> char {
        match self {
            Self::Include => '+',
            Self::Exclude => '-',
        }
    }
}

impl fmt::Display for FilterSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}
