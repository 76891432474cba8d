use thiserror::Error;

/// Error produced when a pattern cannot be compiled into a matcher.
///
/// Pattern compilation happens eagerly at filter construction time so a
/// malformed flag fails immediately at the CLI layer, never on first match.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A glob pattern failed to compile.
    #[error("failed to compile glob pattern '{pattern}': {source}")]
    Glob {
        /// The offending pattern text.
        pattern: String,
        /// Underlying error reported by the glob compiler.
        #[source]
        source: globset::Error,
    },
    /// A regular expression failed to compile.
    #[error("failed to compile regex pattern '{pattern}': {source}")]
    Regex {
        /// The offending pattern text.
        pattern: String,
        /// Underlying error reported by the regex compiler.
        #[source]
        source: Box<regex::Error>,
    },
}

impl FilterError {
    /// Returns the offending pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Glob { pattern, .. } | Self::Regex { pattern, .. } => pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FilterError;
    use std::error::Error as _;

    #[test]
    fn glob_error_preserves_pattern_and_source() {
        let glob_err = globset::GlobBuilder::new("[").build().unwrap_err();
        let error = FilterError::Glob {
            pattern: "[".into(),
            source: glob_err,
        };

        assert_eq!(error.pattern(), "[");
        assert!(error.to_string().contains("failed to compile glob"));
        assert!(error.source().is_some());
    }
}
