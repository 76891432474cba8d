#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic filesystem traversal `packrat` uses to
//! build its selection list. The walker enumerates regular files,
//! directories, and symbolic links in depth-first order, sorting directory
//! entries lexicographically before yielding them so the sequence is stable
//! across platforms and filesystems. Selection is delegated to an
//! [`EnumerationGate`]: every visited entry is evaluated exactly once, and
//! an excluded directory prunes its whole subtree — the walker never reads
//! the directory's contents.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the traversal root, whether the root entry
//!   itself is emitted, and the optional gate.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values.
//!   Directory contents are processed before the walker moves to the next
//!   sibling.
//! - [`WalkEntry`] carries the absolute and root-relative paths, captured
//!   metadata, depth, and whether an explicit include rule selected the
//!   entry (as opposed to ambient pass-through).
//! - [`WalkError`] describes I/O failures encountered while querying
//!   metadata or reading directories, capturing the offending path.
//!
//! # Invariants
//!
//! - Yielded entries always reside within the configured root; relative
//!   paths never contain `..` segments.
//! - Each visited entry is evaluated against the gate exactly once. The
//!   children of an entry whose decision forbids recursion are neither
//!   evaluated nor read from disk.
//! - Symbolic links are yielded but never followed.
//! - Traversal never panics; filesystem failures surface as [`WalkError`].
//!
//! # Errors
//!
//! Traversal emits [`WalkError`] when metadata cannot be queried or a
//! directory cannot be read. The original [`io::Error`] is reachable via
//! [`std::error::Error::source`].
//!
//! # Examples
//!
//! Traverse a tree while excluding a scratch directory:
//!
//! ```
//! use filters::{CaseSensitivity, EnumerationGate, FilterSense, PathFilter, PatternFilter};
//! use walk::WalkBuilder;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("cache"))?;
//! fs::write(root.join("cache/blob.bin"), b"data")?;
//! fs::write(root.join("file.txt"), b"data")?;
//!
//! let scratch = PatternFilter::glob(
//!     FilterSense::Exclude,
//!     "/cache",
//!     CaseSensitivity::host_default(),
//! )?;
//! let gate = EnumerationGate::new(PathFilter::Pattern(scratch));
//!
//! let walker = WalkBuilder::new(&root).gate(gate).include_root(false).build()?;
//! let mut seen = Vec::new();
//! for entry in walker {
//!     seen.push(entry?.relative_path().to_path_buf());
//! }
//!
//! assert_eq!(seen, vec![std::path::PathBuf::from("file.txt")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`filters`] for the rule engine behind [`EnumerationGate`].

use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filters::EnumerationGate;

/// Configures a filesystem traversal rooted at a specific path.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    include_root: bool,
    gate: Option<EnumerationGate>,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            include_root: true,
            gate: None,
        }
    }

    /// Installs the gate consulted for every entry below the root.
    ///
    /// Without a gate every entry is included and every directory recursed,
    /// as if an empty filter with the permissive ambient default were
    /// installed.
    #[must_use]
    pub fn gate(mut self, gate: EnumerationGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Controls whether the root entry should be included in the output.
    ///
    /// The root itself is never gated; disabling this starts the stream
    /// directly with the root's children.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    pub fn build(self) -> Result<Walker, WalkError> {
        let metadata = fs::symlink_metadata(&self.root)
            .map_err(|error| WalkError::root_metadata(self.root.clone(), error))?;

        let mut walker = Walker {
            root: self.root,
            gate: self.gate,
            yielded_root: !self.include_root,
            root_metadata: Some(metadata),
            stack: Vec::new(),
            finished: false,
        };

        if walker
            .root_metadata
            .as_ref()
            .is_some_and(|metadata| metadata.file_type().is_dir())
        {
            let state = DirectoryState::new(walker.root.clone(), PathBuf::new(), 0)?;
            walker.stack.push(state);
        }

        Ok(walker)
    }
}

/// Depth-first iterator over filesystem entries surviving the gate.
pub struct Walker {
    root: PathBuf,
    gate: Option<EnumerationGate>,
    yielded_root: bool,
    root_metadata: Option<fs::Metadata>,
    stack: Vec<DirectoryState>,
    finished: bool,
}

impl Walker {
    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<Option<WalkEntry>, WalkError> {
        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let is_dir = metadata.file_type().is_dir();

        let mut direct_match = false;
        let mut recurse = is_dir;
        if let Some(gate) = &self.gate {
            let decision = gate.evaluate_entry(&relative_path, &full_path, is_dir);
            if !decision.is_included() {
                return Ok(None);
            }
            direct_match = decision.is_direct_match();
            recurse = decision.should_recurse();
        }

        if is_dir && recurse {
            let state = DirectoryState::new(full_path.clone(), relative_path.clone(), depth)?;
            self.stack.push(state);
        }

        Ok(Some(WalkEntry {
            full_path,
            relative_path,
            metadata,
            depth,
            is_root: false,
            direct_match,
        }))
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.yielded_root {
            self.yielded_root = true;
            if let Some(metadata) = self.root_metadata.take() {
                let entry = WalkEntry {
                    full_path: self.root.clone(),
                    relative_path: PathBuf::new(),
                    metadata,
                    depth: 0,
                    is_root: true,
                    direct_match: false,
                };
                return Some(Ok(entry));
            }
        }

        loop {
            let (full_path, relative_path, depth) = {
                let state = self.stack.last_mut()?;

                if let Some(name) = state.next_name() {
                    let full_path = state.fs_path.join(&name);
                    let relative_path = if state.relative_prefix.as_os_str().is_empty() {
                        PathBuf::from(&name)
                    } else {
                        let mut relative = state.relative_prefix.clone();
                        relative.push(&name);
                        relative
                    };
                    (full_path, relative_path, state.depth + 1)
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            match self.prepare_entry(full_path, relative_path, depth) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    entries: Vec<OsString>,
    index: usize,
    depth: usize,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, relative_prefix: PathBuf, depth: usize) -> Result<Self, WalkError> {
        let mut entries = Vec::new();
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::read_dir(fs_path.clone(), error))?;
        for entry in read_dir {
            let entry = entry.map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        Ok(Self {
            fs_path,
            relative_prefix,
            entries,
            index: 0,
            depth,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        let name = self.entries.get(self.index)?;
        self.index += 1;
        Some(name.clone())
    }
}

/// Result of a filesystem traversal step.
#[derive(Debug)]
pub struct WalkEntry {
    full_path: PathBuf,
    relative_path: PathBuf,
    metadata: fs::Metadata,
    depth: usize,
    is_root: bool,
    direct_match: bool,
}

impl WalkEntry {
    /// Returns the absolute path to the filesystem entry.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Provides access to the [`fs::Metadata`] captured for the entry.
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Reports the depth of the entry relative to the root (root depth is `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Indicates whether this entry corresponds to the traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }

    /// Indicates whether an explicit include rule selected this entry.
    ///
    /// `false` for entries that passed through on the ambient default, so
    /// callers can report which files an explicit rule brought in.
    #[must_use]
    pub const fn is_direct_match(&self) -> bool {
        self.direct_match
    }
}

/// Error returned when traversal fails.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    fn root_metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::RootMetadata { path, source })
    }

    fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDirEntry { path, source })
    }

    fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Metadata { path, source })
    }

    /// Returns the specific failure that terminated traversal.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::RootMetadata { path, source } => {
                write!(
                    f,
                    "failed to inspect traversal root '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Metadata { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            WalkErrorKind::RootMetadata { source, .. }
            | WalkErrorKind::ReadDir { source, .. }
            | WalkErrorKind::ReadDirEntry { source, .. }
            | WalkErrorKind::Metadata { source, .. } => Some(source),
        }
    }
}

/// Classification of traversal failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// Failed to query metadata for the traversal root.
    RootMetadata {
        /// Path that failed to provide metadata.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to read the contents of a directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry during iteration.
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to retrieve metadata for an entry.
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}
