use std::fmt;

use digest::Digest;
use md5::Md5;

/// Fixed-size content digest identifying a filter tree's effective rule set.
///
/// Two filters built from the same ordered rules and configuration produce
/// identical hashes across independent process runs, so callers can detect
/// "the filter configuration is unchanged since last run" without comparing
/// the full rule text. The digest is 16 bytes and renders as lowercase hex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct IdentityHash([u8; Self::LEN]);

impl IdentityHash {
    /// Digest length in bytes.
    pub const LEN: usize = 16;

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Display for IdentityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Incremental builder for [`IdentityHash`] values.
///
/// Every filter node seeds the hasher with a distinct tag so structurally
/// different trees cannot collide on identical child content.
pub(crate) struct IdentityHasher(Md5);

impl IdentityHasher {
    pub(crate) fn new(node_tag: &[u8]) -> Self {
        let mut digest = Md5::new();
        digest.update(node_tag);
        Self(digest)
    }

    pub(crate) fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    pub(crate) fn child(&mut self, hash: &IdentityHash) {
        self.0.update(hash.as_bytes());
    }

    pub(crate) fn finish(self) -> IdentityHash {
        IdentityHash(self.0.finalize().into())
    }
}
