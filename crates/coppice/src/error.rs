//! Error types for tree rewriting.

use thiserror::Error;

/// Error produced while rewriting an expression tree.
///
/// Every variant in the closed node/binding set has a total default handler,
/// so the only failure is a tag outside that set. The error is fatal to the
/// `rewrite` call that raised it; no partially rebuilt tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Node or binding tag outside the supported variant set
    #[error("unsupported node kind: {kind}")]
    UnsupportedNode {
        /// The offending tag name
        kind: String,
    },
}

impl RewriteError {
    /// Build an [`RewriteError::UnsupportedNode`] for the given tag.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        RewriteError::UnsupportedNode { kind: kind.into() }
    }
}

/// Result type alias for rewriting operations.
pub type Result<T> = std::result::Result<T, RewriteError>;
