use rand::random;
use std::fmt;

/// A local, document-scoped RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// The common way to create a fresh one is [`BlankNode::default`], which
/// allocates a random label. [`BlankNode::new`] validates a caller-supplied
/// label instead.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct BlankNode {
    label: String,
}

impl BlankNode {
    /// Creates a blank node from a caller-supplied label.
    ///
    /// The label must be non-empty and must not contain whitespace.
    pub fn new(label: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        let label = label.into();
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(BlankNodeIdParseError);
        }
        Ok(Self { label })
    }

    /// Creates a blank node from a label without validation.
    #[inline]
    pub fn new_unchecked(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.label
    }
}

impl Default for BlankNode {
    /// Builds a blank node with a fresh random label, suitable for
    /// round-tripping through interned stores without label collisions.
    #[inline]
    fn default() -> Self {
        Self {
            label: format!("b{:x}", random::<u64>()),
        }
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.label)
    }
}

/// An error raised during [`BlankNode`] label validation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BlankNodeIdParseError;

impl fmt::Display for BlankNodeIdParseError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the blank node label is invalid")
    }
}

impl std::error::Error for BlankNodeIdParseError {}
