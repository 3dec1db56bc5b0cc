use oxiri::{Iri, IriParseError};
use std::fmt;

/// An absolute RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// The default string formatter returns the N-Triples/Turtle/SPARQL
/// compatible representation:
/// ```
/// use trieql::model::NamedNode;
///
/// assert_eq!(
///     "<http://example.com/foo>",
///     NamedNode::new("http://example.com/foo")?.to_string()
/// );
/// # Result::<_, trieql::model::IriParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NamedNode {
    iri: String,
}

pub use oxiri::IriParseError;

impl NamedNode {
    /// Builds and validates an IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self {
            iri: Iri::parse(iri.into())?.into_inner(),
        })
    }

    /// Builds an IRI from a string without validation.
    ///
    /// It is the caller's responsibility to ensure `iri` is a valid IRI.
    #[inline]
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.iri
    }
}

impl fmt::Display for NamedNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl PartialEq<str> for NamedNode {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.iri == other
    }
}

impl PartialEq<&str> for NamedNode {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.iri == *other
    }
}
