use crate::model::Term;
use std::fmt;

/// An ordered (subject, predicate, object) triple.
///
/// The same type serves both stored triples and triple patterns. Stored
/// triples must have a subject that is an IRI or blank node, a predicate
/// that is an IRI, and a concrete (non-variable) object; patterns may place
/// a [`Term::Variable`] at any position. Enforcing that distinction is the
/// caller's responsibility — see the storage tree's `add`.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    #[inline]
    pub fn new(subject: impl Into<Term>, predicate: impl Into<Term>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// True if every coordinate of `self` matches the corresponding
    /// coordinate of `pattern` (see [`Term::matches`]).
    #[inline]
    pub fn matches(&self, pattern: &Triple) -> bool {
        self.subject.matches(&pattern.subject)
            && self.predicate.matches(&pattern.predicate)
            && self.object.matches(&pattern.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} {} {} }}", self.subject, self.predicate, self.object)
    }
}
