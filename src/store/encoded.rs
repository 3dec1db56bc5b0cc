use crate::dictionary::Id;

/// The sentinel id that marks a pattern coordinate as unconstrained
/// ("wildcard"). Stored triples never use it; only patterns do.
pub const WILDCARD: Id = -1;

/// A triple of dictionary ids, optionally carrying [`WILDCARD`] at any
/// coordinate. Used exclusively for pattern matching against the storage
/// tree; fully stored triples never contain a wildcard.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct EncodedTriple {
    pub subject: Id,
    pub predicate: Id,
    pub object: Id,
}

impl EncodedTriple {
    #[inline]
    pub fn new(subject: Id, predicate: Id, object: Id) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        self.subject != WILDCARD && self.predicate != WILDCARD && self.object != WILDCARD
    }
}
