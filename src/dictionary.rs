use crate::model::Term;
use rustc_hash::FxHashMap;

/// Dense integer id assigned to an interned term. Never negative for a term
/// that has actually been interned; negative ids are reserved as the
/// wildcard sentinel used by [`crate::store::EncodedTriple`] patterns.
pub type Id = i64;

/// Bidirectional mapping between RDF terms and dense integer ids.
///
/// Ids are assigned on first insertion, starting at `0` and increasing
/// monotonically; once assigned an id is never reused, even if its term is
/// later orphaned by deletion (the storage tree may drop every triple that
/// referenced it while leaving the dictionary entry — a dormant id — in
/// place).
///
/// This type owns no synchronization: callers share it behind the storage
/// tree's single reader-writer lock, mutating it only while holding the
/// write guard.
#[derive(Default, Debug)]
pub struct Dictionary {
    id2term: Vec<Term>,
    term2id: FxHashMap<Term, Id>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing id for `term`, interning it and assigning a
    /// fresh id on first sight. Never fails: interning a [`Term::Variable`]
    /// is the caller's error to avoid, not this method's to detect.
    pub fn intern(&mut self, term: Term) -> Id {
        if let Some(id) = self.term2id.get(&term) {
            return *id;
        }
        let id = self.id2term.len() as Id;
        self.term2id.insert(term.clone(), id);
        self.id2term.push(term);
        id
    }

    /// Pure forward lookup; does not intern.
    pub fn lookup_id(&self, term: &Term) -> Option<Id> {
        self.term2id.get(term).copied()
    }

    /// Pure reverse lookup; ids never assigned return `None`.
    pub fn lookup_term(&self, id: Id) -> Option<&Term> {
        if id < 0 {
            return None;
        }
        self.id2term.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.id2term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NamedNode;

    fn iri(s: &str) -> Term {
        Term::NamedNode(NamedNode::new(s).unwrap())
    }

    #[test]
    fn interning_is_idempotent() {
        let mut dict = Dictionary::new();
        let a = dict.intern(iri("http://ex/a"));
        let b = dict.intern(iri("http://ex/a"));
        assert_eq!(a, b);
    }

    #[test]
    fn ids_are_dense_and_contiguous() {
        let mut dict = Dictionary::new();
        let a = dict.intern(iri("http://ex/a"));
        let b = dict.intern(iri("http://ex/b"));
        let c = dict.intern(iri("http://ex/c"));
        assert_eq!([a, b, c], [0, 1, 2]);
    }

    #[test]
    fn bijectivity() {
        let mut dict = Dictionary::new();
        let ids: Vec<Id> = (0..50)
            .map(|i| dict.intern(iri(&format!("http://ex/{i}"))))
            .collect();
        for id in ids {
            let term = dict.lookup_term(id).unwrap().clone();
            assert_eq!(dict.lookup_id(&term), Some(id));
        }
    }

    #[test]
    fn unknown_id_is_absent() {
        let dict = Dictionary::new();
        assert_eq!(dict.lookup_term(0), None);
        assert_eq!(dict.lookup_term(-1), None);
    }
}
