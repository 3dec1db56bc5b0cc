use crate::dictionary::{Dictionary, Id};
use crate::error::StoreError;
use crate::model::{Term, Triple};
use crate::store::encoded::{EncodedTriple, WILDCARD};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

type ObjectSet = BTreeSet<Id>;
type PredicateMap = BTreeMap<Id, ObjectSet>;
type SubjectMap = BTreeMap<Id, PredicateMap>;

struct TreeInner {
    dictionary: Dictionary,
    subjects: SubjectMap,
}

/// A three-level prefix tree keyed by (subject id, predicate id, object id),
/// backed by a [`Dictionary`] that interns the RDF terms at its leaves and
/// patterns.
///
/// The whole structure — dictionary and tree together — lives behind a
/// single reader-writer lock: [`StorageTree::add`] and [`StorageTree::delete`]
/// take the write side and exclude everything else; any number of
/// [`StorageTree::filter`]/[`StorageTree::filter_subset`] calls may run
/// concurrently under the read side. `BTreeMap` children give stable,
/// reproducible iteration order, which is convenient for debug output even
/// though the contract callers may rely on is set-equivalence, not order.
pub struct StorageTree {
    inner: RwLock<TreeInner>,
}

impl Default for StorageTree {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageTree {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TreeInner {
                dictionary: Dictionary::new(),
                subjects: SubjectMap::new(),
            }),
        }
    }

    /// Interns `triple`'s terms and inserts the root→subject→predicate→object
    /// path. Re-adding an existing triple is a no-op. Never fails.
    pub fn add(&self, triple: &Triple) {
        let mut inner = self.inner.write().expect("storage tree lock poisoned");
        let s = inner.dictionary.intern(triple.subject.clone());
        let p = inner.dictionary.intern(triple.predicate.clone());
        let o = inner.dictionary.intern(triple.object.clone());
        let inserted = inner.subjects.entry(s).or_default().entry(p).or_default().insert(o);
        tracing::trace!(%triple, inserted, "add");
    }

    /// Shorthand for `filter_subset(pattern, -1, 0)`.
    pub fn filter(&self, pattern: &Triple) -> Result<Vec<Triple>, StoreError> {
        self.filter_subset(pattern, -1, 0)
    }

    /// Returns the triples matching `pattern` (where a [`Term::Variable`]
    /// coordinate is a wildcard), skipping the first `offset` matches in
    /// traversal order and yielding at most `limit` of what remains.
    /// `limit = -1` means unbounded.
    ///
    /// An unknown concrete term at any pattern coordinate prunes the whole
    /// traversal and yields an empty result, not an error.
    pub fn filter_subset(
        &self,
        pattern: &Triple,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<Triple>, StoreError> {
        let inner = self.inner.read().expect("storage tree lock poisoned");
        let Some(pattern) = resolve_pattern(&inner.dictionary, pattern) else {
            return Ok(Vec::new());
        };
        let want = if limit < 0 { usize::MAX } else { limit as usize };

        let mut out = Vec::new();
        let mut seen = 0u64;
        'subjects: for (&sid, predicates) in select_children(&inner.subjects, pattern.subject) {
            for (&pid, objects) in select_children(predicates, pattern.predicate) {
                for &oid in select_objects(objects, pattern.object) {
                    if seen < offset {
                        seen += 1;
                        continue;
                    }
                    if out.len() >= want {
                        break 'subjects;
                    }
                    out.push(decode(&inner.dictionary, sid, pid, oid)?);
                    seen += 1;
                }
            }
        }
        Ok(out)
    }

    /// Removes every stored triple matching `pattern`. A [`Term::Variable`]
    /// coordinate matches any id at that position; an unknown concrete term
    /// matches nothing. Interior nodes that become childless are removed,
    /// bottom-up; the root is never removed; dictionary entries are left in
    /// place (dormant ids are permitted).
    pub fn delete(&self, pattern: &Triple) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("storage tree lock poisoned");
        tracing::trace!(%pattern, "delete");
        let Some(pattern) = resolve_pattern(&inner.dictionary, pattern) else {
            return Ok(());
        };

        let subject_ids: Vec<Id> = if pattern.subject == WILDCARD {
            inner.subjects.keys().copied().collect()
        } else {
            vec![pattern.subject]
        };
        for sid in subject_ids {
            let subject_now_empty = {
                let Some(predicates) = inner.subjects.get_mut(&sid) else {
                    continue;
                };
                let predicate_ids: Vec<Id> = if pattern.predicate == WILDCARD {
                    predicates.keys().copied().collect()
                } else {
                    vec![pattern.predicate]
                };
                for pid in predicate_ids {
                    let predicate_now_empty = {
                        let Some(objects) = predicates.get_mut(&pid) else {
                            continue;
                        };
                        if pattern.object == WILDCARD {
                            objects.clear();
                        } else {
                            objects.remove(&pattern.object);
                        }
                        objects.is_empty()
                    };
                    if predicate_now_empty {
                        predicates.remove(&pid);
                    }
                }
                predicates.is_empty()
            };
            if subject_now_empty {
                inner.subjects.remove(&sid);
            }
        }
        Ok(())
    }

    /// Number of distinct subjects with at least one stored triple.
    pub fn subject_count(&self) -> usize {
        self.inner.read().expect("storage tree lock poisoned").subjects.len()
    }

    /// Number of distinct predicates stored under `subject`, or `0` if the
    /// subject has no stored triple.
    pub fn predicate_count(&self, subject: &Term) -> usize {
        let inner = self.inner.read().expect("storage tree lock poisoned");
        let Some(sid) = inner.dictionary.lookup_id(subject) else {
            return 0;
        };
        inner.subjects.get(&sid).map_or(0, BTreeMap::len)
    }

    /// Number of distinct objects stored under (subject, predicate), or `0`
    /// if that path has no stored triple.
    pub fn object_count(&self, subject: &Term, predicate: &Term) -> usize {
        let inner = self.inner.read().expect("storage tree lock poisoned");
        let (Some(sid), Some(pid)) = (
            inner.dictionary.lookup_id(subject),
            inner.dictionary.lookup_id(predicate),
        ) else {
            return 0;
        };
        inner
            .subjects
            .get(&sid)
            .and_then(|predicates| predicates.get(&pid))
            .map_or(0, BTreeSet::len)
    }
}

/// Resolves each concrete pattern coordinate to its dictionary id, leaving
/// [`WILDCARD`] at any `Term::Variable` coordinate. Returns `None` as a
/// whole if any concrete coordinate is unknown to the dictionary — the
/// caller should treat that as "matches nothing".
fn resolve_pattern(dictionary: &Dictionary, pattern: &Triple) -> Option<EncodedTriple> {
    let resolve = |term: &Term| -> Option<Id> {
        if term.is_variable() {
            Some(WILDCARD)
        } else {
            dictionary.lookup_id(term)
        }
    };
    Some(EncodedTriple::new(
        resolve(&pattern.subject)?,
        resolve(&pattern.predicate)?,
        resolve(&pattern.object)?,
    ))
}

/// Iterates every entry of `children` when `pattern_id` is [`WILDCARD`], or
/// just the single matching entry (if any) when it is concrete.
fn select_children<V>(children: &BTreeMap<Id, V>, pattern_id: Id) -> Box<dyn Iterator<Item = (&Id, &V)> + '_> {
    if pattern_id == WILDCARD {
        Box::new(children.iter())
    } else {
        Box::new(children.get_key_value(&pattern_id).into_iter())
    }
}

/// Same selection rule as [`select_children`], specialized to the leaf
/// object level where children are a flat id set rather than a map.
fn select_objects(objects: &ObjectSet, pattern_id: Id) -> Box<dyn Iterator<Item = &Id> + '_> {
    if pattern_id == WILDCARD {
        Box::new(objects.iter())
    } else {
        Box::new(objects.get(&pattern_id).into_iter())
    }
}

fn decode(dictionary: &Dictionary, sid: Id, pid: Id, oid: Id) -> Result<Triple, StoreError> {
    let encoded = EncodedTriple::new(sid, pid, oid);
    debug_assert!(encoded.is_concrete(), "a stored leaf path must never carry a wildcard id");
    let subject = dictionary.lookup_term(sid).ok_or(StoreError::InconsistentStore(sid))?.clone();
    let predicate = dictionary.lookup_term(pid).ok_or(StoreError::InconsistentStore(pid))?.clone();
    let object = dictionary.lookup_term(oid).ok_or(StoreError::InconsistentStore(oid))?.clone();
    Ok(Triple { subject, predicate, object })
}
