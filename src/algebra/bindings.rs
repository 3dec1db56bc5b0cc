use crate::model::{Term, Triple, Variable};
use std::collections::BTreeMap;
use std::fmt;

/// A set of variable→term assignments produced together by one path through
/// the operator tree. `BTreeMap` gives deterministic iteration and `Display`
/// output; equality and cloning are insertion-order-independent by
/// construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingsGroup {
    values: BTreeMap<Variable, Term>,
}

impl BindingsGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.values.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.values.contains_key(variable)
    }

    pub fn insert(&mut self, variable: Variable, term: Term) {
        self.values.insert(variable, term);
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a clone of `self` restricted to the variables in `keep`.
    /// Variables in `keep` that are not bound here simply do not appear in
    /// the result.
    pub fn restricted_to(&self, keep: &[Variable]) -> Self {
        Self {
            values: keep
                .iter()
                .filter_map(|v| self.values.get(v).map(|t| (v.clone(), t.clone())))
                .collect(),
        }
    }
}

impl fmt::Display for BindingsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{var}={term}")?;
        }
        write!(f, "}}")
    }
}

/// Substitutes every [`Term::Variable`] coordinate of `pattern` whose name
/// appears in `group` with the bound term, leaving unbound variables (and
/// non-variable coordinates) untouched.
pub fn complete_pattern(pattern: &Triple, group: &BindingsGroup) -> Triple {
    Triple {
        subject: substitute(&pattern.subject, group),
        predicate: substitute(&pattern.predicate, group),
        object: substitute(&pattern.object, group),
    }
}

fn substitute(term: &Term, group: &BindingsGroup) -> Term {
    match term {
        Term::Variable(v) => group.get(v).cloned().unwrap_or_else(|| term.clone()),
        _ => term.clone(),
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
    fn completion_substitutes_bound_variables_only() {
        let mut group = BindingsGroup::new();
        let x = Variable::new("x").unwrap();
        group.insert(x.clone(), iri("http://ex/s"));

        let pattern = Triple::new(
            Term::Variable(x),
            iri("http://ex/p"),
            Term::Variable(Variable::new("y").unwrap()),
        );
        let completed = complete_pattern(&pattern, &group);
        assert_eq!(completed.subject, iri("http://ex/s"));
        assert!(completed.object.is_variable());
    }

    #[test]
    fn restricted_to_drops_unbound_keys() {
        let mut group = BindingsGroup::new();
        let x = Variable::new("x").unwrap();
        let y = Variable::new("y").unwrap();
        group.insert(x.clone(), iri("http://ex/s"));
        let restricted = group.restricted_to(&[x, y]);
        assert_eq!(restricted.len(), 1);
    }
}
