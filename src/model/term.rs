use crate::model::{BlankNode, Literal, NamedNode, Variable};
use std::fmt;

/// An RDF term: an IRI, a literal, a blank node, or — only inside patterns
/// and bindings, never in stored data — a variable.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    Literal(Literal),
    BlankNode(BlankNode),
    Variable(Variable),
}

impl Term {
    /// Pattern-matching equality: a concrete term matches a pattern
    /// coordinate when the coordinate is a [`Term::Variable`] (wildcard) or
    /// when both sides are equal concrete terms.
    ///
    /// This is asymmetric in spirit but implemented symmetrically — either
    /// side being a `Variable` is enough to match — since both stored data
    /// and pattern coordinates are represented by the same `Term` type.
    #[inline]
    pub fn matches(&self, pattern: &Term) -> bool {
        matches!(self, Term::Variable(_)) || matches!(pattern, Term::Variable(_)) || self == pattern
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    #[inline]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(n) => n.fmt(f),
            Term::Literal(l) => l.fmt(f),
            Term::BlankNode(b) => b.fmt(f),
            Term::Variable(v) => v.fmt(f),
        }
    }
}

impl From<NamedNode> for Term {
    #[inline]
    fn from(n: NamedNode) -> Self {
        Term::NamedNode(n)
    }
}

impl From<Literal> for Term {
    #[inline]
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

impl From<BlankNode> for Term {
    #[inline]
    fn from(b: BlankNode) -> Self {
        Term::BlankNode(b)
    }
}

impl From<Variable> for Term {
    #[inline]
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_matches_anything() {
        let var = Term::Variable(Variable::new("x").unwrap());
        let iri = Term::NamedNode(NamedNode::new("http://example.com/a").unwrap());
        assert!(var.matches(&iri));
        assert!(iri.matches(&var));
    }

    #[test]
    fn concrete_terms_require_exact_match() {
        let a = Term::NamedNode(NamedNode::new("http://example.com/a").unwrap());
        let b = Term::NamedNode(NamedNode::new("http://example.com/b").unwrap());
        assert!(!a.matches(&b));
        assert!(a.matches(&a.clone()));
    }

    #[test]
    fn different_variants_never_match() {
        let lit = Term::Literal(Literal::new_simple_literal("a"));
        let bnode = Term::BlankNode(BlankNode::new_unchecked("a"));
        assert!(!lit.matches(&bnode));
    }
}
