//! Turns basic graph patterns into an [`Operator`] tree.
//!
//! The planner is a simple greedy heuristic, not a cost-based optimizer: it
//! has no cardinality estimates to work from beyond "how many variables does
//! this scan still have free", so it makes locally-good choices rather than
//! a globally optimal plan. For the pattern counts real queries have, this
//! is the same trade oxigraph's `GraphPatternPlanNode` lowering makes before
//! falling back to statistics it doesn't always have either.

use crate::algebra::Operator;
use crate::model::{Term, Triple};
use crate::store::StorageTree;
use std::sync::Arc;

/// A basic graph pattern: a conjunction of triple patterns evaluated
/// together. Several BGPs compose into one query when a query has more than
/// one `UNION`-separated block.
pub type BasicGraphPattern = Vec<Triple>;

pub struct Planner {
    graph: Arc<StorageTree>,
}

impl Planner {
    pub fn new(graph: Arc<StorageTree>) -> Self {
        Self { graph }
    }

    /// Lowers a list of basic graph patterns into one operator tree.
    ///
    /// Within a BGP, patterns are paired off greedily: the first two
    /// patterns (in list order) that share a variable are joined, repeated
    /// until no remaining pair shares one. When both sides of a pair are
    /// still plain scans, the one with fewer free variables becomes the
    /// join's outer (left) side, since a narrower scan is assumed to match
    /// fewer rows; once a side is itself a join, the existing left-to-right
    /// order is kept. Any patterns left over (because nothing in the BGP
    /// shares a variable with them) are combined with what was joined via a
    /// left fold of `Union`. BGPs are combined with each other the same way.
    ///
    /// Panics if `bgps` is empty or every BGP in it is empty — there is no
    /// sensible operator tree for zero patterns.
    pub fn plan(&self, bgps: &[BasicGraphPattern]) -> Operator {
        let mut clusters: Vec<Operator> = bgps
            .iter()
            .filter(|bgp| !bgp.is_empty())
            .map(|bgp| self.plan_bgp(bgp))
            .collect();
        assert!(!clusters.is_empty(), "cannot plan an empty set of basic graph patterns");
        let mut tree = clusters.remove(0);
        for cluster in clusters {
            tree = Operator::union(tree, cluster);
        }
        tree
    }

    fn plan_bgp(&self, patterns: &[Triple]) -> Operator {
        let mut items: Vec<Operator> = patterns
            .iter()
            .map(|pattern| Operator::scan(Arc::clone(&self.graph), pattern.clone(), -1, 0))
            .collect();

        while let Some((i, j)) = first_shared_variable_pair(&items) {
            let right = items.remove(j);
            let left = items.remove(i);
            let (outer, inner) = order_by_selectivity(left, right);
            items.insert(i, Operator::join(outer, inner));
        }

        let mut iter = items.into_iter();
        let first = iter.next().expect("plan_bgp is only called with a non-empty pattern list");
        iter.fold(first, Operator::union)
    }
}

fn first_shared_variable_pair(items: &[Operator]) -> Option<(usize, usize)> {
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if shares_variable(&items[i], &items[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

fn shares_variable(a: &Operator, b: &Operator) -> bool {
    a.binding_names().iter().any(|v| b.binding_names().contains(v))
}

/// When both operators are still bare scans, puts the one with fewer free
/// variables on the left. Otherwise preserves `(left, right)` as given.
fn order_by_selectivity(left: Operator, right: Operator) -> (Operator, Operator) {
    if let (Operator::Scan { pattern: left_pattern, .. }, Operator::Scan { pattern: right_pattern, .. }) =
        (&left, &right)
    {
        if free_variable_count(right_pattern) < free_variable_count(left_pattern) {
            return (right, left);
        }
    }
    (left, right)
}

fn free_variable_count(pattern: &Triple) -> usize {
    [&pattern.subject, &pattern.predicate, &pattern.object]
        .into_iter()
        .filter(|t| t.is_variable())
        .count()
}
