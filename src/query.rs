//! SELECT / ASK / CONSTRUCT facades over the operator algebra.
//!
//! Each facade is a small builder that accumulates a variable list and/or
//! triple templates plus the basic graph patterns to match, then compiles
//! them through [`Planner`] into one [`Operator`] tree on `execute`.

use crate::algebra::{complete_pattern, BindingsGroup, Operator};
use crate::error::QueryError;
use crate::model::{Term, Triple, Variable};
use crate::planner::{BasicGraphPattern, Planner};
use crate::store::StorageTree;
use std::sync::Arc;

/// Starts a `SELECT` query over the given output variables.
pub fn select(variables: impl IntoIterator<Item = Variable>) -> SelectQuery {
    SelectQuery {
        variables: variables.into_iter().collect(),
        bgps: Vec::new(),
        graph: None,
    }
}

/// Starts an `ASK` query: did anything match?
pub fn ask() -> AskQuery {
    AskQuery { bgps: Vec::new(), graph: None }
}

/// Starts a `CONSTRUCT` query with the given triple templates, which may
/// reuse the variables bound by the matched basic graph patterns.
pub fn construct(templates: impl IntoIterator<Item = Triple>) -> ConstructQuery {
    ConstructQuery {
        templates: templates.into_iter().collect(),
        bgps: Vec::new(),
        graph: None,
    }
}

#[derive(Clone)]
pub struct SelectQuery {
    variables: Vec<Variable>,
    bgps: Vec<BasicGraphPattern>,
    graph: Option<Arc<StorageTree>>,
}

impl SelectQuery {
    pub fn from(mut self, graph: Arc<StorageTree>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn where_bgp(mut self, bgp: BasicGraphPattern) -> Self {
        self.bgps.push(bgp);
        self
    }

    /// Compiles and runs the query, returning a streaming, lazily-produced
    /// set of solutions.
    pub fn execute(self) -> Solutions {
        let graph = self.graph.expect("a SELECT query needs a graph set via `.from`");
        let plan = Planner::new(graph).plan(&self.bgps);
        let projected = Operator::project(plan, self.variables);
        Solutions { receiver: projected.execute() }
    }
}

#[derive(Clone)]
pub struct AskQuery {
    bgps: Vec<BasicGraphPattern>,
    graph: Option<Arc<StorageTree>>,
}

impl AskQuery {
    pub fn from(mut self, graph: Arc<StorageTree>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn where_bgp(mut self, bgp: BasicGraphPattern) -> Self {
        self.bgps.push(bgp);
        self
    }

    /// Runs the query and returns whether at least one solution exists.
    /// Only the first produced solution is ever pulled; the receiver is
    /// dropped immediately afterwards, which closes the channel on the
    /// producer side and lets every in-flight operator thread wind down on
    /// its next blocked send instead of continuing to compute bindings
    /// nobody wants.
    pub fn execute(self) -> Result<bool, QueryError> {
        let graph = self.graph.expect("an ASK query needs a graph set via `.from`");
        let plan = Planner::new(graph).plan(&self.bgps);
        let receiver = plan.execute();
        match receiver.recv() {
            Ok(Ok(_)) => Ok(true),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(false),
        }
    }
}

#[derive(Clone)]
pub struct ConstructQuery {
    templates: Vec<Triple>,
    bgps: Vec<BasicGraphPattern>,
    graph: Option<Arc<StorageTree>>,
}

impl ConstructQuery {
    pub fn from(mut self, graph: Arc<StorageTree>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn where_bgp(mut self, bgp: BasicGraphPattern) -> Self {
        self.bgps.push(bgp);
        self
    }

    /// Runs the query, substituting each solution into every template
    /// triple and collecting the results into a fresh graph. A template
    /// triple that still has an unbound variable after substitution (its
    /// variable never appeared in any matched pattern, or the solution left
    /// it unbound) is dropped rather than stored — `CONSTRUCT` only ever
    /// produces concrete triples.
    pub fn execute(self) -> Result<StorageTree, QueryError> {
        let graph = self.graph.expect("a CONSTRUCT query needs a graph set via `.from`");
        let plan = Planner::new(graph).plan(&self.bgps);
        let result = StorageTree::new();
        for item in plan.execute() {
            let group: BindingsGroup = item?;
            for template in &self.templates {
                let triple = complete_pattern(template, &group);
                if !has_unbound_variable(&triple) {
                    result.add(&triple);
                }
            }
        }
        Ok(result)
    }
}

fn has_unbound_variable(triple: &Triple) -> bool {
    matches!(triple.subject, Term::Variable(_))
        || matches!(triple.predicate, Term::Variable(_))
        || matches!(triple.object, Term::Variable(_))
}

/// A lazily-produced stream of `SELECT` solutions. Each item is a
/// [`BindingsGroup`] unless an operator hit a store-consistency error.
pub struct Solutions {
    receiver: crate::algebra::BindingsReceiver,
}

impl Iterator for Solutions {
    type Item = Result<BindingsGroup, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

impl Solutions {
    /// Caps the stream at `n` solutions. Implemented as a plain
    /// `Iterator::take`: once `n` items have been pulled, this iterator is
    /// dropped, which drops the receiver, which closes the channel and lets
    /// the rest of the operator tree stop producing on its next send.
    pub fn limit(self, n: usize) -> std::iter::Take<Self> {
        self.take(n)
    }
}
