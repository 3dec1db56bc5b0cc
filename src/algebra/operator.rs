use crate::algebra::bindings::{complete_pattern, BindingsGroup};
use crate::error::QueryError;
use crate::model::{Term, Triple, Variable};
use crate::store::StorageTree;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

/// Channel capacity for a stream of bindings between two operators.
/// Producers block once a channel holds this many pending items; closing a
/// channel (dropping every sender, or dropping the receiver) signals
/// completion to the other side.
pub const BUFFER_SIZE: usize = 100;

/// Number of outer-stream groups accumulated into one page before a join
/// spawns a task to drive the inner side for that page. Pages may be
/// processed concurrently; a single page preserves the order its outer
/// groups arrived in.
pub const PAGE_SIZE: usize = 15;

/// A single item of a bindings stream: either a produced group or a fatal
/// failure that closes the stream on the next receive.
pub type StreamItem = Result<BindingsGroup, QueryError>;
pub type BindingsSender = SyncSender<StreamItem>;
pub type BindingsReceiver = Receiver<StreamItem>;

/// The operator algebra: triple-scan, join, union, and project, composed
/// into a tree whose leaves hold a (non-owning, reference-counted) handle
/// onto the storage graph.
///
/// This is a closed, tagged-union algebra rather than a trait-object tree:
/// every node kind is known up front, which gives structural equality and a
/// debug string for free and keeps the planner's tests exact. Each variant
/// caches its schema (`binding_names`) at construction time since the tree
/// is immutable afterwards — there is nothing left to invalidate the cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operator {
    Scan {
        pattern: Triple,
        limit: i64,
        offset: u64,
        graph: ArcGraph,
        binding_names: Vec<Variable>,
    },
    Join {
        left: Box<Operator>,
        right: Box<Operator>,
        binding_names: Vec<Variable>,
    },
    Union {
        left: Box<Operator>,
        right: Box<Operator>,
        binding_names: Vec<Variable>,
    },
    Project {
        inner: Box<Operator>,
        variables: Vec<Variable>,
    },
}

/// A thin `Eq`/`Debug`/`Clone` wrapper around `Arc<StorageTree>` so it can
/// sit inside a `#[derive(PartialEq)]` enum: every clone of the same graph
/// is equal, since only the operator *shape* matters for planner tests.
#[derive(Clone)]
pub struct ArcGraph(pub Arc<StorageTree>);

impl fmt::Debug for ArcGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph")
    }
}

impl Eq for ArcGraph {}
impl PartialEq for ArcGraph {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Operator {
    pub fn scan(graph: Arc<StorageTree>, pattern: Triple, limit: i64, offset: u64) -> Self {
        let mut names: Vec<Variable> = [&pattern.subject, &pattern.predicate, &pattern.object]
            .into_iter()
            .filter_map(|t| t.as_variable().cloned())
            .collect();
        names.sort();
        names.dedup();
        Operator::Scan {
            pattern,
            limit,
            offset,
            graph: ArcGraph(graph),
            binding_names: names,
        }
    }

    pub fn join(left: Operator, right: Operator) -> Self {
        let binding_names = union_sorted(left.binding_names(), right.binding_names());
        Operator::Join {
            left: Box::new(left),
            right: Box::new(right),
            binding_names,
        }
    }

    pub fn union(left: Operator, right: Operator) -> Self {
        let binding_names = union_sorted(left.binding_names(), right.binding_names());
        Operator::Union {
            left: Box::new(left),
            right: Box::new(right),
            binding_names,
        }
    }

    pub fn project(inner: Operator, variables: Vec<Variable>) -> Self {
        Operator::Project { inner: Box::new(inner), variables }
    }

    /// The sorted, deduplicated list of variable names this node's output
    /// groups may carry.
    pub fn binding_names(&self) -> &[Variable] {
        match self {
            Operator::Scan { binding_names, .. }
            | Operator::Join { binding_names, .. }
            | Operator::Union { binding_names, .. } => binding_names,
            Operator::Project { variables, .. } => variables,
        }
    }

    /// Drives this node as the root of a query, returning a lazily-produced
    /// stream of complete bindings groups.
    pub fn execute(&self) -> BindingsReceiver {
        self.execute_with(BindingsGroup::new())
    }

    /// Drives this node given an upstream group: pattern variables bound in
    /// `group` are substituted before scanning, and every emitted group is a
    /// clone of `group` extended with this node's own new bindings.
    pub fn execute_with(&self, group: BindingsGroup) -> BindingsReceiver {
        match self {
            Operator::Scan { pattern, limit, offset, graph, .. } => {
                scan_stream(Arc::clone(&graph.0), pattern.clone(), *limit, *offset, group)
            }
            Operator::Join { left, right, .. } => join_stream(left, right, group),
            Operator::Union { left, right, .. } => union_stream(left, right, group),
            Operator::Project { inner, variables } => project_stream(inner, variables.clone(), group),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Scan { pattern, .. } => write!(f, "Scan({pattern})"),
            Operator::Join { left, right, .. } => write!(f, "Join({left}, {right})"),
            Operator::Union { left, right, .. } => write!(f, "Union({left}, {right})"),
            Operator::Project { inner, variables } => {
                write!(f, "Project([")?;
                for (i, v) in variables.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "], {inner})")
            }
        }
    }
}

fn union_sorted(a: &[Variable], b: &[Variable]) -> Vec<Variable> {
    let mut out: Vec<Variable> = a.iter().chain(b.iter()).cloned().collect();
    out.sort();
    out.dedup();
    out
}

fn scan_stream(
    graph: Arc<StorageTree>,
    pattern: Triple,
    limit: i64,
    offset: u64,
    group: BindingsGroup,
) -> BindingsReceiver {
    let (tx, rx) = mpsc::sync_channel(BUFFER_SIZE);
    thread::spawn(move || {
        let specific = complete_pattern(&pattern, &group);
        tracing::trace!(pattern = %specific, limit, offset, "scan");
        let rows = match graph.filter_subset(&specific, limit, offset) {
            Ok(rows) => rows,
            Err(e) => {
                let _ = tx.send(Err(e.into()));
                return;
            }
        };
        for row in rows {
            let mut out = group.clone();
            for (matched, original) in [
                (&row.subject, &pattern.subject),
                (&row.predicate, &pattern.predicate),
                (&row.object, &pattern.object),
            ] {
                if let Term::Variable(name) = original {
                    if !out.contains(name) {
                        out.insert(name.clone(), matched.clone());
                    }
                }
            }
            if tx.send(Ok(out)).is_err() {
                return;
            }
        }
    });
    rx
}

fn join_stream(left: &Operator, right: &Operator, group: BindingsGroup) -> BindingsReceiver {
    let (tx, rx) = mpsc::sync_channel(BUFFER_SIZE);
    let left = left.clone();
    let right = right.clone();
    thread::spawn(move || {
        let outer = left.execute_with(group);
        // Set by a page task once its send to `tx` fails (the root receiver was
        // dropped). Checked here so the outer stream stops being drained and no
        // further pages are scheduled once nobody downstream wants them.
        let disconnected = Arc::new(AtomicBool::new(false));
        rayon::scope(|scope| {
            let mut page = Vec::with_capacity(PAGE_SIZE);
            for item in outer {
                if disconnected.load(Ordering::Relaxed) {
                    break;
                }
                match item {
                    Ok(g) => {
                        page.push(g);
                        if page.len() == PAGE_SIZE {
                            spawn_page(scope, &right, std::mem::take(&mut page), tx.clone(), Arc::clone(&disconnected));
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return;
                    }
                }
            }
            if !disconnected.load(Ordering::Relaxed) && !page.is_empty() {
                spawn_page(scope, &right, page, tx.clone(), Arc::clone(&disconnected));
            }
        });
    });
    rx
}

fn spawn_page<'scope>(
    scope: &rayon::Scope<'scope>,
    inner: &Operator,
    page: Vec<BindingsGroup>,
    tx: BindingsSender,
    disconnected: Arc<AtomicBool>,
) where
    Operator: 'scope,
{
    let inner = inner.clone();
    scope.spawn(move |_| {
        for group in page {
            for item in inner.execute_with(group) {
                if tx.send(item).is_err() {
                    disconnected.store(true, Ordering::Relaxed);
                    return;
                }
            }
        }
    });
}

fn union_stream(left: &Operator, right: &Operator, group: BindingsGroup) -> BindingsReceiver {
    let (tx, rx) = mpsc::sync_channel(BUFFER_SIZE);
    let left = left.clone();
    let right = right.clone();
    thread::spawn(move || {
        rayon::scope(|scope| {
            let tx_left = tx.clone();
            let left_group = group.clone();
            scope.spawn(move |_| {
                for item in left.execute_with(left_group) {
                    if tx_left.send(item).is_err() {
                        return;
                    }
                }
            });
            let tx_right = tx.clone();
            scope.spawn(move |_| {
                for item in right.execute_with(group) {
                    if tx_right.send(item).is_err() {
                        return;
                    }
                }
            });
        });
    });
    rx
}

fn project_stream(inner: &Operator, variables: Vec<Variable>, group: BindingsGroup) -> BindingsReceiver {
    let (tx, rx) = mpsc::sync_channel(BUFFER_SIZE);
    let inner = inner.clone();
    thread::spawn(move || {
        for item in inner.execute_with(group) {
            let projected = item.map(|g| g.restricted_to(&variables));
            if tx.send(projected).is_err() {
                return;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, NamedNode};

    fn iri(s: &str) -> Term {
        Term::NamedNode(NamedNode::new(s).unwrap())
    }

    fn lit(s: &str) -> Term {
        Term::Literal(Literal::new_simple_literal(s))
    }

    fn var(s: &str) -> Term {
        Term::Variable(Variable::new(s).unwrap())
    }

    fn graph_with(triples: &[(Term, Term, Term)]) -> Arc<StorageTree> {
        let graph = Arc::new(StorageTree::new());
        for (s, p, o) in triples {
            graph.add(&Triple::new(s.clone(), p.clone(), o.clone()));
        }
        graph
    }

    #[test]
    fn scan_emits_one_group_per_match() {
        let graph = graph_with(&[(iri("http://ex/s1"), iri("http://ex/p1"), lit("o1"))]);
        let pattern = Triple::new(var("x"), iri("http://ex/p1"), var("y"));
        let node = Operator::scan(graph, pattern, -1, 0);
        let groups: Vec<_> = node.execute().into_iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].get(&Variable::new("x").unwrap()), Some(&iri("http://ex/s1")));
        assert_eq!(groups[0].get(&Variable::new("y").unwrap()), Some(&lit("o1")));
    }

    #[test]
    fn join_cardinality_and_commutativity() {
        let graph = Arc::new(StorageTree::new());
        for i in 0..200 {
            let s = iri(&format!("http://ex/item{i}"));
            graph.add(&Triple::new(s.clone(), iri("http://ex/price"), lit(&i.to_string())));
            graph.add(&Triple::new(s, iri("http://ex/eligibleQuantity"), lit("1")));
        }
        let graph = graph;
        let price = Operator::scan(
            Arc::clone(&graph),
            Triple::new(var("s"), iri("http://ex/price"), var("p")),
            -1,
            0,
        );
        let qty = Operator::scan(
            graph,
            Triple::new(var("s"), iri("http://ex/eligibleQuantity"), var("q")),
            -1,
            0,
        );
        let forward = Operator::join(price.clone(), qty.clone());
        let backward = Operator::join(qty, price);
        let forward_count = forward.execute().into_iter().filter(Result::is_ok).count();
        let backward_count = backward.execute().into_iter().filter(Result::is_ok).count();
        assert_eq!(forward_count, 200);
        assert_eq!(backward_count, 200);
    }

    #[test]
    fn union_yields_multiset_sum() {
        let graph = graph_with(&[
            (iri("http://ex/s1"), iri("http://ex/p1"), lit("o1")),
            (iri("http://ex/s2"), iri("http://ex/p2"), lit("o2")),
        ]);
        let a = Operator::scan(
            Arc::clone(&graph),
            Triple::new(var("x"), iri("http://ex/p1"), var("y")),
            -1,
            0,
        );
        let b = Operator::scan(graph, Triple::new(var("x"), iri("http://ex/p2"), var("y")), -1, 0);
        let node = Operator::union(a, b);
        let count = node.execute().into_iter().filter(Result::is_ok).count();
        assert_eq!(count, 2);
    }

    #[test]
    fn project_is_idempotent() {
        let graph = graph_with(&[(iri("http://ex/s1"), iri("http://ex/p1"), lit("o1"))]);
        let scan = Operator::scan(graph, Triple::new(var("x"), iri("http://ex/p1"), var("y")), -1, 0);
        let x = Variable::new("x").unwrap();
        let once = Operator::project(scan, vec![x.clone()]);
        let twice = Operator::project(once.clone(), vec![x]);
        let once_rows: Vec<_> = once.execute().into_iter().collect::<Result<_, _>>().unwrap();
        let twice_rows: Vec<_> = twice.execute().into_iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(once_rows, twice_rows);
    }
}
