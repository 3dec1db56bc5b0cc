//! An in-memory RDF triple store with a small, streaming SPARQL-style query
//! engine on top of it.
//!
//! The pieces, bottom to top:
//!
//! - [`model`] — the RDF term types ([`model::Term`], [`model::Triple`]) and
//!   their parsing/validation rules.
//! - [`dictionary`] — bidirectional term ⇄ integer id interning.
//! - [`store`] — [`store::StorageTree`], the reader-writer-locked index
//!   triples actually live in.
//! - [`algebra`] — the scan/join/union/project operator tree and the
//!   bindings groups it streams.
//! - [`planner`] — turns basic graph patterns into an operator tree.
//! - [`query`] — the `SELECT`/`ASK`/`CONSTRUCT` facades built on top of all
//!   of the above.
//!
//! ```
//! use trieql::model::{NamedNode, Term, Triple, Variable};
//! use trieql::store::StorageTree;
//! use trieql::query::select;
//! use std::sync::Arc;
//!
//! let graph = Arc::new(StorageTree::new());
//! let alice = Term::NamedNode(NamedNode::new("http://ex/alice").unwrap());
//! let name = Term::NamedNode(NamedNode::new("http://ex/name").unwrap());
//! graph.add(&Triple::new(alice, name.clone(), Term::from(trieql::model::Literal::new_simple_literal("Alice"))));
//!
//! let v = Variable::new("name").unwrap();
//! let results: Vec<_> = select([v.clone()])
//!     .from(Arc::clone(&graph))
//!     .where_bgp(vec![Triple::new(Term::Variable(Variable::new("s").unwrap()), name, Term::Variable(v))])
//!     .execute()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod algebra;
pub mod dictionary;
pub mod error;
pub mod model;
pub mod planner;
pub mod query;
pub mod store;

pub use crate::error::{QueryError, StoreError};
