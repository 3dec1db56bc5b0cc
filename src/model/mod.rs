//! The RDF term model: the sum type of terms plus the triple they compose.

mod blank_node;
mod literal;
mod named_node;
mod term;
mod triple;
mod variable;

pub use self::blank_node::{BlankNode, BlankNodeIdParseError};
pub use self::literal::Literal;
pub use self::named_node::{IriParseError, NamedNode};
pub use self::term::Term;
pub use self::triple::Triple;
pub use self::variable::{Variable, VariableNameParseError};
