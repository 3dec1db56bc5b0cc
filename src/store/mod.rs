//! Indexed triple storage: the encoded (id-level) pattern type and the
//! reader-writer-locked prefix tree it is matched against.

mod encoded;
mod tree;

pub use self::encoded::{EncodedTriple, WILDCARD};
pub use self::tree::StorageTree;
