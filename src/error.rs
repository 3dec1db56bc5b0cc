use crate::model::Variable;

/// Errors that can surface from the core store and query engine.
///
/// `TypeMismatch` and `UnknownPrefix` are produced by parser collaborators
/// outside this crate's scope; they are kept here only as documentation of
/// the full taxonomy (see the crate-level error handling notes).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A tree traversal decoded an id that is absent from the dictionary.
    /// This indicates a consistency bug between the tree and the dictionary
    /// and aborts the running query.
    #[error("the store is inconsistent: id {0} has no matching dictionary entry")]
    InconsistentStore(i64),
    /// A query descriptor was executed with an incomplete triple pattern.
    #[error("triple pattern is missing its {0}")]
    MalformedPattern(&'static str),
}

/// Errors raised while a query stream is being consumed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A substitution was requested for a variable that never appears in the
    /// bindings produced by the plan.
    #[error("variable {0} is not produced by this query")]
    UnknownVariable(Variable),
}
