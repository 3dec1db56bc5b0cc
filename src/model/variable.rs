use std::fmt;

/// A SPARQL query variable. Variables only appear in patterns and bindings,
/// never in stored triples.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Creates a variable from a name. The name must be non-empty and must
    /// not contain whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, VariableNameParseError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(VariableNameParseError);
        }
        Ok(Self { name })
    }

    /// Creates a variable from a name without validation.
    #[inline]
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.name
    }
}

impl fmt::Display for Variable {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// An error raised during [`Variable`] name validation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct VariableNameParseError;

impl fmt::Display for VariableNameParseError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the variable name is invalid")
    }
}

impl std::error::Error for VariableNameParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_form() {
        assert_eq!(Variable::new("x").unwrap().to_string(), "?x");
    }

    #[test]
    fn rejects_whitespace() {
        assert!(Variable::new("a b").is_err());
    }
}
