use crate::model::NamedNode;
use oxilangtag::{LanguageTag, LanguageTagParseError};
use std::fmt;
use std::fmt::Write;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// At most one of `datatype` and `language` is ever populated: a
/// language-tagged literal carries no explicit datatype IRI, and a plain or
/// typed literal carries no language tag.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Literal {
    value: String,
    kind: LiteralKind,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
enum LiteralKind {
    Plain,
    Typed(NamedNode),
    LanguageTagged(String),
}

impl Literal {
    /// Builds a plain literal with no datatype or language tag.
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LiteralKind::Plain,
        }
    }

    /// Builds a literal with an explicit datatype IRI.
    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self {
            value: value.into(),
            kind: LiteralKind::Typed(datatype),
        }
    }

    /// Builds a language-tagged literal. The tag is lower-cased per BCP47
    /// convention and validated.
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, LanguageTagParseError> {
        let mut language = language.into();
        language.make_ascii_lowercase();
        LanguageTag::parse(language.clone())?;
        Ok(Self {
            value: value.into(),
            kind: LiteralKind::LanguageTagged(language),
        })
    }

    /// Builds a language-tagged literal without validating the tag.
    #[inline]
    pub fn new_language_tagged_literal_unchecked(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            kind: LiteralKind::LanguageTagged(language.into()),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::LanguageTagged(lang) => Some(lang),
            _ => None,
        }
    }

    #[inline]
    pub fn datatype(&self) -> Option<&NamedNode> {
        match &self.kind {
            LiteralKind::Typed(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.value.chars() {
            match c {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')?;
        match &self.kind {
            LiteralKind::Plain => Ok(()),
            LiteralKind::Typed(dt) => write!(f, "^^{dt}"),
            LiteralKind::LanguageTagged(lang) => write!(f, "@{lang}"),
        }
    }
}
