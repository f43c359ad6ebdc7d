use std::fmt;

use super::*;
use crate::error::{OntologyError, Result};

/// An individual of the ontology, named by an IRI or a blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OntologyFact {
    value: RdfTerm,
}

impl OntologyFact {
    /// Build a fact; fails if `value` is a literal.
    pub fn new(value: RdfTerm) -> Result<Self> {
        ensure_resource(&value, "a fact")?;
        Ok(OntologyFact { value })
    }
}

impl OntologyResource for OntologyFact {
    fn value(&self) -> &RdfTerm {
        &self.value
    }
}

impl fmt::Display for OntologyFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// A literal value of the ontology.
///
/// Literals are never the subject of a relation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OntologyLiteral {
    value: RdfTerm,
}

impl OntologyLiteral {
    /// Build a literal; fails unless `value` is a literal.
    pub fn new(value: RdfTerm) -> Result<Self> {
        if !value.is_literal() {
            return Err(OntologyError::UnexpectedTermKind {
                term: value.to_string(),
                expected: "a literal",
            });
        }
        Ok(OntologyLiteral { value })
    }
}

impl OntologyResource for OntologyLiteral {
    fn value(&self) -> &RdfTerm {
        &self.value
    }

    fn is_blank(&self) -> bool {
        false
    }
}

impl fmt::Display for OntologyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
