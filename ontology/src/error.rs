//! Errors raised by this crate.
//!
//! Note that rejected mutations are *not* errors:
//! they are reported as [`Outcome::Rejected`](crate::Outcome::Rejected).
use thiserror::Error;

/// Type alias for `Result` with default error [`OntologyError`].
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = OntologyError> = std::result::Result<T, E>;

/// This error is raised when a term or an entity can not be built,
/// or when a graph can not be interpreted as an ontology.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// The IRI of a term must be an absolute IRI reference.
    #[error("The given IRI '{0}' is not a valid absolute IRI")]
    InvalidIri(String),
    /// The language tags of literals must apply to [BCP47](https://tools.ietf.org/html/bcp47).
    #[error("The given language tag '{0}' is not valid according to BCP47")]
    InvalidLanguageTag(String),
    /// Blank node identifiers must not be empty.
    #[error("The blank node identifier '{0}' is not valid")]
    InvalidBlankNodeId(String),
    /// An entity was built on a term of the wrong kind
    /// (e.g. a class named by a literal).
    #[error("The term '{term}' can not be used as {expected}")]
    UnexpectedTermKind {
        /// The faulty term.
        term: String,
        /// What the term was expected to be.
        expected: &'static str,
    },
    /// The name of an ontology must be an IRI or a blank node.
    #[error("The term '{0}' can not be used as an ontology name")]
    InvalidOntologyName(String),
    /// A cardinality restriction must satisfy `min <= max` whenever `max` is set.
    #[error("Invalid cardinality restriction on '{restriction}': min {min} > max {max}")]
    InvalidCardinality {
        /// The restriction being built.
        restriction: String,
        /// The minimum cardinality.
        min: u32,
        /// The maximum cardinality.
        max: u32,
    },
    /// Raised when a graph contains a term that has no counterpart in an ontology
    /// (quoted triples and variables).
    #[error("The term '{0}' has an unsupported kind")]
    UnsupportedTerm(String),
    /// Raised when a graph can not be interpreted as an ontology.
    #[error("Malformed ontology graph around '{subject}': {reason}")]
    MalformedGraph {
        /// The node around which the problem was detected.
        subject: String,
        /// What is wrong.
        reason: String,
    },
    /// Raised when the underlying graph fails.
    #[error("Graph error: {0}")]
    Graph(String),
}

impl OntologyError {
    pub(crate) fn malformed(subject: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        OntologyError::MalformedGraph {
            subject: subject.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::convert::Infallible> for OntologyError {
    fn from(_: std::convert::Infallible) -> OntologyError {
        unreachable!()
    }
}
