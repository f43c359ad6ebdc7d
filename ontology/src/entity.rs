//! I define the entities of an ontology:
//! [classes](OntologyClass), [properties](OntologyProperty),
//! [facts](OntologyFact) and [literals](OntologyLiteral).
//!
//! All of them implement [`OntologyResource`],
//! which gives access to the [`RdfTerm`] identifying them.
use crate::term::RdfTerm;

mod _class;
pub use _class::*;
mod _fact;
pub use _fact::*;
mod _property;
pub use _property::*;

/// Common behaviour of ontology entities:
/// each of them is identified by an [`RdfTerm`].
///
/// Two entities of the same type with the same [`value`](OntologyResource::value)
/// are considered to be the same entity by the models of this crate.
pub trait OntologyResource {
    /// The term identifying this entity.
    fn value(&self) -> &RdfTerm;

    /// A 64-bit hash of the canonical form of [`value`](OntologyResource::value),
    /// as computed by [`RdfTerm::pattern_member_id`].
    fn pattern_member_id(&self) -> u64 {
        self.value().pattern_member_id()
    }

    /// Whether this entity is anonymous (identified by a blank node).
    fn is_blank(&self) -> bool {
        self.value().is_blank_node()
    }
}

impl OntologyResource for RdfTerm {
    fn value(&self) -> &RdfTerm {
        self
    }
}

/// Check that `term` is a resource (IRI or blank node)
pub(crate) fn ensure_resource(term: &RdfTerm, expected: &'static str) -> crate::Result<()> {
    if term.is_resource() {
        Ok(())
    } else {
        Err(crate::OntologyError::UnexpectedTermKind {
            term: term.to_string(),
            expected,
        })
    }
}

#[cfg(test)]
mod test;
