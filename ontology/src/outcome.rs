//! Result of the mutations of ontology models.
//!
//! Mutations never fail:
//! a mutation that would make a model inconsistent is simply not applied,
//! and reported as [`Outcome::Rejected`] with the corresponding [`Rejection`].
//! Every rejection is also logged as a warning through the [`log`] facade,
//! so that bulk loaders can ignore outcomes and still be notified.
use thiserror::Error;

/// The outcome of a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The model has been modified.
    Applied,
    /// The mutation was valid, but the model already had the expected state.
    Unchanged,
    /// The mutation was refused, the model is unchanged.
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the model has been modified
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Whether the model already had the expected state
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Outcome::Unchanged)
    }

    /// Whether the mutation was refused
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The reason of the rejection, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }

    /// Build a rejected outcome, and log it.
    pub(crate) fn reject(rejection: Rejection) -> Self {
        log::warn!("{rejection}");
        Outcome::Rejected(rejection)
    }

    /// [`Applied`](Outcome::Applied) if `changed`, [`Unchanged`](Outcome::Unchanged) otherwise.
    pub(crate) fn changed(changed: bool) -> Self {
        if changed {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }
}

/// Why a mutation was refused.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    /// The relation would relate an entity to itself.
    #[error("'{0}' can not be related to itself by {1}")]
    SelfRelation(String, &'static str),
    /// The relation contradicts what is already known about the two entities.
    #[error("'{subject}' {relation} '{object}' conflicts with known {conflict} relations")]
    Conflict {
        /// The subject of the refused relation.
        subject: String,
        /// The refused relation.
        relation: &'static str,
        /// The object of the refused relation.
        object: String,
        /// The kind of knowledge contradicted by the relation.
        conflict: &'static str,
    },
    /// The property belongs to the vocabulary used to describe ontologies.
    #[error("'{0}' is reserved and can not be declared as a property")]
    ReservedProperty(String),
    /// Annotation properties can not be annotated.
    #[error("annotation property '{0}' can not be the target of an annotation")]
    AnnotationPropertyTarget(String),
    /// Reserved annotations have dedicated methods.
    #[error("'{0}' is a reserved annotation and can not be used as a custom annotation")]
    ReservedAnnotation(String),
    /// An entity does not have the kind required by the relation.
    #[error("'{term}' is not {expected}")]
    KindMismatch {
        /// The faulty entity.
        term: String,
        /// The required kind.
        expected: &'static str,
    },
    /// Only simple classes can be the explicit type of a fact.
    #[error("'{0}' is not a simple class, and can not be the type of a fact")]
    NonAtomicClassType(String),
}

impl Rejection {
    pub(crate) fn conflict(
        subject: &impl std::fmt::Display,
        relation: &'static str,
        object: &impl std::fmt::Display,
        conflict: &'static str,
    ) -> Self {
        Rejection::Conflict {
            subject: subject.to_string(),
            relation,
            object: object.to_string(),
            conflict,
        }
    }

    pub(crate) fn kind_mismatch(term: &impl std::fmt::Display, expected: &'static str) -> Self {
        Rejection::KindMismatch {
            term: term.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Outcome::Applied.is_applied());
        assert!(Outcome::Unchanged.is_unchanged());
        let o = Outcome::reject(Rejection::SelfRelation("a".into(), "owl:sameAs"));
        assert!(o.is_rejected());
        assert_eq!(
            o.rejection().unwrap().to_string(),
            "'a' can not be related to itself by owl:sameAs"
        );
        assert_eq!(Outcome::changed(false), Outcome::Unchanged);
    }
}
