//! Vocabulary used to describe ontologies.
//!
//! The `rdf:`, `rdfs:` and `xsd:` namespaces are re-exported from [`sophia_api::ns`];
//! the [`owl`] namespace is defined here,
//! because this crate needs a larger part of it than `sophia_api` provides.
use std::collections::HashSet;

use sophia_api::ns::Namespace;
pub use sophia_api::ns::{rdf, rdfs, xsd};

use crate::term::RdfTerm;

/// The standard `owl:` namespace (OWL 1, plus `owl:NamedIndividual`).
pub mod owl {
    use sophia_api::namespace;

    namespace!(
        "http://www.w3.org/2002/07/owl#",
        // ontology
        Ontology,
        imports,
        versionInfo,
        priorVersion,
        backwardCompatibleWith,
        incompatibleWith,
        // classes
        Thing,
        Nothing,
        Class,
        DeprecatedClass,
        Restriction,
        DataRange,
        onProperty,
        allValuesFrom,
        someValuesFrom,
        hasValue,
        cardinality,
        minCardinality,
        maxCardinality,
        oneOf,
        unionOf,
        intersectionOf,
        complementOf,
        equivalentClass,
        disjointWith,
        // properties
        ObjectProperty,
        DatatypeProperty,
        AnnotationProperty,
        FunctionalProperty,
        InverseFunctionalProperty,
        SymmetricProperty,
        TransitiveProperty,
        DeprecatedProperty,
        equivalentProperty,
        inverseOf,
        // individuals
        NamedIndividual,
        sameAs,
        differentFrom
    );
}

/// The namespace in which anonymous ontologies
/// (resulting from set operations between ontologies) are named.
pub const DEFAULT_NAMESPACE: Namespace<&str> =
    Namespace::new_unchecked_const("https://w3id.org/sophia/ontology/default#");

lazy_static::lazy_static! {
    /// IRIs of the annotation predicates with a dedicated meaning,
    /// which can not be used as custom annotations.
    pub static ref RESERVED_ANNOTATIONS: HashSet<String> = [
        owl::versionInfo,
        rdfs::comment,
        rdfs::label,
        rdfs::seeAlso,
        rdfs::isDefinedBy,
        owl::priorVersion,
        owl::backwardCompatibleWith,
        owl::incompatibleWith,
        owl::imports,
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();

    /// IRIs of the vocabulary that can not be declared as ontology properties.
    pub static ref RESERVED_PROPERTIES: HashSet<String> = [
        rdf::type_,
        rdfs::subClassOf,
        rdfs::subPropertyOf,
        owl::sameAs,
        owl::differentFrom,
        owl::equivalentClass,
        owl::equivalentProperty,
        owl::disjointWith,
        owl::unionOf,
        owl::intersectionOf,
        owl::complementOf,
        owl::inverseOf,
        owl::oneOf,
    ]
    .iter()
    .map(|t| t.to_string())
    .chain(RESERVED_ANNOTATIONS.iter().cloned())
    .collect();
}

/// Whether `term` is one of the reserved annotation predicates.
pub fn is_reserved_annotation(term: &RdfTerm) -> bool {
    term.as_iri()
        .map_or(false, |iri| RESERVED_ANNOTATIONS.contains(iri))
}

/// Whether `term` belongs to the reserved vocabulary of properties.
pub fn is_reserved_property(term: &RdfTerm) -> bool {
    term.as_iri()
        .map_or(false, |iri| RESERVED_PROPERTIES.contains(iri))
}

/// Build a fresh IRI in the [`DEFAULT_NAMESPACE`].
pub(crate) fn fresh_default_name() -> RdfTerm {
    RdfTerm::iri_unchecked(format!(
        "{}{}",
        DEFAULT_NAMESPACE.as_str(),
        crate::term::fresh_id()
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserved_vocabularies() {
        assert_eq!(RESERVED_ANNOTATIONS.len(), 9);
        assert_eq!(RESERVED_PROPERTIES.len(), 22);
        assert!(is_reserved_property(&rdf::type_.into()));
        assert!(is_reserved_property(&rdfs::label.into()));
        assert!(is_reserved_annotation(&owl::imports.into()));
        assert!(!is_reserved_annotation(&owl::sameAs.into()));
        assert!(!is_reserved_property(&RdfTerm::plain_literal(
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        )));
    }

    #[test]
    fn fresh_default_names() {
        let n1 = fresh_default_name();
        let n2 = fresh_default_name();
        assert_ne!(n1, n2);
        assert!(n1
            .as_iri()
            .unwrap()
            .starts_with("https://w3id.org/sophia/ontology/default#"));
    }
}
