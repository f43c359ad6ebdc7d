//! This crate is part of [Sophia],
//! an [RDF] and [Linked Data] toolkit in Rust.
//!
//! It provides an [OWL] ontology model,
//! split into a schema (the [`ClassModel`] and [`PropertyModel`] of an [`Ontology`])
//! and an assertion set ([`Data`]),
//! together with lightweight description-logic [`reasoning`].
//!
//! Mutations of the models are *consistency-gated*:
//! adding a relation that contradicts what is already known
//! (e.g. declaring two classes disjoint when one is a subclass of the other)
//! leaves the model unchanged, and is reported as [`Outcome::Rejected`]
//! (and logged as a warning through the [`log`] facade).
//!
//! # Example
//! ```
//! use sophia_ontology::prelude::*;
//! # fn main() -> Result<(), OntologyError> {
//! let animal = OntologyClass::new(RdfTerm::iri("http://example.org/Animal")?)?;
//! let dog = OntologyClass::new(RdfTerm::iri("http://example.org/Dog")?)?;
//!
//! let mut classes = ClassModel::new();
//! classes.add_class(animal.clone());
//! classes.add_class(dog.clone());
//! assert!(classes.add_sub_class_of_relation(&dog, &animal).is_applied());
//! assert!(classes.add_disjoint_with_relation(&dog, &animal).is_rejected());
//!
//! assert!(reasoning::is_sub_class_of(&dog, &animal, &classes));
//! # Ok(()) }
//! ```
//!
//! [Sophia]: https://docs.rs/sophia/latest/sophia/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [Linked Data]: http://linkeddata.org/
//! [OWL]: https://www.w3.org/TR/owl-ref/
#![deny(missing_docs)]

pub mod class_model;
pub mod data;
pub mod entity;
pub mod error;
pub mod metadata;
pub mod ns;
pub mod ontology;
pub mod outcome;
pub mod property_model;
pub mod reasoning;
pub mod taxonomy;
pub mod term;
pub mod validation;

pub use class_model::ClassModel;
pub use data::Data;
pub use entity::{
    ClassKind, Composite, ObjectFlags, OntologyClass, OntologyFact, OntologyLiteral,
    OntologyProperty, OntologyResource, PropertyKind, Restriction, RestrictionFacet,
};
pub use error::{OntologyError, Result};
pub use metadata::{
    AnnotatedModel, Annotations, ClassRelations, DataRelations, Metadata, PropertyRelations,
};
pub use ontology::{Ontology, OntologyModel};
pub use outcome::{Outcome, Rejection};
pub use property_model::PropertyModel;
pub use taxonomy::{OntologyGraph, Taxonomy, TaxonomyEntry};
pub use term::RdfTerm;

/// Re-exports of the types most commonly needed to build and query ontologies.
pub mod prelude {
    pub use crate::metadata::{AnnotatedModel, Metadata};
    pub use crate::reasoning;
    pub use crate::validation::Validator;
    pub use crate::{
        ClassModel, Data, Ontology, OntologyClass, OntologyError, OntologyFact, OntologyLiteral,
        OntologyProperty, OntologyResource, Outcome, PropertyModel, RdfTerm, Rejection,
        Taxonomy,
    };
}
