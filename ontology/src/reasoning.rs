//! Stateless reasoning over ontology models.
//!
//! Every `enlist_*` function computes a transitive closure,
//! which never contains the entity it was asked about.
//! Subsumption and opposition (disjointness, inverse, difference)
//! are propagated through equivalence:
//! if `A ≡ B` and `B ⊑ C`, then `C` is a super-class of `A`.
//!
//! Disjointness is also inherited through subsumption:
//! if `A ⊥ B`, every sub-class of `A` is disjoint with every sub-class of `B`.
//!
//! All functions terminate on cyclic relations.
use std::collections::HashSet;

use sophia_api::ns::{rdf, rdfs, xsd};

use crate::entity::{OntologyClass, OntologyFact, OntologyProperty, OntologyResource};
use crate::term::RdfTerm;
use crate::{ClassModel, Data, PropertyModel};

mod _closure;
pub(crate) use _closure::*;
mod _members;
pub use _members::*;

fn owned(set: HashSet<&RdfTerm>) -> HashSet<RdfTerm> {
    set.into_iter().cloned().collect()
}

// classes

/// All the sub-classes of `class`.
pub fn enlist_sub_classes_of(class: &OntologyClass, model: &ClassModel) -> HashSet<RdfTerm> {
    log::trace!("enlisting sub-classes of {class}");
    owned(Hierarchy::of_classes(model.relations()).subs(class.value()))
}

/// All the super-classes of `class`.
pub fn enlist_super_classes_of(class: &OntologyClass, model: &ClassModel) -> HashSet<RdfTerm> {
    log::trace!("enlisting super-classes of {class}");
    owned(Hierarchy::of_classes(model.relations()).supers(class.value()))
}

/// All the classes equivalent to `class`.
pub fn enlist_equivalent_classes_of(class: &OntologyClass, model: &ClassModel) -> HashSet<RdfTerm> {
    log::trace!("enlisting equivalent classes of {class}");
    owned(Hierarchy::of_classes(model.relations()).equivalents(class.value()))
}

/// All the classes disjoint with `class`.
pub fn enlist_disjoint_classes_with(
    class: &OntologyClass,
    model: &ClassModel,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting classes disjoint with {class}");
    owned(Hierarchy::of_classes(model.relations()).disjoints(class.value()))
}

/// Whether `child` is a (possibly indirect) sub-class of `mother`.
pub fn is_sub_class_of(child: &OntologyClass, mother: &OntologyClass, model: &ClassModel) -> bool {
    Hierarchy::of_classes(model.relations())
        .supers(child.value())
        .contains(mother.value())
}

/// Whether `mother` is a (possibly indirect) super-class of `child`.
pub fn is_super_class_of(mother: &OntologyClass, child: &OntologyClass, model: &ClassModel) -> bool {
    is_sub_class_of(child, mother, model)
}

/// Whether `a` and `b` are equivalent classes.
pub fn is_equivalent_class_of(a: &OntologyClass, b: &OntologyClass, model: &ClassModel) -> bool {
    Hierarchy::of_classes(model.relations())
        .equivalents(a.value())
        .contains(b.value())
}

/// Whether `a` and `b` are disjoint classes.
pub fn is_disjoint_class_with(a: &OntologyClass, b: &OntologyClass, model: &ClassModel) -> bool {
    Hierarchy::of_classes(model.relations())
        .disjoints(a.value())
        .contains(b.value())
}

/// Whether the members of `class` are literals rather than facts,
/// i.e. whether `class` is a data range, a datatype (`rdfs:Literal` or an XSD datatype),
/// or a sub-class or equivalent of one of them.
pub fn is_literal_compatible_class(class: &OntologyClass, model: &ClassModel) -> bool {
    class.is_data_range() || is_literal_compatible(class.value(), model)
}

pub(crate) fn is_literal_compatible(class: &RdfTerm, model: &ClassModel) -> bool {
    let is_datatype = |c: &RdfTerm| {
        is_datatype_iri(c) || model.select_class(c).map_or(false, OntologyClass::is_data_range)
    };
    if is_datatype(class) {
        return true;
    }
    let h = Hierarchy::of_classes(model.relations());
    h.supers(class).into_iter().any(is_datatype) || h.equivalents(class).into_iter().any(is_datatype)
}

/// Whether `term` names a datatype
pub(crate) fn is_datatype_iri(term: &RdfTerm) -> bool {
    match term.as_iri() {
        Some(iri) => {
            iri.starts_with(xsd::PREFIX.as_str())
                || term == &RdfTerm::from(rdfs::Literal)
                || term == &RdfTerm::from(rdf::langString)
        }
        None => false,
    }
}

/// The classes that the subjects of `property` belong to:
/// its declared domain with its sub-classes and equivalent classes.
pub fn enlist_domain_classes_of(
    property: &OntologyProperty,
    model: &ClassModel,
) -> HashSet<RdfTerm> {
    property
        .domain()
        .map(|domain| with_subs_and_equivalents(domain, model))
        .unwrap_or_default()
}

/// The classes that the objects of `property` belong to:
/// its declared range with its sub-classes and equivalent classes.
pub fn enlist_range_classes_of(property: &OntologyProperty, model: &ClassModel) -> HashSet<RdfTerm> {
    property
        .range()
        .map(|range| with_subs_and_equivalents(range, model))
        .unwrap_or_default()
}

fn with_subs_and_equivalents(class: &OntologyClass, model: &ClassModel) -> HashSet<RdfTerm> {
    let h = Hierarchy::of_classes(model.relations());
    let mut result = h.subs(class.value());
    result.extend(h.equivalence_class(class.value()));
    owned(result)
}

// properties

/// All the sub-properties of `property`.
pub fn enlist_sub_properties_of(
    property: &OntologyProperty,
    model: &PropertyModel,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting sub-properties of {property}");
    owned(Hierarchy::of_properties(model.relations()).subs(property.value()))
}

/// All the super-properties of `property`.
pub fn enlist_super_properties_of(
    property: &OntologyProperty,
    model: &PropertyModel,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting super-properties of {property}");
    owned(Hierarchy::of_properties(model.relations()).supers(property.value()))
}

/// All the properties equivalent to `property`.
pub fn enlist_equivalent_properties_of(
    property: &OntologyProperty,
    model: &PropertyModel,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting equivalent properties of {property}");
    owned(Hierarchy::of_properties(model.relations()).equivalents(property.value()))
}

/// All the inverses of `property`, and their equivalent properties.
pub fn enlist_inverse_properties_of(
    property: &OntologyProperty,
    model: &PropertyModel,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting inverse properties of {property}");
    owned(Hierarchy::of_properties(model.relations()).partners(property.value()))
}

/// Whether `child` is a (possibly indirect) sub-property of `mother`.
pub fn is_sub_property_of(
    child: &OntologyProperty,
    mother: &OntologyProperty,
    model: &PropertyModel,
) -> bool {
    Hierarchy::of_properties(model.relations())
        .supers(child.value())
        .contains(mother.value())
}

/// Whether `mother` is a (possibly indirect) super-property of `child`.
pub fn is_super_property_of(
    mother: &OntologyProperty,
    child: &OntologyProperty,
    model: &PropertyModel,
) -> bool {
    is_sub_property_of(child, mother, model)
}

/// Whether `a` and `b` are equivalent properties.
pub fn is_equivalent_property_of(
    a: &OntologyProperty,
    b: &OntologyProperty,
    model: &PropertyModel,
) -> bool {
    Hierarchy::of_properties(model.relations())
        .equivalents(a.value())
        .contains(b.value())
}

/// Whether `a` is an inverse of `b`, or of one of its equivalent properties.
pub fn is_inverse_property_of(
    a: &OntologyProperty,
    b: &OntologyProperty,
    model: &PropertyModel,
) -> bool {
    Hierarchy::of_properties(model.relations())
        .partners(a.value())
        .contains(b.value())
}

// facts

/// All the facts that are the same individual as `fact`.
pub fn enlist_same_facts_as(fact: &OntologyFact, data: &Data) -> HashSet<RdfTerm> {
    log::trace!("enlisting facts same as {fact}");
    owned(Hierarchy::of_facts(data.relations()).equivalents(fact.value()))
}

/// All the facts different from `fact` or from one of its same facts.
pub fn enlist_different_facts_from(fact: &OntologyFact, data: &Data) -> HashSet<RdfTerm> {
    log::trace!("enlisting facts different from {fact}");
    owned(Hierarchy::of_facts(data.relations()).partners(fact.value()))
}

/// Whether `a` and `b` are the same individual.
pub fn is_same_fact_as(a: &OntologyFact, b: &OntologyFact, data: &Data) -> bool {
    Hierarchy::of_facts(data.relations())
        .equivalents(a.value())
        .contains(b.value())
}

/// Whether `a` and `b` are known to be different individuals.
pub fn is_different_fact_from(a: &OntologyFact, b: &OntologyFact, data: &Data) -> bool {
    Hierarchy::of_facts(data.relations())
        .partners(a.value())
        .contains(b.value())
}

/// All the facts reachable from `fact` through a chain of assertions of `property`,
/// as if `property` was transitive.
pub fn enlist_transitive_assertions_of(
    fact: &OntologyFact,
    property: &OntologyProperty,
    data: &Data,
) -> HashSet<RdfTerm> {
    log::trace!("enlisting transitive {property} assertions of {fact}");
    let assertions = data
        .relations()
        .assertions
        .select_entries_by_predicate(property.value());
    let index = Index::new(&assertions);
    let mut result = closure([fact.value()], |x| index.out(x).iter().copied());
    result.remove(fact.value());
    owned(result)
}
