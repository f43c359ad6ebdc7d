use test_case::test_case;

use super::*;
use crate::entity::ObjectFlags;
use crate::test::{datatype_property, ex, init_logger, literal, object_property};
use crate::OntologyClass;

fn annotation_property(suffix: &str) -> OntologyProperty {
    OntologyProperty::annotation(ex(suffix)).unwrap()
}

#[test]
fn add_property_is_idempotent() {
    let mut model = PropertyModel::new();
    assert!(model.add_property(object_property("hasPet")).is_applied());
    assert!(model.add_property(object_property("hasPet")).is_unchanged());
    assert_eq!(model.properties_count(), 1);
    assert!(model.select_property(&ex("hasPet")).is_some());
    assert!(model.select_property(&ex("hasOwner")).is_none());
}

#[test_case(rdf::type_.into(); "rdf type")]
#[test_case(rdfs::subPropertyOf.into(); "sub property of")]
#[test_case(owl::sameAs.into(); "same as")]
#[test_case(rdfs::label.into(); "reserved annotation")]
fn reserved_properties_are_rejected(iri: RdfTerm) {
    init_logger();
    let mut model = PropertyModel::new();
    let outcome = model.add_property(OntologyProperty::object(iri).unwrap());
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::ReservedProperty(_))
    ));
    assert_eq!(model.properties_count(), 0);
}

#[test]
fn counters() {
    let mut model = PropertyModel::new();
    model.add_property(object_property("hasPet").with_functional(true));
    model.add_property(datatype_property("age").with_functional(true));
    model.add_property(datatype_property("name").with_deprecated(true));
    model.add_property(annotation_property("note"));
    assert_eq!(model.properties_count(), 4);
    assert_eq!(model.object_properties_count(), 1);
    assert_eq!(model.datatype_properties_count(), 2);
    assert_eq!(model.annotation_properties_count(), 1);
    assert_eq!(model.functional_properties_count(), 2);
    assert_eq!(model.deprecated_properties_count(), 1);
}

#[test]
fn sub_property_gating() {
    init_logger();
    let mut model = PropertyModel::new();
    let (p, q, r) = (object_property("p"), object_property("q"), object_property("r"));
    assert!(model.add_sub_property_of_relation(&p, &q).is_applied());
    assert!(model.add_sub_property_of_relation(&q, &r).is_applied());
    assert!(model.add_sub_property_of_relation(&p, &q).is_unchanged());
    // p, q and r were registered by the relations
    assert_eq!(model.properties_count(), 3);

    let outcome = model.add_sub_property_of_relation(&r, &p);
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::Conflict { conflict: "subsumption", .. })
    ));
    assert!(model.add_equivalent_property_relation(&p, &r).is_rejected());
    assert_eq!(model.relations().sub_property_of.len(), 2);
    assert!(model.relations().equivalent_property.is_empty());
}

#[test]
fn equivalent_property_is_symmetric() {
    let mut model = PropertyModel::new();
    let (p, q) = (datatype_property("p"), datatype_property("q"));
    assert!(model.add_equivalent_property_relation(&p, &q).is_applied());
    assert!(model.add_equivalent_property_relation(&q, &p).is_unchanged());
    let eq = &model.relations().equivalent_property;
    assert_eq!(eq.len(), 2);
    assert_eq!(eq.inferences_count(), 1);

    let outcome = model.add_sub_property_of_relation(&q, &p);
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::Conflict { conflict: "equivalence", .. })
    ));

    assert!(model.remove_equivalent_property_relation(&q, &p).is_applied());
    assert!(model.relations().equivalent_property.is_empty());
}

#[test]
fn pair_checks() {
    init_logger();
    let mut model = PropertyModel::new();
    let p = object_property("p");
    let d = datatype_property("d");
    let a = annotation_property("a");
    assert!(matches!(
        model.add_sub_property_of_relation(&p, &p).rejection(),
        Some(Rejection::SelfRelation(..))
    ));
    assert!(matches!(
        model.add_sub_property_of_relation(&p, &d).rejection(),
        Some(Rejection::KindMismatch { .. })
    ));
    assert!(matches!(
        model.add_equivalent_property_relation(&a, &p).rejection(),
        Some(Rejection::KindMismatch { .. })
    ));
    assert!(model.relations().is_empty());
    assert_eq!(model.properties_count(), 0);
}

#[test]
fn inverse_of_requires_object_properties() {
    init_logger();
    let mut model = PropertyModel::new();
    let (owns, owned_by) = (object_property("owns"), object_property("ownedBy"));
    let (d1, d2) = (datatype_property("d1"), datatype_property("d2"));
    assert!(model.add_inverse_of_relation(&owns, &owned_by).is_applied());
    assert!(model.add_inverse_of_relation(&owned_by, &owns).is_unchanged());
    assert!(model.add_inverse_of_relation(&d1, &d2).is_rejected());
    assert_eq!(model.relations().inverse_of.len(), 2);

    assert!(model.remove_inverse_of_relation(&owns, &owned_by).is_applied());
    assert!(model.relations().inverse_of.is_empty());
}

#[test]
fn remove_property_purges_relations() {
    let mut model = PropertyModel::new();
    let (p, q) = (object_property("p"), object_property("q"));
    model.add_sub_property_of_relation(&p, &q);
    model.add_comment_annotation(&p, &crate::test::literal("a property"));
    assert!(model.remove_property(&ex("p")).is_applied());
    assert!(model.remove_property(&ex("p")).is_unchanged());
    assert!(model.relations().is_empty());
    assert!(model.annotations().is_empty());
}

#[test]
fn annotation_properties_can_not_be_annotated() {
    init_logger();
    let mut model = PropertyModel::new();
    let note = annotation_property("note");
    let outcome = model.add_label_annotation(&note, &crate::test::literal("note"));
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::AnnotationPropertyTarget(_))
    ));
    let p = object_property("p");
    assert!(model.add_custom_annotation(&note, &p, &ex("x")).is_applied());
    assert_eq!(model.annotations().custom_annotations.len(), 1);
}

#[test]
fn set_algebra() {
    let (p, q, r) = (object_property("p"), object_property("q"), object_property("r"));
    let mut m1 = PropertyModel::new();
    m1.add_sub_property_of_relation(&p, &q);
    let mut m2 = PropertyModel::new();
    m2.add_sub_property_of_relation(&p, &q);
    m2.add_sub_property_of_relation(&q, &r);

    let i = m1.intersect_with(&m2);
    assert_eq!(i.properties_count(), 2);
    assert_eq!(i.relations().sub_property_of.len(), 1);
    let u = m1.union_with(&m2);
    assert_eq!(u.properties_count(), 3);
    assert_eq!(u.relations().sub_property_of.len(), 2);
    let d = m2.difference_with(&m1);
    assert_eq!(d.properties_count(), 1);
    assert!(d.select_property(&ex("r")).is_some());
    assert_eq!(d.relations().sub_property_of.len(), 1);
}

#[test]
fn to_graph_exports_declarations() {
    let mut model = PropertyModel::new();
    let flags = ObjectFlags {
        symmetric: true,
        transitive: true,
        inverse_functional: false,
    };
    let knows = object_property("knows")
        .with_object_flags(flags)
        .with_domain(OntologyClass::new(ex("Person")).unwrap())
        .with_range(OntologyClass::new(ex("Person")).unwrap());
    model.add_property(knows);
    model.add_property(datatype_property("age").with_functional(true));
    model.add_property(annotation_property("note").with_deprecated(true));

    let g = model.to_graph(false);
    let has = |s: &str, p: RdfTerm, o: RdfTerm| g.contains(&[ex(s), p, o]);
    assert!(has("knows", rdf::type_.into(), owl::ObjectProperty.into()));
    assert!(has("knows", rdf::type_.into(), owl::SymmetricProperty.into()));
    assert!(has("knows", rdf::type_.into(), owl::TransitiveProperty.into()));
    assert!(!has("knows", rdf::type_.into(), owl::InverseFunctionalProperty.into()));
    assert!(has("knows", rdfs::domain.into(), ex("Person")));
    assert!(has("knows", rdfs::range.into(), ex("Person")));
    assert!(has("age", rdf::type_.into(), owl::DatatypeProperty.into()));
    assert!(has("age", rdf::type_.into(), owl::FunctionalProperty.into()));
    assert!(has("note", rdf::type_.into(), owl::AnnotationProperty.into()));
    assert!(has("note", rdf::type_.into(), owl::DeprecatedProperty.into()));
    assert_eq!(g.len(), 9);
}

#[test]
fn to_graph_skips_inferences_on_demand() {
    let mut model = PropertyModel::new();
    model.add_inverse_of_relation(&object_property("owns"), &object_property("ownedBy"));
    let with = model.to_graph(true);
    let without = model.to_graph(false);
    assert_eq!(with.len(), without.len() + 1);
    assert!(without.contains(&[ex("owns"), owl::inverseOf.into(), ex("ownedBy")]));
}

#[test]
fn annotating_declares_the_property() {
    init_logger();
    let mut model = PropertyModel::new();
    let knows = object_property("knows");
    assert!(model.add_label_annotation(&knows, &literal("knows")).is_applied());
    assert!(model.select_property(&ex("knows")).is_some());

    let type_ = OntologyProperty::object(rdf::type_.into()).unwrap();
    let outcome = model.add_label_annotation(&type_, &literal("type"));
    assert!(matches!(outcome.rejection(), Some(Rejection::ReservedProperty(_))));
    assert_eq!(model.properties_count(), 1);
}

#[test]
fn difference_with_itself_is_empty() {
    let mut model = PropertyModel::new();
    let (has_pet, has_dog, owns) = (
        object_property("hasPet"),
        object_property("hasDog"),
        object_property("owns"),
    );
    model.add_sub_property_of_relation(&has_dog, &has_pet);
    model.add_equivalent_property_relation(&has_pet, &owns);
    model.add_inverse_of_relation(&has_pet, &object_property("isPetOf"));
    model.add_property(datatype_property("name"));
    model.add_comment_annotation(&has_pet, &literal("pets"));

    let d = model.difference_with(&model);
    assert_eq!(d.properties_count(), 0);
    assert!(d.relations().is_empty());
    assert!(d.annotations().is_empty());
    assert!(d.to_graph(true).is_empty());
}
