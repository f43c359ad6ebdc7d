use std::collections::HashSet;

use sophia_api::graph::Graph;
use sophia_api::ns::xsd;
use sophia_api::source::TripleSource;
use sophia_inmem::graph::LightGraph;
use test_case::test_case;

use super::*;
use crate::entity::{ObjectFlags, OntologyClass, RestrictionFacet};
use crate::metadata::AnnotatedModel;
use crate::test::{class, datatype_property, ex, fact, init_logger, literal, object_property, typed};

fn annotation_property(suffix: &str) -> OntologyProperty {
    OntologyProperty::annotation(ex(suffix)).unwrap()
}

#[test]
fn literal_name_is_refused() {
    let err = Ontology::new(RdfTerm::plain_literal("zoo")).unwrap_err();
    assert!(matches!(err, OntologyError::InvalidOntologyName(_)));
    assert!(Ontology::new(RdfTerm::blank("zoo").unwrap()).is_ok());
}

#[test]
fn annotations_of_the_ontology() {
    init_logger();
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    assert!(zoo.add_version_info_annotation(&literal("1.0")).is_applied());
    assert!(zoo.add_version_info_annotation(&literal("1.0")).is_unchanged());
    assert!(zoo.add_comment_annotation(&literal("animals")).is_applied());
    assert!(zoo.add_label_annotation(&literal("Zoo")).is_applied());
    assert!(zoo.add_see_also_annotation(&ex("farm")).is_applied());
    assert!(zoo.add_is_defined_by_annotation(&ex("doc")).is_applied());
    assert!(zoo.add_prior_version_annotation(&ex("zoo0")).is_applied());
    assert!(zoo.add_backward_compatible_with_annotation(&ex("zoo0")).is_applied());
    assert!(zoo.add_incompatible_with_annotation(&ex("aquarium")).is_applied());
    assert!(zoo.add_imports_annotation(&ex("animals")).is_applied());
    assert_eq!(zoo.annotations().entries_count(), 9);
    assert!(zoo
        .annotations()
        .imports
        .contains(&ex("zoo"), &owl::imports.into(), &ex("animals")));

    assert!(zoo.remove_imports_annotation(&ex("animals")).is_applied());
    assert!(zoo.remove_imports_annotation(&ex("animals")).is_unchanged());
    assert!(zoo.remove_label_annotation(&literal("Zoo")).is_applied());
    assert_eq!(zoo.annotations().entries_count(), 7);
}

#[test_case(Ontology::add_prior_version_annotation; "prior version")]
#[test_case(Ontology::add_backward_compatible_with_annotation; "backward compatible")]
#[test_case(Ontology::add_incompatible_with_annotation; "incompatible")]
#[test_case(Ontology::add_imports_annotation; "imports")]
fn ontology_annotations_need_an_ontology(add: fn(&mut Ontology, &RdfTerm) -> Outcome) {
    init_logger();
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    let outcome = add(&mut zoo, &RdfTerm::plain_literal("zoo"));
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::KindMismatch { expected: "an ontology", .. })
    ));
    assert!(zoo.annotations().is_empty());
}

#[test]
fn custom_annotations_of_the_ontology() {
    init_logger();
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    let note = annotation_property("note");
    assert!(zoo.add_custom_annotation(&note, &ex("x")).is_applied());
    let label = OntologyProperty::annotation(rdfs::label.into()).unwrap();
    assert!(matches!(
        zoo.add_custom_annotation(&label, &ex("x")).rejection(),
        Some(Rejection::ReservedAnnotation(_))
    ));
    assert!(zoo
        .add_custom_annotation(&object_property("hasPet"), &ex("x"))
        .is_rejected());
    assert_eq!(zoo.annotations().custom_annotations.len(), 1);
    assert!(zoo.remove_custom_annotation(&note, &ex("x")).is_applied());
    assert!(zoo.annotations().is_empty());
}

#[test]
fn merge_keeps_the_name() {
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    zoo.model_mut()
        .class_model
        .add_sub_class_of_relation(&class("Dog"), &class("Animal"));
    let mut farm = Ontology::new(ex("farm")).unwrap();
    farm.model_mut()
        .class_model
        .add_sub_class_of_relation(&class("Cow"), &class("Animal"));
    farm.data_mut().add_fact(&fact("Daisy"));
    farm.add_label_annotation(&literal("Farm"));

    zoo.merge(&farm);
    assert_eq!(zoo.value(), &ex("zoo"));
    assert_eq!(zoo.model().class_model.classes_count(), 3);
    assert_eq!(zoo.data().facts_count(), 1);
    assert_eq!(zoo.annotations().label.len(), 1);
}

fn two_ontologies() -> (Ontology, Ontology) {
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    zoo.add_label_annotation(&literal("animals"));
    zoo.add_version_info_annotation(&literal("1"));
    zoo.model_mut()
        .class_model
        .add_sub_class_of_relation(&class("Dog"), &class("Animal"));
    zoo.data_mut().add_fact(&fact("Rex"));

    let mut farm = Ontology::new(ex("farm")).unwrap();
    farm.add_label_annotation(&literal("animals"));
    farm.model_mut()
        .class_model
        .add_sub_class_of_relation(&class("Dog"), &class("Animal"));
    farm.model_mut()
        .class_model
        .add_sub_class_of_relation(&class("Cow"), &class("Animal"));
    farm.data_mut().add_fact(&fact("Daisy"));
    (zoo, farm)
}

fn is_anonymous(ontology: &Ontology) -> bool {
    ontology
        .value()
        .as_iri()
        .map_or(false, |iri| iri.starts_with(ns::DEFAULT_NAMESPACE.as_str()))
}

#[test]
fn set_algebra_builds_anonymous_ontologies() {
    let (zoo, farm) = two_ontologies();

    let i = zoo.intersect_with(&farm);
    assert!(is_anonymous(&i));
    assert_eq!(i.model().class_model.classes_count(), 2);
    assert_eq!(i.data().facts_count(), 0);
    // labels are compared regardless of the name of the ontologies
    assert_eq!(i.annotations().label.len(), 1);
    assert!(i.annotations().version_info.is_empty());
    let label = i.annotations().label.iter().next().unwrap();
    assert_eq!(label.subject(), i.value());

    let u = zoo.union_with(&farm);
    assert!(is_anonymous(&u));
    assert_ne!(u.value(), i.value());
    assert_eq!(u.model().class_model.classes_count(), 3);
    assert_eq!(u.data().facts_count(), 2);
    assert_eq!(u.annotations().entries_count(), 2);

    let d = farm.difference_with(&zoo);
    assert_eq!(d.model().class_model.classes_count(), 1);
    assert!(d.model().class_model.select_class(&ex("Cow")).is_some());
    assert_eq!(d.model().class_model.relations().sub_class_of.len(), 1);
    assert!(d.annotations().is_empty());
}

#[test]
fn to_graph_declares_the_ontology() {
    let (zoo, _) = two_ontologies();
    let g = zoo.to_graph(false);
    assert!(g.contains(&[ex("zoo"), rdf::type_.into(), owl::Ontology.into()]));
    assert!(g.contains(&[ex("zoo"), rdfs::label.into(), RdfTerm::plain_literal("animals")]));
    assert!(g.contains(&[ex("Dog"), rdfs::subClassOf.into(), ex("Animal")]));
    assert!(g.contains(&[ex("Rex"), rdf::type_.into(), owl::NamedIndividual.into()]));
    // ontology, 2 annotations, 2 classes, 1 sub-class, 1 individual
    assert_eq!(g.len(), 7);
}

/// An ontology using most of the vocabulary
fn rich_ontology() -> Ontology {
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    zoo.add_version_info_annotation(&literal("2.0"));
    zoo.add_imports_annotation(&ex("animals"));
    zoo.add_prior_version_annotation(&ex("zoo1"));

    let note = annotation_property("note");
    let has_pet = object_property("hasPet")
        .with_domain(class("Person"))
        .with_range(class("Animal"));
    let owns = object_property("owns");
    let knows = object_property("knows").with_object_flags(ObjectFlags {
        symmetric: true,
        transitive: false,
        inverse_functional: false,
    });
    let name = datatype_property("name").with_functional(true);
    let age = datatype_property("age").with_deprecated(true);
    {
        let properties = &mut zoo.model_mut().property_model;
        for p in [&note, &has_pet, &owns, &knows, &name, &age] {
            properties.add_property(p.clone());
        }
        properties.add_sub_property_of_relation(&has_pet, &owns);
        properties.add_inverse_of_relation(&owns, &object_property("ownedBy"));
        properties.add_label_annotation(&name, &literal("name"));
    }

    let (person, animal, dog, cat) = (class("Person"), class("Animal"), class("Dog"), class("Cat"));
    let pets = OntologyClass::union(ex("Pet")).unwrap();
    let colors = OntologyClass::data_range(ex("Color")).unwrap();
    let sizes = OntologyClass::enumerate(ex("Size")).unwrap();
    let owners = OntologyClass::some_values_from(ex("Owner"), &has_pet, &animal).unwrap();
    let couples = OntologyClass::cardinality(ex("Couple"), &knows, 2, 2).unwrap();
    let crowds = OntologyClass::cardinality(ex("Crowd"), &knows, 3, 0).unwrap();
    let rexes = OntologyClass::has_value(ex("RexOwner"), &has_pet, &ex("Rex")).unwrap();
    let robots = OntologyClass::complement(ex("Robot"), &animal)
        .unwrap()
        .with_deprecated(true);
    {
        let classes = &mut zoo.model_mut().class_model;
        for c in [&person, &animal, &dog, &cat, &pets, &colors, &sizes] {
            classes.add_class(c.clone());
        }
        for c in [&owners, &couples, &crowds, &rexes, &robots] {
            classes.add_class(c.clone());
        }
        classes.add_sub_class_of_relation(&dog, &animal);
        classes.add_sub_class_of_relation(&cat, &animal);
        classes.add_disjoint_with_relation(&dog, &cat);
        classes.add_equivalent_class_relation(&person, &class("Human"));
        classes.add_union_of_relation(&pets, &dog);
        classes.add_union_of_relation(&pets, &cat);
        classes.add_one_of_literal_relation(&colors, &literal("red"));
        classes.add_one_of_literal_relation(&colors, &typed("0", xsd::integer));
        classes.add_one_of_relation(&sizes, &fact("Small"));
        classes.add_one_of_relation(&sizes, &fact("Large"));
        classes.add_comment_annotation(&dog, &literal("a dog"));
        classes.add_custom_annotation(&note, &animal, &ex("wikipedia"));
    }

    let (john, jane, rex) = (fact("John"), fact("Jane"), fact("Rex"));
    let data = zoo.data_mut();
    data.add_class_type_relation(&rex, &dog);
    data.add_class_type_relation(&john, &person);
    data.add_assertion_relation(&john, &has_pet, &rex);
    data.add_assertion_relation(&john, &knows, &jane);
    data.add_literal_assertion_relation(&rex, &name, &literal("Rex"));
    data.add_literal_assertion_relation(&rex, &age, &typed("3", xsd::integer));
    data.add_same_as_relation(&jane, &fact("Janet"));
    data.add_different_from_relation(&john, &jane);
    let label = OntologyLiteral::new(RdfTerm::lang_literal("Rex", "en").unwrap()).unwrap();
    data.add_label_annotation(&rex, &label);
    data.add_custom_annotation(&note, &john, &RdfTerm::plain_literal("the keeper"));
    zoo
}

#[test]
fn from_graph_round_trip() {
    init_logger();
    let zoo = rich_ontology();
    let g = zoo.to_graph(false);
    let copy = Ontology::from_graph(&g).unwrap();
    assert_eq!(copy.value(), &ex("zoo"));
    assert_eq!(copy.to_graph(false), g);
    assert_eq!(copy.to_graph(true), zoo.to_graph(true));

    let classes = &copy.model().class_model;
    assert_eq!(classes.classes_count(), zoo.model().class_model.classes_count());
    assert_eq!(classes.restrictions_count(), 4);
    assert_eq!(classes.deprecated_classes_count(), 1);
    let couples = classes.select_class(&ex("Couple")).unwrap();
    assert_eq!(
        couples.restriction_def().unwrap().facet(),
        &RestrictionFacet::Cardinality { min: 2, max: 2 }
    );
    let properties = &copy.model().property_model;
    assert_eq!(properties.functional_properties_count(), 1);
    let has_pet = properties.select_property(&ex("hasPet")).unwrap();
    assert_eq!(has_pet.range().map(|c| c.value()), Some(&ex("Animal")));
    assert!(properties.select_property(&ex("knows")).unwrap().is_symmetric());
    assert_eq!(copy.data().relations(), zoo.data().relations());
    assert_eq!(copy.data().annotations(), zoo.data().annotations());
}

#[test]
fn round_trip_declares_entities_introduced_by_relations_and_annotations() {
    init_logger();
    let mut zoo = Ontology::new(ex("zoo")).unwrap();
    let note = annotation_property("note");
    assert!(zoo
        .add_custom_annotation(&note, &RdfTerm::plain_literal("x"))
        .is_applied());

    let has_pet = object_property("hasPet");
    let (animal, plant, dog, fern) = (class("Animal"), class("Plant"), class("Dog"), class("Fern"));
    let owners = OntologyClass::some_values_from(ex("Owner"), &has_pet, &dog).unwrap();
    {
        let classes = &mut zoo.model_mut().class_model;
        assert!(classes.add_sub_class_of_relation(&owners, &class("Person")).is_applied());
        assert!(classes.add_disjoint_with_relation(&animal, &plant).is_applied());
        assert!(classes.add_sub_class_of_relation(&dog, &animal).is_applied());
        assert!(classes.add_sub_class_of_relation(&fern, &plant).is_applied());
        assert!(classes.add_sub_class_of_relation(&fern, &animal).is_rejected());
        assert!(classes.add_comment_annotation(&class("Cat"), &literal("c")).is_applied());
        assert!(classes.add_custom_annotation(&note, &dog, &ex("doc")).is_applied());
    }
    zoo.model_mut()
        .property_model
        .add_label_annotation(&datatype_property("name"), &literal("name"));
    zoo.data_mut()
        .add_see_also_annotation(&fact("rex"), &ex("rex_page"));
    assert_eq!(zoo.model().property_model.properties_count(), 1);

    let g = zoo.to_graph(false);
    assert!(g.contains(&[ex("hasPet"), rdf::type_.into(), owl::ObjectProperty.into()]));
    assert!(g.contains(&[ex("note"), rdf::type_.into(), owl::AnnotationProperty.into()]));
    let copy = Ontology::from_graph(&g).unwrap();
    assert_eq!(copy.to_graph(false), g);

    let classes = &copy.model().class_model;
    assert!(classes.select_class(&ex("Cat")).is_some());
    assert!(classes.select_class(&ex("Owner")).unwrap().is_restriction());
    let properties = &copy.model().property_model;
    assert!(properties.select_property(&ex("hasPet")).unwrap().is_object());
    assert!(properties.select_property(&ex("note")).unwrap().is_annotation());
    assert!(properties.select_property(&ex("name")).unwrap().is_datatype());
    assert!(copy.data().select_fact(&ex("rex")).is_some());
    assert_eq!(copy.annotations().custom_annotations.len(), 1);
    assert_eq!(classes.annotations().custom_annotations.len(), 1);
}

#[test]
fn difference_with_itself_is_empty() {
    let zoo = rich_ontology();
    let d = zoo.difference_with(&zoo);
    assert!(is_anonymous(&d));
    let (classes, properties) = (&d.model().class_model, &d.model().property_model);
    assert_eq!(classes.classes_count(), 0);
    assert!(classes.relations().is_empty());
    assert!(classes.annotations().is_empty());
    assert_eq!(properties.properties_count(), 0);
    assert!(properties.relations().is_empty());
    assert!(properties.annotations().is_empty());
    assert_eq!(d.data().facts_count(), 0);
    assert_eq!(d.data().literals_count(), 0);
    assert!(d.data().relations().is_empty());
    assert!(d.data().annotations().is_empty());
    assert!(d.annotations().is_empty());
    assert_eq!(d.to_graph(true).len(), 1);
}

#[test]
fn from_graph_accepts_any_graph_implementation() {
    let zoo = rich_ontology();
    let g = zoo.to_graph(false);
    let light: LightGraph = g.triples().collect_triples().unwrap();
    let copy = Ontology::from_graph(&light).unwrap();
    assert_eq!(copy.to_graph(false), g);
}

#[test]
fn from_graph_rejects_inconsistent_graphs() {
    init_logger();
    let mut g = OntologyGraph::new();
    g.insert([ex("zoo"), rdf::type_.into(), owl::Ontology.into()]);
    g.insert([ex("Dog"), rdfs::subClassOf.into(), ex("Animal")]);
    g.insert([ex("Dog"), owl::disjointWith.into(), ex("Animal")]);
    let err = Ontology::from_graph(&g).unwrap_err();
    assert!(matches!(err, OntologyError::MalformedGraph { .. }));
}

fn with_ontology(triples: impl IntoIterator<Item = [RdfTerm; 3]>) -> OntologyGraph {
    let mut g: OntologyGraph = triples.into_iter().collect();
    g.insert([ex("zoo"), rdf::type_.into(), owl::Ontology.into()]);
    g
}

fn collection(node: &str, first: RdfTerm, rest: RdfTerm) -> [[RdfTerm; 3]; 2] {
    let node = RdfTerm::blank(node).unwrap();
    [
        [node.clone(), rdf::first.into(), first],
        [node, rdf::rest.into(), rest],
    ]
}

#[test_case(OntologyGraph::new(); "no ontology")]
#[test_case(
    [
        [ex("zoo"), rdf::type_.into(), owl::Ontology.into()],
        [ex("farm"), rdf::type_.into(), owl::Ontology.into()],
    ].into_iter().collect();
    "two ontologies"
)]
#[test_case(
    with_ontology([
        [ex("Owner"), rdf::type_.into(), owl::Restriction.into()],
        [ex("Owner"), owl::someValuesFrom.into(), ex("Animal")],
    ]);
    "restriction without property"
)]
#[test_case(
    with_ontology([
        [ex("hasPet"), rdf::type_.into(), owl::ObjectProperty.into()],
        [ex("Owner"), rdf::type_.into(), owl::Restriction.into()],
        [ex("Owner"), owl::onProperty.into(), ex("hasPet")],
    ]);
    "restriction without facet"
)]
#[test_case(
    with_ontology([
        [ex("hasPet"), rdf::type_.into(), owl::ObjectProperty.into()],
        [ex("Owner"), rdf::type_.into(), owl::Restriction.into()],
        [ex("Owner"), owl::onProperty.into(), ex("hasPet")],
        [ex("Owner"), owl::minCardinality.into(), RdfTerm::plain_literal("many")],
    ]);
    "invalid cardinality"
)]
#[test_case(
    with_ontology(
        collection("l0", ex("Dog"), RdfTerm::blank("l1").unwrap())
            .into_iter()
            .chain([[ex("Pet"), rdf::type_.into(), owl::Class.into()]])
            .chain([[ex("Pet"), owl::unionOf.into(), RdfTerm::blank("l0").unwrap()]])
    );
    "broken collection"
)]
#[test_case(
    with_ontology(
        collection("l0", ex("Dog"), RdfTerm::blank("l0").unwrap())
            .into_iter()
            .chain([[ex("Pet"), rdf::type_.into(), owl::Class.into()]])
            .chain([[ex("Pet"), owl::unionOf.into(), RdfTerm::blank("l0").unwrap()]])
    );
    "cyclic collection"
)]
#[test_case(
    with_ontology(collection("l0", ex("Dog"), rdf::nil.into()));
    "dangling collection"
)]
#[test_case(
    with_ontology([[ex("Rex"), ex("hasPet"), ex("Tom")]]);
    "unknown predicate"
)]
#[test_case(
    with_ontology([[ex("Rex"), rdfs::label.into(), RdfTerm::plain_literal("Rex")]]);
    "annotation on an unknown subject"
)]
#[test_case(
    with_ontology([
        [ex("Rex"), rdf::type_.into(), owl::NamedIndividual.into()],
        [ex("Rex"), owl::imports.into(), ex("animals")],
    ]);
    "ontology annotation on a fact"
)]
#[test_case(
    with_ontology([
        [ex("name"), rdf::type_.into(), owl::DatatypeProperty.into()],
        [ex("Rex"), ex("name"), ex("Rex")],
    ]);
    "datatype property with a resource value"
)]
#[test_case(
    with_ontology([
        [ex("p"), rdf::type_.into(), owl::DatatypeProperty.into()],
        [ex("p"), rdf::type_.into(), owl::ObjectProperty.into()],
    ]);
    "property with two kinds"
)]
fn from_graph_fails_on_malformed_graphs(g: OntologyGraph) {
    init_logger();
    let err = Ontology::from_graph(&g).unwrap_err();
    assert!(matches!(err, OntologyError::MalformedGraph { .. }), "{err}");
}

#[test]
fn from_graph_fails_on_literal_subject() {
    let g: HashSet<[RdfTerm; 3]> = with_ontology([[
        RdfTerm::plain_literal("Rex"),
        rdfs::label.into(),
        RdfTerm::plain_literal("Rex"),
    ]]);
    let err = Ontology::from_graph(&g).unwrap_err();
    assert!(matches!(err, OntologyError::MalformedGraph { .. }));
}

#[test]
fn from_graph_reads_types_of_facts() {
    let g = with_ontology([
        [ex("Rex"), rdf::type_.into(), ex("Dog")],
        [ex("Rex"), rdf::type_.into(), owl::Thing.into()],
    ]);
    let zoo = Ontology::from_graph(&g).unwrap();
    assert_eq!(zoo.data().relations().class_type.len(), 2);
    assert!(zoo.data().select_fact(&ex("Rex")).is_some());
    let members = crate::reasoning::enlist_members_of(&class("Dog"), &zoo);
    assert_eq!(members, HashSet::from([ex("Rex")]));
}
