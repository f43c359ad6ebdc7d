use std::collections::HashSet;

use super::*;
use crate::reasoning;
use crate::test::{class, datatype_property, ex, fact, init_logger, literal, object_property};

#[test]
fn add_fact_and_literal_are_idempotent() {
    let mut data = Data::new();
    assert!(data.add_fact(&fact("John")).is_applied());
    assert!(data.add_fact(&fact("John")).is_unchanged());
    assert!(data.add_literal(&literal("john")).is_applied());
    assert!(data.add_literal(&literal("john")).is_unchanged());
    assert_eq!(data.facts_count(), 1);
    assert_eq!(data.literals_count(), 1);
    assert!(data.select_fact(&ex("John")).is_some());
    assert!(data.select_literal(&RdfTerm::plain_literal("john")).is_some());
    assert!(data.select_literal(&RdfTerm::plain_literal("jane")).is_none());
}

#[test]
fn scenario_same_then_different() {
    init_logger();
    let mut data = Data::new();
    let (john, jane) = (fact("John"), fact("Jane"));
    data.add_fact(&john);
    data.add_fact(&jane);
    assert!(data.add_same_as_relation(&john, &jane).is_applied());
    assert_eq!(
        reasoning::enlist_same_facts_as(&john, &data),
        HashSet::from([ex("Jane")])
    );

    let outcome = data.add_different_from_relation(&john, &jane);
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::Conflict { conflict: "owl:sameAs", .. })
    ));
    assert!(data.relations().different_from.is_empty());
}

#[test]
fn same_and_different_are_checked_on_closures() {
    init_logger();
    let mut data = Data::new();
    let (a, b, c, d) = (fact("a"), fact("b"), fact("c"), fact("d"));
    data.add_same_as_relation(&a, &b);
    data.add_same_as_relation(&b, &c);
    assert!(data.add_different_from_relation(&a, &c).is_rejected());
    assert!(data.add_different_from_relation(&c, &d).is_applied());
    assert!(data.add_different_from_relation(&d, &c).is_unchanged());
    // d is different from c, hence from a
    assert!(data.add_same_as_relation(&d, &a).is_rejected());
    assert!(data.add_same_as_relation(&a, &a).is_rejected());
    assert_eq!(data.relations().same_as.len(), 4);
    assert_eq!(data.relations().different_from.len(), 2);
    assert_eq!(data.facts_count(), 4);
}

#[test]
fn removing_same_as_lifts_the_gate() {
    let mut data = Data::new();
    let (john, jane) = (fact("John"), fact("Jane"));
    data.add_same_as_relation(&john, &jane);
    assert!(data.remove_same_as_relation(&jane, &john).is_applied());
    assert!(data.relations().same_as.is_empty());
    assert!(data.add_different_from_relation(&john, &jane).is_applied());
    assert!(data.remove_different_from_relation(&john, &jane).is_applied());
    assert!(data.relations().is_empty());
}

#[test]
fn class_type_requires_simple_class() {
    init_logger();
    let mut data = Data::new();
    let rex = fact("Rex");
    assert!(data.add_class_type_relation(&rex, &class("Dog")).is_applied());
    assert!(data.add_class_type_relation(&rex, &class("Dog")).is_unchanged());
    let pets = OntologyClass::enumerate(ex("Pets")).unwrap();
    assert!(matches!(
        data.add_class_type_relation(&rex, &pets).rejection(),
        Some(Rejection::NonAtomicClassType(_))
    ));
    assert_eq!(data.relations().class_type.len(), 1);
    assert_eq!(data.facts_count(), 1);
    assert!(data.remove_class_type_relation(&rex, &class("Dog")).is_applied());
    assert!(data.relations().class_type.is_empty());
}

#[test]
fn assertions_check_property_kinds() {
    init_logger();
    let mut data = Data::new();
    let (john, rex) = (fact("John"), fact("Rex"));
    let has_pet = object_property("hasPet");
    let name = datatype_property("name");
    let same_as = OntologyProperty::object(owl::sameAs.into()).unwrap();

    assert!(data.add_assertion_relation(&john, &has_pet, &rex).is_applied());
    assert!(data
        .add_literal_assertion_relation(&rex, &name, &literal("Rex"))
        .is_applied());
    assert!(matches!(
        data.add_assertion_relation(&john, &name, &rex).rejection(),
        Some(Rejection::KindMismatch { .. })
    ));
    assert!(data
        .add_literal_assertion_relation(&rex, &has_pet, &literal("Rex"))
        .is_rejected());
    assert!(matches!(
        data.add_assertion_relation(&john, &same_as, &rex).rejection(),
        Some(Rejection::ReservedProperty(_))
    ));
    assert_eq!(data.relations().assertions.len(), 2);
    // the literal was registered by the assertion
    assert_eq!(data.literals_count(), 1);
    assert_eq!(data.facts_count(), 2);

    assert!(data.remove_assertion_relation(&john, &has_pet, &rex).is_applied());
    assert!(data
        .remove_literal_assertion_relation(&rex, &name, &literal("Rex"))
        .is_applied());
    assert!(data.relations().assertions.is_empty());
}

#[test]
fn removing_entities_purges_relations() {
    let mut data = Data::new();
    let (john, rex) = (fact("John"), fact("Rex"));
    data.add_assertion_relation(&john, &object_property("hasPet"), &rex);
    data.add_literal_assertion_relation(&rex, &datatype_property("name"), &literal("Rex"));
    data.add_label_annotation(&rex, &literal("a dog"));

    assert!(data.remove_literal(&RdfTerm::plain_literal("Rex")).is_applied());
    assert_eq!(data.relations().assertions.len(), 1);
    assert!(data.remove_fact(&ex("Rex")).is_applied());
    assert!(data.remove_fact(&ex("Rex")).is_unchanged());
    assert!(data.relations().is_empty());
    assert!(data.annotations().is_empty());
    assert_eq!(data.facts_count(), 1);
}

#[test]
fn select_by_expression() {
    let mut data = Data::new();
    for name in ["John", "Jane", "Rex"] {
        data.add_fact(&fact(name));
    }
    data.add_literal(&literal("blue"));
    data.add_literal(&OntologyLiteral::new(RdfTerm::lang_literal("bleu", "fr").unwrap()).unwrap());

    let re = Regex::new("/J[a-z]+$").unwrap();
    let mut names: Vec<_> = data
        .select_facts_by_expression(&re)
        .into_iter()
        .map(|f| f.to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["http://example.org/Jane", "http://example.org/John"]);

    let re = Regex::new("@fr$").unwrap();
    let found = data.select_literals_by_expression(&re);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].to_string(), "bleu@fr");
}

#[test]
fn set_algebra() {
    let (john, jane, rex) = (fact("John"), fact("Jane"), fact("Rex"));
    let mut d1 = Data::new();
    d1.add_same_as_relation(&john, &jane);
    d1.add_literal(&literal("x"));
    let mut d2 = Data::new();
    d2.add_same_as_relation(&john, &jane);
    d2.add_class_type_relation(&rex, &class("Dog"));

    let i = d1.intersect_with(&d2);
    assert_eq!(i.facts_count(), 2);
    assert_eq!(i.literals_count(), 0);
    assert_eq!(i.relations().same_as.len(), 2);
    let u = d1.union_with(&d2);
    assert_eq!(u.facts_count(), 3);
    assert_eq!(u.literals_count(), 1);
    assert_eq!(u.relations().entries_count(), 3);
    let d = d2.difference_with(&d1);
    assert_eq!(d.facts_count(), 1);
    assert!(d.relations().same_as.is_empty());
    assert_eq!(d.relations().class_type.len(), 1);
}

#[test]
fn to_graph_declares_individuals() {
    let mut data = Data::new();
    let (john, jane) = (fact("John"), fact("Jane"));
    data.add_different_from_relation(&john, &jane);
    data.add_fact(&fact("Loner"));
    let g = data.to_graph(false);
    let named: RdfTerm = owl::NamedIndividual.into();
    for name in ["John", "Jane", "Loner"] {
        assert!(g.contains(&[ex(name), rdf::type_.into(), named.clone()]));
    }
    assert!(g.contains(&[ex("John"), owl::differentFrom.into(), ex("Jane")]));
    assert_eq!(g.len(), 4);
    assert_eq!(data.to_graph(true).len(), 5);
}

#[test]
fn annotating_declares_the_fact() {
    let mut data = Data::new();
    assert!(data.add_label_annotation(&fact("rex"), &literal("Rex")).is_applied());
    assert!(data.select_fact(&ex("rex")).is_some());
}

#[test]
fn difference_with_itself_is_empty() {
    let mut data = Data::new();
    let (rex, john) = (fact("rex"), fact("john"));
    data.add_class_type_relation(&rex, &class("Dog"));
    data.add_same_as_relation(&rex, &fact("rexy"));
    data.add_different_from_relation(&rex, &john);
    data.add_assertion_relation(&john, &object_property("hasPet"), &rex);
    data.add_literal_assertion_relation(&rex, &datatype_property("name"), &literal("Rex"));
    data.add_comment_annotation(&john, &literal("owner"));

    let d = data.difference_with(&data);
    assert_eq!(d.facts_count(), 0);
    assert_eq!(d.literals_count(), 0);
    assert!(d.relations().is_empty());
    assert!(d.annotations().is_empty());
    assert!(d.to_graph(true).is_empty());
}
