//! I define [`ClassModel`], the classes of an ontology and their relations.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sophia_api::ns::{rdf, rdfs, xsd};

use crate::entity::{
    ClassKind, Composite, OntologyClass, OntologyFact, OntologyLiteral, OntologyResource,
    RestrictionFacet,
};
use crate::metadata::{AnnotatedModel, Annotations, ClassRelations, Metadata};
use crate::ns::owl;
use crate::outcome::{Outcome, Rejection};
use crate::reasoning::Hierarchy;
use crate::taxonomy::{insert_collection, insert_triple, OntologyGraph, TaxonomyEntry};
use crate::term::RdfTerm;

/// The classes of an ontology, with their relations and annotations.
///
/// Relations between classes are consistency-gated:
/// see [`add_sub_class_of_relation`](ClassModel::add_sub_class_of_relation),
/// [`add_equivalent_class_relation`](ClassModel::add_equivalent_class_relation)
/// and [`add_disjoint_with_relation`](ClassModel::add_disjoint_with_relation).
/// Classes involved in a relation are added to the model if needed.
#[derive(Clone, Debug, Default)]
pub struct ClassModel {
    classes: HashMap<RdfTerm, OntologyClass>,
    relations: ClassRelations,
    annotations: Annotations,
}

impl ClassModel {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `class` to this model.
    ///
    /// If a class with the same value is already present, it is kept unchanged.
    pub fn add_class(&mut self, class: OntologyClass) -> Outcome {
        match self.classes.entry(class.value().clone()) {
            Entry::Occupied(_) => Outcome::Unchanged,
            Entry::Vacant(e) => {
                e.insert(class);
                Outcome::Applied
            }
        }
    }

    /// Remove the class named `class`, with all the relations and annotations mentioning it.
    pub fn remove_class(&mut self, class: &RdfTerm) -> Outcome {
        if self.classes.remove(class).is_none() {
            return Outcome::Unchanged;
        }
        for t in self.relations.taxonomies_mut() {
            t.purge(class);
        }
        for t in self.annotations.taxonomies_mut() {
            t.purge(class);
        }
        Outcome::Applied
    }

    /// The class named `class`, if any.
    pub fn select_class(&self, class: &RdfTerm) -> Option<&OntologyClass> {
        self.classes.get(class)
    }

    /// All classes of this model, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &OntologyClass> + '_ {
        self.classes.values()
    }

    /// The number of classes, of any kind.
    pub fn classes_count(&self) -> usize {
        self.classes.len()
    }

    /// The number of restrictions.
    pub fn restrictions_count(&self) -> usize {
        self.classes().filter(|c| c.is_restriction()).count()
    }

    /// The number of enumerated classes.
    pub fn enumerates_count(&self) -> usize {
        self.classes().filter(|c| c.is_enumerate()).count()
    }

    /// The number of data ranges.
    pub fn data_ranges_count(&self) -> usize {
        self.classes().filter(|c| c.is_data_range()).count()
    }

    /// The number of unions, intersections and complements.
    pub fn composites_count(&self) -> usize {
        self.classes().filter(|c| c.is_composite()).count()
    }

    /// The number of deprecated classes.
    pub fn deprecated_classes_count(&self) -> usize {
        self.classes().filter(|c| c.is_deprecated()).count()
    }

    /// The relations between the classes of this model.
    pub fn relations(&self) -> &ClassRelations {
        &self.relations
    }

    fn register(&mut self, class: &OntologyClass) {
        if !self.classes.contains_key(class.value()) {
            self.classes.insert(class.value().clone(), class.clone());
        }
    }

    /// Add `child rdfs:subClassOf mother`.
    ///
    /// Rejected if `mother` is already a sub-class of `child`,
    /// or is equivalent to or disjoint with it.
    pub fn add_sub_class_of_relation(
        &mut self,
        child: &OntologyClass,
        mother: &OntologyClass,
    ) -> Outcome {
        const REL: &str = "rdfs:subClassOf";
        let (c, m) = (child.value(), mother.value());
        if c == m {
            return Outcome::reject(Rejection::SelfRelation(c.to_string(), REL));
        }
        let p = rdfs::subClassOf.into();
        if self.relations.sub_class_of.contains(c, &p, m) {
            return Outcome::Unchanged;
        }
        let conflict = {
            let h = Hierarchy::of_classes(&self.relations);
            if h.supers(m).contains(c) {
                Some("subsumption")
            } else if h.equivalents(m).contains(c) {
                Some("equivalence")
            } else if meets_disjoint(&h, c, m) {
                Some("disjointness")
            } else {
                None
            }
        };
        if let Some(conflict) = conflict {
            return Outcome::reject(Rejection::conflict(c, REL, m, conflict));
        }
        self.register(child);
        self.register(mother);
        let entry = TaxonomyEntry::new_unchecked(c.clone(), p, m.clone());
        Outcome::changed(self.relations.sub_class_of.add_entry(entry))
    }

    /// Add `a owl:equivalentClass b` (and its reverse, as an inference).
    ///
    /// Rejected if one is a sub-class of the other, or if they are disjoint.
    pub fn add_equivalent_class_relation(
        &mut self,
        a: &OntologyClass,
        b: &OntologyClass,
    ) -> Outcome {
        const REL: &str = "owl:equivalentClass";
        let (x, y) = (a.value(), b.value());
        if x == y {
            return Outcome::reject(Rejection::SelfRelation(x.to_string(), REL));
        }
        let p = owl::equivalentClass.into();
        if self.relations.equivalent_class.contains(x, &p, y) {
            return Outcome::Unchanged;
        }
        let conflict = {
            let h = Hierarchy::of_classes(&self.relations);
            if h.supers(x).contains(y) || h.subs(x).contains(y) {
                Some("subsumption")
            } else if meets_disjoint(&h, x, y) || meets_disjoint(&h, y, x) {
                Some("disjointness")
            } else {
                None
            }
        };
        if let Some(conflict) = conflict {
            return Outcome::reject(Rejection::conflict(x, REL, y, conflict));
        }
        self.register(a);
        self.register(b);
        Outcome::changed(self.relations.equivalent_class.add_pair(x, &p, y))
    }

    /// Add `a owl:disjointWith b` (and its reverse, as an inference).
    ///
    /// Rejected if one is a sub-class of the other, if they are equivalent,
    /// or if they have a common sub-class.
    pub fn add_disjoint_with_relation(&mut self, a: &OntologyClass, b: &OntologyClass) -> Outcome {
        const REL: &str = "owl:disjointWith";
        let (x, y) = (a.value(), b.value());
        if x == y {
            return Outcome::reject(Rejection::SelfRelation(x.to_string(), REL));
        }
        let p = owl::disjointWith.into();
        if self.relations.disjoint_with.contains(x, &p, y) {
            return Outcome::Unchanged;
        }
        let conflict = {
            let h = Hierarchy::of_classes(&self.relations);
            if h.supers(x).contains(y) || h.subs(x).contains(y) {
                Some("subsumption")
            } else if h.equivalents(x).contains(y) {
                Some("equivalence")
            } else if !h.lower(x).is_disjoint(&h.lower(y)) {
                Some("subsumption")
            } else {
                None
            }
        };
        if let Some(conflict) = conflict {
            return Outcome::reject(Rejection::conflict(x, REL, y, conflict));
        }
        self.register(a);
        self.register(b);
        Outcome::changed(self.relations.disjoint_with.add_pair(x, &p, y))
    }

    /// Add `fact` to the facts enumerated by `enumerate`,
    /// which must be an [enumerate class](OntologyClass::enumerate).
    pub fn add_one_of_relation(&mut self, enumerate: &OntologyClass, fact: &OntologyFact) -> Outcome {
        if !enumerate.is_enumerate() {
            return Outcome::reject(Rejection::kind_mismatch(enumerate, "an enumerate class"));
        }
        self.add_member(enumerate, owl::oneOf.into(), fact.value())
    }

    /// Add `literal` to the literals enumerated by `data_range`,
    /// which must be a [data range](OntologyClass::data_range).
    pub fn add_one_of_literal_relation(
        &mut self,
        data_range: &OntologyClass,
        literal: &OntologyLiteral,
    ) -> Outcome {
        if !data_range.is_data_range() {
            return Outcome::reject(Rejection::kind_mismatch(data_range, "a data range"));
        }
        self.add_member(data_range, owl::oneOf.into(), literal.value())
    }

    /// Add `member` to the operands of `intersection`,
    /// which must be an [intersection class](OntologyClass::intersection).
    pub fn add_intersection_of_relation(
        &mut self,
        intersection: &OntologyClass,
        member: &OntologyClass,
    ) -> Outcome {
        if intersection.kind() != &ClassKind::Composite(Composite::Intersection) {
            return Outcome::reject(Rejection::kind_mismatch(
                intersection,
                "an intersection class",
            ));
        }
        if intersection == member {
            let rel = "owl:intersectionOf";
            return Outcome::reject(Rejection::SelfRelation(member.to_string(), rel));
        }
        self.register(member);
        self.add_member(intersection, owl::intersectionOf.into(), member.value())
    }

    /// Add `member` to the operands of `union`,
    /// which must be a [union class](OntologyClass::union).
    pub fn add_union_of_relation(&mut self, union: &OntologyClass, member: &OntologyClass) -> Outcome {
        if union.kind() != &ClassKind::Composite(Composite::Union) {
            return Outcome::reject(Rejection::kind_mismatch(union, "a union class"));
        }
        if union == member {
            let rel = "owl:unionOf";
            return Outcome::reject(Rejection::SelfRelation(member.to_string(), rel));
        }
        self.register(member);
        self.add_member(union, owl::unionOf.into(), member.value())
    }

    fn add_member(&mut self, class: &OntologyClass, p: RdfTerm, member: &RdfTerm) -> Outcome {
        self.register(class);
        let entry = TaxonomyEntry::new_unchecked(class.value().clone(), p.clone(), member.clone());
        let taxonomy = if p == RdfTerm::from(owl::oneOf) {
            &mut self.relations.one_of
        } else if p == RdfTerm::from(owl::unionOf) {
            &mut self.relations.union_of
        } else {
            &mut self.relations.intersection_of
        };
        Outcome::changed(taxonomy.add_entry(entry))
    }

    /// Remove `child rdfs:subClassOf mother`.
    pub fn remove_sub_class_of_relation(
        &mut self,
        child: &OntologyClass,
        mother: &OntologyClass,
    ) -> Outcome {
        let p = rdfs::subClassOf.into();
        Outcome::changed(
            self.relations
                .sub_class_of
                .remove(child.value(), &p, mother.value()),
        )
    }

    /// Remove `a owl:equivalentClass b`, in both directions.
    pub fn remove_equivalent_class_relation(
        &mut self,
        a: &OntologyClass,
        b: &OntologyClass,
    ) -> Outcome {
        let p = owl::equivalentClass.into();
        Outcome::changed(
            self.relations
                .equivalent_class
                .remove_pair(a.value(), &p, b.value()),
        )
    }

    /// Remove `a owl:disjointWith b`, in both directions.
    pub fn remove_disjoint_with_relation(
        &mut self,
        a: &OntologyClass,
        b: &OntologyClass,
    ) -> Outcome {
        let p = owl::disjointWith.into();
        Outcome::changed(
            self.relations
                .disjoint_with
                .remove_pair(a.value(), &p, b.value()),
        )
    }

    /// Remove `fact` from the members of `enumerate`.
    pub fn remove_one_of_relation(
        &mut self,
        enumerate: &OntologyClass,
        fact: &OntologyFact,
    ) -> Outcome {
        let p = owl::oneOf.into();
        Outcome::changed(
            self.relations
                .one_of
                .remove(enumerate.value(), &p, fact.value()),
        )
    }

    /// Remove `literal` from the members of `data_range`.
    pub fn remove_one_of_literal_relation(
        &mut self,
        data_range: &OntologyClass,
        literal: &OntologyLiteral,
    ) -> Outcome {
        let p = owl::oneOf.into();
        Outcome::changed(
            self.relations
                .one_of
                .remove(data_range.value(), &p, literal.value()),
        )
    }

    /// Remove `member` from the operands of `intersection`.
    pub fn remove_intersection_of_relation(
        &mut self,
        intersection: &OntologyClass,
        member: &OntologyClass,
    ) -> Outcome {
        let p = owl::intersectionOf.into();
        Outcome::changed(
            self.relations
                .intersection_of
                .remove(intersection.value(), &p, member.value()),
        )
    }

    /// Remove `member` from the operands of `union`.
    pub fn remove_union_of_relation(
        &mut self,
        union: &OntologyClass,
        member: &OntologyClass,
    ) -> Outcome {
        let p = owl::unionOf.into();
        Outcome::changed(
            self.relations
                .union_of
                .remove(union.value(), &p, member.value()),
        )
    }

    /// The classes and relations common to `self` and `other`.
    pub fn intersect_with(&self, other: &Self) -> Self {
        ClassModel {
            classes: self
                .classes
                .iter()
                .filter(|(k, _)| other.classes.contains_key(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            relations: self.relations.intersect_with(&other.relations),
            annotations: self.annotations.intersect_with(&other.annotations),
        }
    }

    /// The classes and relations of `self` and `other`
    /// (classes of `self` win over those of `other` with the same value).
    pub fn union_with(&self, other: &Self) -> Self {
        let mut classes = self.classes.clone();
        for (k, v) in &other.classes {
            classes.entry(k.clone()).or_insert_with(|| v.clone());
        }
        ClassModel {
            classes,
            relations: self.relations.union_with(&other.relations),
            annotations: self.annotations.union_with(&other.annotations),
        }
    }

    /// The classes and relations of `self` that are not in `other`.
    pub fn difference_with(&self, other: &Self) -> Self {
        ClassModel {
            classes: self
                .classes
                .iter()
                .filter(|(k, _)| !other.classes.contains_key(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            relations: self.relations.difference_with(&other.relations),
            annotations: self.annotations.difference_with(&other.annotations),
        }
    }

    /// Export this model as a graph.
    ///
    /// Members of enumerates, data ranges, unions and intersections
    /// are exported as RDF collections.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        for class in self.classes() {
            self.export_class(class, &mut graph);
        }
        let r = &self.relations;
        for t in [&r.sub_class_of, &r.equivalent_class, &r.disjoint_with] {
            t.export_into(&mut graph, include_inferences);
        }
        for t in self.annotations.taxonomies() {
            t.export_into(&mut graph, include_inferences);
        }
        graph
    }

    fn export_class(&self, class: &OntologyClass, graph: &mut OntologyGraph) {
        let c = class.value();
        let r = &self.relations;
        match class.kind() {
            ClassKind::Simple => insert_triple(graph, c, rdf::type_, owl::Class),
            ClassKind::Restriction(restriction) => {
                insert_triple(graph, c, rdf::type_, owl::Restriction);
                insert_triple(graph, c, owl::onProperty, restriction.on_property().clone());
                match restriction.facet() {
                    RestrictionFacet::AllValuesFrom(from) => {
                        insert_triple(graph, c, owl::allValuesFrom, from.clone())
                    }
                    RestrictionFacet::SomeValuesFrom(from) => {
                        insert_triple(graph, c, owl::someValuesFrom, from.clone())
                    }
                    RestrictionFacet::HasValue(value) => {
                        insert_triple(graph, c, owl::hasValue, value.clone())
                    }
                    RestrictionFacet::Cardinality { min, max } if min == max => {
                        insert_triple(graph, c, owl::cardinality, cardinality(*min))
                    }
                    RestrictionFacet::Cardinality { min, max } => {
                        if *min > 0 {
                            insert_triple(graph, c, owl::minCardinality, cardinality(*min));
                        }
                        if *max > 0 {
                            insert_triple(graph, c, owl::maxCardinality, cardinality(*max));
                        }
                    }
                }
            }
            ClassKind::Enumerate => {
                insert_triple(graph, c, rdf::type_, owl::Class);
                let head = insert_collection(graph, c, "oneOf", r.one_of.objects_of(c));
                insert_triple(graph, c, owl::oneOf, head);
            }
            ClassKind::DataRange => {
                insert_triple(graph, c, rdf::type_, owl::DataRange);
                let head = insert_collection(graph, c, "oneOf", r.one_of.objects_of(c));
                insert_triple(graph, c, owl::oneOf, head);
            }
            ClassKind::Composite(composite) => {
                insert_triple(graph, c, rdf::type_, owl::Class);
                match composite {
                    Composite::Union => {
                        let members = r.union_of.objects_of(c);
                        let head = insert_collection(graph, c, "unionOf", members);
                        insert_triple(graph, c, owl::unionOf, head);
                    }
                    Composite::Intersection => {
                        let members = r.intersection_of.objects_of(c);
                        let head = insert_collection(graph, c, "intersectionOf", members);
                        insert_triple(graph, c, owl::intersectionOf, head);
                    }
                    Composite::Complement(of) => {
                        insert_triple(graph, c, owl::complementOf, of.clone())
                    }
                }
            }
        }
        if class.is_deprecated() {
            insert_triple(graph, c, rdf::type_, owl::DeprecatedClass);
        }
    }
}

/// Whether `a`, one of its equivalents or one of its descendants is disjoint with `b`
fn meets_disjoint<'a>(h: &Hierarchy<'a>, a: &'a RdfTerm, b: &'a RdfTerm) -> bool {
    let disjoints = h.disjoints(b);
    h.lower(a).iter().any(|x| disjoints.contains(x))
}

fn cardinality(n: u32) -> RdfTerm {
    RdfTerm::TypedLiteral {
        value: n.to_string().into(),
        datatype: xsd::nonNegativeInteger.to_string().into(),
    }
}

impl AnnotatedModel for ClassModel {
    type Entity = OntologyClass;

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    fn declare_entity(&mut self, class: &OntologyClass) {
        self.register(class);
    }
}
