//! I define [`Data`], the facts and literals of an ontology and their relations.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use regex::Regex;
use sophia_api::ns::rdf;

use crate::entity::{OntologyClass, OntologyFact, OntologyLiteral, OntologyProperty, OntologyResource};
use crate::metadata::{AnnotatedModel, Annotations, DataRelations, Metadata};
use crate::ns::{self, owl};
use crate::outcome::{Outcome, Rejection};
use crate::reasoning::Hierarchy;
use crate::taxonomy::{insert_triple, OntologyGraph, TaxonomyEntry};
use crate::term::RdfTerm;

/// The assertions of an ontology: facts, literals, and their relations.
///
/// Facts and literals are kept in separate dictionaries,
/// since literals can only be the object of a relation.
#[derive(Clone, Debug, Default)]
pub struct Data {
    facts: HashMap<RdfTerm, OntologyFact>,
    literals: HashMap<RdfTerm, OntologyLiteral>,
    relations: DataRelations,
    annotations: Annotations,
}

fn insert<E: OntologyResource + Clone>(map: &mut HashMap<RdfTerm, E>, entity: &E) -> Outcome {
    match map.entry(entity.value().clone()) {
        Entry::Occupied(_) => Outcome::Unchanged,
        Entry::Vacant(e) => {
            e.insert(entity.clone());
            Outcome::Applied
        }
    }
}

fn common<E: Clone>(a: &HashMap<RdfTerm, E>, b: &HashMap<RdfTerm, E>, keep: bool) -> HashMap<RdfTerm, E> {
    a.iter()
        .filter(|(k, _)| b.contains_key(*k) == keep)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn merged<E: Clone>(a: &HashMap<RdfTerm, E>, b: &HashMap<RdfTerm, E>) -> HashMap<RdfTerm, E> {
    let mut result = a.clone();
    for (k, v) in b {
        result.entry(k.clone()).or_insert_with(|| v.clone());
    }
    result
}

impl Data {
    /// Empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fact`.
    ///
    /// An already registered fact is left unchanged.
    pub fn add_fact(&mut self, fact: &OntologyFact) -> Outcome {
        insert(&mut self.facts, fact)
    }

    /// Register `literal`.
    pub fn add_literal(&mut self, literal: &OntologyLiteral) -> Outcome {
        insert(&mut self.literals, literal)
    }

    /// Remove the fact named `fact`, with all the relations and annotations mentioning it.
    pub fn remove_fact(&mut self, fact: &RdfTerm) -> Outcome {
        if self.facts.remove(fact).is_none() {
            return Outcome::Unchanged;
        }
        for t in self.relations.taxonomies_mut() {
            t.purge(fact);
        }
        for t in self.annotations.taxonomies_mut() {
            t.purge(fact);
        }
        Outcome::Applied
    }

    /// Remove `literal`, with all the assertions mentioning it.
    pub fn remove_literal(&mut self, literal: &RdfTerm) -> Outcome {
        if self.literals.remove(literal).is_none() {
            return Outcome::Unchanged;
        }
        self.relations.assertions.purge(literal);
        Outcome::Applied
    }

    /// The fact named `fact`, if any.
    pub fn select_fact(&self, fact: &RdfTerm) -> Option<&OntologyFact> {
        self.facts.get(fact)
    }

    /// The literal `literal`, if present.
    pub fn select_literal(&self, literal: &RdfTerm) -> Option<&OntologyLiteral> {
        self.literals.get(literal)
    }

    /// The facts whose canonical form matches `expression`.
    pub fn select_facts_by_expression(&self, expression: &Regex) -> Vec<&OntologyFact> {
        self.facts()
            .filter(|f| expression.is_match(&f.to_string()))
            .collect()
    }

    /// The literals whose canonical form matches `expression`.
    pub fn select_literals_by_expression(&self, expression: &Regex) -> Vec<&OntologyLiteral> {
        self.literals()
            .filter(|l| expression.is_match(&l.to_string()))
            .collect()
    }

    /// All registered facts, in no particular order.
    pub fn facts(&self) -> impl Iterator<Item = &OntologyFact> + '_ {
        self.facts.values()
    }

    /// All registered literals, in no particular order.
    pub fn literals(&self) -> impl Iterator<Item = &OntologyLiteral> + '_ {
        self.literals.values()
    }

    /// The number of registered facts.
    pub fn facts_count(&self) -> usize {
        self.facts.len()
    }

    /// The number of registered literals.
    pub fn literals_count(&self) -> usize {
        self.literals.len()
    }

    /// The relations between facts, classes and literals.
    pub fn relations(&self) -> &DataRelations {
        &self.relations
    }

    /// Add `fact rdf:type class`.
    ///
    /// Rejected unless `class` is a simple class.
    pub fn add_class_type_relation(&mut self, fact: &OntologyFact, class: &OntologyClass) -> Outcome {
        if !class.is_simple() {
            return Outcome::reject(Rejection::NonAtomicClassType(class.to_string()));
        }
        self.add_fact(fact);
        let entry =
            TaxonomyEntry::new_unchecked(fact.value().clone(), rdf::type_.into(), class.value().clone());
        Outcome::changed(self.relations.class_type.add_entry(entry))
    }

    /// Add `a owl:sameAs b` (and its reverse, as an inference).
    ///
    /// Rejected if `a` and `b` are known to be different.
    pub fn add_same_as_relation(&mut self, a: &OntologyFact, b: &OntologyFact) -> Outcome {
        const REL: &str = "owl:sameAs";
        let (x, y) = (a.value(), b.value());
        if x == y {
            return Outcome::reject(Rejection::SelfRelation(x.to_string(), REL));
        }
        let p = owl::sameAs.into();
        if self.relations.same_as.contains(x, &p, y) {
            return Outcome::Unchanged;
        }
        if Hierarchy::of_facts(&self.relations).partners(x).contains(y) {
            return Outcome::reject(Rejection::conflict(x, REL, y, "owl:differentFrom"));
        }
        self.add_fact(a);
        self.add_fact(b);
        Outcome::changed(self.relations.same_as.add_pair(x, &p, y))
    }

    /// Add `a owl:differentFrom b` (and its reverse, as an inference).
    ///
    /// Rejected if `a` and `b` are known to be the same.
    pub fn add_different_from_relation(&mut self, a: &OntologyFact, b: &OntologyFact) -> Outcome {
        const REL: &str = "owl:differentFrom";
        let (x, y) = (a.value(), b.value());
        if x == y {
            return Outcome::reject(Rejection::SelfRelation(x.to_string(), REL));
        }
        let p = owl::differentFrom.into();
        if self.relations.different_from.contains(x, &p, y) {
            return Outcome::Unchanged;
        }
        if Hierarchy::of_facts(&self.relations).equivalents(x).contains(y) {
            return Outcome::reject(Rejection::conflict(x, REL, y, "owl:sameAs"));
        }
        self.add_fact(a);
        self.add_fact(b);
        Outcome::changed(self.relations.different_from.add_pair(x, &p, y))
    }

    /// Add `subject property object`, where `property` is an object property.
    pub fn add_assertion_relation(
        &mut self,
        subject: &OntologyFact,
        property: &OntologyProperty,
        object: &OntologyFact,
    ) -> Outcome {
        if let Err(rejection) = check_assertion(property, property.is_object(), "an object property") {
            return Outcome::reject(rejection);
        }
        self.add_fact(subject);
        self.add_fact(object);
        self.assert(subject, property, object.value())
    }

    /// Add `subject property literal`, where `property` is a datatype property.
    pub fn add_literal_assertion_relation(
        &mut self,
        subject: &OntologyFact,
        property: &OntologyProperty,
        literal: &OntologyLiteral,
    ) -> Outcome {
        if let Err(rejection) = check_assertion(property, property.is_datatype(), "a datatype property") {
            return Outcome::reject(rejection);
        }
        self.add_fact(subject);
        self.add_literal(literal);
        self.assert(subject, property, literal.value())
    }

    fn assert(&mut self, subject: &OntologyFact, property: &OntologyProperty, object: &RdfTerm) -> Outcome {
        let entry = TaxonomyEntry::new_unchecked(
            subject.value().clone(),
            property.value().clone(),
            object.clone(),
        );
        Outcome::changed(self.relations.assertions.add_entry(entry))
    }

    /// Remove `fact rdf:type class`.
    pub fn remove_class_type_relation(&mut self, fact: &OntologyFact, class: &OntologyClass) -> Outcome {
        let p = rdf::type_.into();
        Outcome::changed(self.relations.class_type.remove(fact.value(), &p, class.value()))
    }

    /// Remove `a owl:sameAs b`, in both directions.
    pub fn remove_same_as_relation(&mut self, a: &OntologyFact, b: &OntologyFact) -> Outcome {
        let p = owl::sameAs.into();
        Outcome::changed(self.relations.same_as.remove_pair(a.value(), &p, b.value()))
    }

    /// Remove `a owl:differentFrom b`, in both directions.
    pub fn remove_different_from_relation(&mut self, a: &OntologyFact, b: &OntologyFact) -> Outcome {
        let p = owl::differentFrom.into();
        Outcome::changed(
            self.relations
                .different_from
                .remove_pair(a.value(), &p, b.value()),
        )
    }

    /// Remove the assertion `subject property object`.
    pub fn remove_assertion_relation(
        &mut self,
        subject: &OntologyFact,
        property: &OntologyProperty,
        object: &OntologyFact,
    ) -> Outcome {
        Outcome::changed(
            self.relations
                .assertions
                .remove(subject.value(), property.value(), object.value()),
        )
    }

    /// Remove the assertion `subject property literal`.
    pub fn remove_literal_assertion_relation(
        &mut self,
        subject: &OntologyFact,
        property: &OntologyProperty,
        literal: &OntologyLiteral,
    ) -> Outcome {
        Outcome::changed(
            self.relations
                .assertions
                .remove(subject.value(), property.value(), literal.value()),
        )
    }

    /// The facts, literals and relations common to `self` and `other`.
    pub fn intersect_with(&self, other: &Self) -> Self {
        Data {
            facts: common(&self.facts, &other.facts, true),
            literals: common(&self.literals, &other.literals, true),
            relations: self.relations.intersect_with(&other.relations),
            annotations: self.annotations.intersect_with(&other.annotations),
        }
    }

    /// The facts, literals and relations of `self` and `other`.
    pub fn union_with(&self, other: &Self) -> Self {
        Data {
            facts: merged(&self.facts, &other.facts),
            literals: merged(&self.literals, &other.literals),
            relations: self.relations.union_with(&other.relations),
            annotations: self.annotations.union_with(&other.annotations),
        }
    }

    /// The facts, literals and relations of `self` that are not in `other`.
    pub fn difference_with(&self, other: &Self) -> Self {
        Data {
            facts: common(&self.facts, &other.facts, false),
            literals: common(&self.literals, &other.literals, false),
            relations: self.relations.difference_with(&other.relations),
            annotations: self.annotations.difference_with(&other.annotations),
        }
    }

    /// Export this data as a graph.
    ///
    /// Every fact is declared as an `owl:NamedIndividual`.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        for fact in self.facts() {
            insert_triple(&mut graph, fact.value(), rdf::type_, owl::NamedIndividual);
        }
        for t in self.relations.taxonomies() {
            t.export_into(&mut graph, include_inferences);
        }
        for t in self.annotations.taxonomies() {
            t.export_into(&mut graph, include_inferences);
        }
        graph
    }
}

fn check_assertion(
    property: &OntologyProperty,
    right_kind: bool,
    expected: &'static str,
) -> Result<(), Rejection> {
    if ns::is_reserved_property(property.value()) {
        Err(Rejection::ReservedProperty(property.to_string()))
    } else if !right_kind {
        Err(Rejection::kind_mismatch(property, expected))
    } else {
        Ok(())
    }
}

impl AnnotatedModel for Data {
    type Entity = OntologyFact;

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    fn declare_entity(&mut self, fact: &OntologyFact) {
        self.add_fact(fact);
    }
}

#[cfg(test)]
mod test;
