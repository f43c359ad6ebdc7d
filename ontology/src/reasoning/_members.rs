//! Evaluation of class membership.
use std::collections::HashSet;

use sophia_api::ns::rdfs;

use super::*;
use crate::entity::{ClassKind, Composite, RestrictionFacet};
use crate::metadata::ClassRelations;
use crate::taxonomy::Taxonomy;
use crate::Ontology;

/// All the members of `class` in the data of `ontology`.
///
/// Members are facts, except for literal-compatible classes
/// (see [`is_literal_compatible_class`]) whose members are literals.
/// The way members are computed depends on the kind of `class`:
/// * restrictions: facts whose values for the restricted property
///   (or one of its sub-properties or equivalent properties) satisfy the restriction;
/// * enumerates: the facts listed by `owl:oneOf`;
/// * data ranges: the literals of the data listed by `owl:oneOf`;
/// * unions, intersections and complements: combination of the members of their operands;
/// * simple classes: facts typed by the class, one of its sub-classes or equivalent classes,
///   and the facts that are the same as them.
pub fn enlist_members_of(class: &OntologyClass, ontology: &Ontology) -> HashSet<RdfTerm> {
    log::trace!("enlisting members of {class}");
    let mut evaluator = Members {
        ontology,
        pending: HashSet::new(),
    };
    evaluator.of(class.value())
}

/// Membership evaluator; `pending` holds the classes being evaluated,
/// to cut cycles between class definitions.
struct Members<'a> {
    ontology: &'a Ontology,
    pending: HashSet<RdfTerm>,
}

impl<'a> Members<'a> {
    fn classes(&self) -> &'a ClassModel {
        &self.ontology.model().class_model
    }

    fn properties(&self) -> &'a PropertyModel {
        &self.ontology.model().property_model
    }

    fn data(&self) -> &'a Data {
        self.ontology.data()
    }

    fn of(&mut self, class: &RdfTerm) -> HashSet<RdfTerm> {
        if !self.pending.insert(class.clone()) {
            log::trace!("cycle detected on {class}");
            return HashSet::new();
        }
        let kind = self
            .classes()
            .select_class(class)
            .map(|c| c.kind().clone())
            .unwrap_or(ClassKind::Simple);
        let members = match kind {
            ClassKind::Simple => self.of_simple(class),
            ClassKind::Restriction(r) => self.of_restriction(r.on_property(), r.facet()),
            ClassKind::Enumerate => self.operands(class, |r| &r.one_of).cloned().collect(),
            ClassKind::DataRange => {
                let literals: HashSet<_> = self.data().literals().map(|l| l.value()).collect();
                self.operands(class, |r| &r.one_of)
                    .filter(|m| literals.contains(*m))
                    .cloned()
                    .collect()
            }
            ClassKind::Composite(Composite::Union) => {
                let operands: Vec<_> = self.operands(class, |r| &r.union_of).cloned().collect();
                let mut result = HashSet::new();
                for op in &operands {
                    result.extend(self.of(op));
                }
                result
            }
            ClassKind::Composite(Composite::Intersection) => {
                let operands: Vec<_> = self
                    .operands(class, |r| &r.intersection_of)
                    .cloned()
                    .collect();
                let mut result: Option<HashSet<RdfTerm>> = None;
                for op in &operands {
                    let members = self.of(op);
                    result = Some(match result {
                        None => members,
                        Some(acc) => acc.intersection(&members).cloned().collect(),
                    });
                }
                result.unwrap_or_default()
            }
            ClassKind::Composite(Composite::Complement(of)) => {
                let excluded = self.of(&of);
                self.data()
                    .facts()
                    .map(|f| f.value())
                    .filter(|f| !excluded.contains(*f))
                    .cloned()
                    .collect()
            }
        };
        self.pending.remove(class);
        members
    }

    /// Objects of the entries of the given class relation having `class` as subject
    fn operands<'s>(
        &self,
        class: &'s RdfTerm,
        taxonomy: fn(&ClassRelations) -> &Taxonomy,
    ) -> impl Iterator<Item = &'s RdfTerm> + 's
    where
        'a: 's,
    {
        taxonomy(self.classes().relations()).objects_of(class)
    }

    fn of_simple(&mut self, class: &RdfTerm) -> HashSet<RdfTerm> {
        let classes = self.classes();
        if is_literal_compatible(class, classes) {
            return self.literals_of(class);
        }
        let h = Hierarchy::of_classes(classes.relations());
        let mut types = h.equivalence_class(class);
        types.extend(h.subs(class));
        let class_type = &self.data().relations().class_type;

        let mut typed = HashSet::new();
        for t in types {
            match classes.select_class(t) {
                Some(c) if !c.is_simple() && t != class => typed.extend(self.of(t)),
                _ => typed.extend(class_type.subjects_of(t).cloned()),
            }
        }
        let same_as = Hierarchy::of_facts(self.data().relations());
        let mut result = HashSet::new();
        for fact in &typed {
            result.extend(same_as.equivalents(fact).into_iter().cloned());
        }
        result.extend(typed);
        result
    }

    /// Literals of the data belonging to the literal-compatible `class`
    fn literals_of(&self, class: &RdfTerm) -> HashSet<RdfTerm> {
        let h = Hierarchy::of_classes(self.classes().relations());
        let mut types = h.equivalence_class(class);
        types.extend(h.subs(class));
        let literal = RdfTerm::from(rdfs::Literal);
        let any = types.contains(&literal);
        self.data()
            .literals()
            .map(|l| l.value())
            .filter(|l| {
                any || l
                    .literal_datatype()
                    .map_or(false, |dt| types.iter().any(|t| t.as_iri() == Some(dt)))
            })
            .cloned()
            .collect()
    }

    fn of_restriction(
        &mut self,
        on_property: &RdfTerm,
        facet: &RestrictionFacet,
    ) -> HashSet<RdfTerm> {
        let properties = Hierarchy::of_properties(self.properties().relations());
        let mut props = properties.equivalence_class(on_property);
        props.extend(properties.subs(on_property));
        let assertions = &self.data().relations().assertions;
        let values_of = |fact: &RdfTerm| -> Vec<&'a RdfTerm> {
            assertions
                .iter()
                .filter(|e| e.subject() == fact && props.contains(e.predicate()))
                .map(|e| e.object())
                .collect()
        };
        let facts: Vec<&'a RdfTerm> = self.data().facts().map(|f| f.value()).collect();
        match facet {
            RestrictionFacet::AllValuesFrom(from) | RestrictionFacet::SomeValuesFrom(from) => {
                let allowed = self.of(from);
                let all = matches!(facet, RestrictionFacet::AllValuesFrom(_));
                facts
                    .into_iter()
                    .filter(|f| {
                        let values = values_of(*f);
                        if all {
                            !values.is_empty() && values.iter().all(|v| allowed.contains(*v))
                        } else {
                            values.iter().any(|v| allowed.contains(*v))
                        }
                    })
                    .cloned()
                    .collect()
            }
            RestrictionFacet::HasValue(required) => {
                let mut accepted = HashSet::from([required]);
                if required.is_resource() {
                    let same_as = Hierarchy::of_facts(self.data().relations());
                    accepted.extend(same_as.equivalents(required));
                }
                facts
                    .into_iter()
                    .filter(|f| values_of(*f).iter().any(|v| accepted.contains(*v)))
                    .cloned()
                    .collect()
            }
            RestrictionFacet::Cardinality { min, max } => {
                let (min, max) = (*min as usize, *max as usize);
                facts
                    .into_iter()
                    .filter(|f| {
                        let count = values_of(*f).len();
                        count >= min && (count <= max || (max == 0 && min != 0))
                    })
                    .cloned()
                    .collect()
            }
        }
    }
}
