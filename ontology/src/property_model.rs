//! I define [`PropertyModel`], the properties of an ontology and their relations.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sophia_api::ns::{rdf, rdfs};

use crate::entity::{OntologyProperty, OntologyResource, PropertyKind};
use crate::metadata::{AnnotatedModel, Annotations, Metadata, PropertyRelations};
use crate::ns::{self, owl};
use crate::outcome::{Outcome, Rejection};
use crate::reasoning::Hierarchy;
use crate::taxonomy::{insert_triple, OntologyGraph, TaxonomyEntry};
use crate::term::RdfTerm;

/// The properties of an ontology, with their relations and annotations.
///
/// The vocabulary used to describe ontologies (`rdf:type`, `rdfs:subClassOf`, `owl:sameAs`...)
/// and the reserved annotation predicates can not be added as properties.
#[derive(Clone, Debug, Default)]
pub struct PropertyModel {
    properties: HashMap<RdfTerm, OntologyProperty>,
    relations: PropertyRelations,
    annotations: Annotations,
}

impl PropertyModel {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `property` to this model.
    ///
    /// If a property with the same value is already present, it is kept unchanged.
    pub fn add_property(&mut self, property: OntologyProperty) -> Outcome {
        if ns::is_reserved_property(property.value()) {
            return Outcome::reject(Rejection::ReservedProperty(property.to_string()));
        }
        match self.properties.entry(property.value().clone()) {
            Entry::Occupied(_) => Outcome::Unchanged,
            Entry::Vacant(e) => {
                e.insert(property);
                Outcome::Applied
            }
        }
    }

    /// Remove the property named `property`, with all the relations and annotations mentioning it.
    pub fn remove_property(&mut self, property: &RdfTerm) -> Outcome {
        if self.properties.remove(property).is_none() {
            return Outcome::Unchanged;
        }
        for t in self.relations.taxonomies_mut() {
            t.purge(property);
        }
        for t in self.annotations.taxonomies_mut() {
            t.purge(property);
        }
        Outcome::Applied
    }

    /// The property named `property`, if any.
    pub fn select_property(&self, property: &RdfTerm) -> Option<&OntologyProperty> {
        self.properties.get(property)
    }

    /// All properties of this model, in no particular order.
    pub fn properties(&self) -> impl Iterator<Item = &OntologyProperty> + '_ {
        self.properties.values()
    }

    /// The number of properties, of any kind.
    pub fn properties_count(&self) -> usize {
        self.properties.len()
    }

    /// The number of annotation properties.
    pub fn annotation_properties_count(&self) -> usize {
        self.properties().filter(|p| p.is_annotation()).count()
    }

    /// The number of object properties.
    pub fn object_properties_count(&self) -> usize {
        self.properties().filter(|p| p.is_object()).count()
    }

    /// The number of datatype properties.
    pub fn datatype_properties_count(&self) -> usize {
        self.properties().filter(|p| p.is_datatype()).count()
    }

    /// The number of functional properties, of any kind.
    pub fn functional_properties_count(&self) -> usize {
        self.properties().filter(|p| p.is_functional()).count()
    }

    /// The number of deprecated properties.
    pub fn deprecated_properties_count(&self) -> usize {
        self.properties().filter(|p| p.is_deprecated()).count()
    }

    /// The relations between the properties of this model.
    pub fn relations(&self) -> &PropertyRelations {
        &self.relations
    }

    fn register(&mut self, property: &OntologyProperty) {
        if !self.properties.contains_key(property.value()) {
            self.properties
                .insert(property.value().clone(), property.clone());
        }
    }

    /// Add `child rdfs:subPropertyOf mother`.
    ///
    /// Both properties must be object properties, or both must be datatype properties.
    /// Rejected if `mother` is already a sub-property of `child` or equivalent to it.
    pub fn add_sub_property_of_relation(
        &mut self,
        child: &OntologyProperty,
        mother: &OntologyProperty,
    ) -> Outcome {
        const REL: &str = "rdfs:subPropertyOf";
        if let Err(rejection) = check_pair(child, mother, REL) {
            return Outcome::reject(rejection);
        }
        let (c, m) = (child.value(), mother.value());
        let p = rdfs::subPropertyOf.into();
        if self.relations.sub_property_of.contains(c, &p, m) {
            return Outcome::Unchanged;
        }
        let conflict = {
            let h = Hierarchy::of_properties(&self.relations);
            if h.supers(m).contains(c) {
                Some("subsumption")
            } else if h.equivalents(m).contains(c) {
                Some("equivalence")
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
        Outcome::changed(self.relations.sub_property_of.add_entry(entry))
    }

    /// Add `a owl:equivalentProperty b` (and its reverse, as an inference).
    ///
    /// Both properties must be object properties, or both must be datatype properties.
    /// Rejected if one is a sub-property of the other.
    pub fn add_equivalent_property_relation(
        &mut self,
        a: &OntologyProperty,
        b: &OntologyProperty,
    ) -> Outcome {
        const REL: &str = "owl:equivalentProperty";
        if let Err(rejection) = check_pair(a, b, REL) {
            return Outcome::reject(rejection);
        }
        let (x, y) = (a.value(), b.value());
        let p = owl::equivalentProperty.into();
        if self.relations.equivalent_property.contains(x, &p, y) {
            return Outcome::Unchanged;
        }
        let subsumed = {
            let h = Hierarchy::of_properties(&self.relations);
            h.supers(x).contains(y) || h.subs(x).contains(y)
        };
        if subsumed {
            return Outcome::reject(Rejection::conflict(x, REL, y, "subsumption"));
        }
        self.register(a);
        self.register(b);
        Outcome::changed(self.relations.equivalent_property.add_pair(x, &p, y))
    }

    /// Add `a owl:inverseOf b` (and its reverse, as an inference).
    ///
    /// Both properties must be distinct object properties.
    pub fn add_inverse_of_relation(&mut self, a: &OntologyProperty, b: &OntologyProperty) -> Outcome {
        const REL: &str = "owl:inverseOf";
        if let Err(rejection) = check_pair(a, b, REL) {
            return Outcome::reject(rejection);
        }
        if !a.is_object() {
            return Outcome::reject(Rejection::kind_mismatch(a, "an object property"));
        }
        self.register(a);
        self.register(b);
        let p = owl::inverseOf.into();
        Outcome::changed(self.relations.inverse_of.add_pair(a.value(), &p, b.value()))
    }

    /// Remove `child rdfs:subPropertyOf mother`.
    pub fn remove_sub_property_of_relation(
        &mut self,
        child: &OntologyProperty,
        mother: &OntologyProperty,
    ) -> Outcome {
        let p = rdfs::subPropertyOf.into();
        Outcome::changed(
            self.relations
                .sub_property_of
                .remove(child.value(), &p, mother.value()),
        )
    }

    /// Remove `a owl:equivalentProperty b`, in both directions.
    pub fn remove_equivalent_property_relation(
        &mut self,
        a: &OntologyProperty,
        b: &OntologyProperty,
    ) -> Outcome {
        let p = owl::equivalentProperty.into();
        Outcome::changed(
            self.relations
                .equivalent_property
                .remove_pair(a.value(), &p, b.value()),
        )
    }

    /// Remove `a owl:inverseOf b`, in both directions.
    pub fn remove_inverse_of_relation(
        &mut self,
        a: &OntologyProperty,
        b: &OntologyProperty,
    ) -> Outcome {
        let p = owl::inverseOf.into();
        Outcome::changed(
            self.relations
                .inverse_of
                .remove_pair(a.value(), &p, b.value()),
        )
    }

    /// The properties and relations common to `self` and `other`.
    pub fn intersect_with(&self, other: &Self) -> Self {
        PropertyModel {
            properties: self
                .properties
                .iter()
                .filter(|(k, _)| other.properties.contains_key(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            relations: self.relations.intersect_with(&other.relations),
            annotations: self.annotations.intersect_with(&other.annotations),
        }
    }

    /// The properties and relations of `self` and `other`
    /// (properties of `self` win over those of `other` with the same value).
    pub fn union_with(&self, other: &Self) -> Self {
        let mut properties = self.properties.clone();
        for (k, v) in &other.properties {
            properties.entry(k.clone()).or_insert_with(|| v.clone());
        }
        PropertyModel {
            properties,
            relations: self.relations.union_with(&other.relations),
            annotations: self.annotations.union_with(&other.annotations),
        }
    }

    /// The properties and relations of `self` that are not in `other`.
    pub fn difference_with(&self, other: &Self) -> Self {
        PropertyModel {
            properties: self
                .properties
                .iter()
                .filter(|(k, _)| !other.properties.contains_key(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            relations: self.relations.difference_with(&other.relations),
            annotations: self.annotations.difference_with(&other.annotations),
        }
    }

    /// Export this model as a graph.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        for property in self.properties() {
            export_property(property, &mut graph);
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

/// Check that `a` and `b` can be related by `relation`.
fn check_pair(
    a: &OntologyProperty,
    b: &OntologyProperty,
    relation: &'static str,
) -> Result<(), Rejection> {
    if a == b {
        return Err(Rejection::SelfRelation(a.to_string(), relation));
    }
    for p in [a, b] {
        if p.is_annotation() {
            return Err(Rejection::kind_mismatch(p, "an object or datatype property"));
        }
        if ns::is_reserved_property(p.value()) {
            return Err(Rejection::ReservedProperty(p.to_string()));
        }
    }
    if !a.same_kind(b) {
        let expected = if a.is_object() {
            "an object property"
        } else {
            "a datatype property"
        };
        return Err(Rejection::kind_mismatch(b, expected));
    }
    Ok(())
}

pub(crate) fn export_property(property: &OntologyProperty, graph: &mut OntologyGraph) {
    let p = property.value();
    match property.kind() {
        PropertyKind::Annotation => insert_triple(graph, p, rdf::type_, owl::AnnotationProperty),
        PropertyKind::Datatype => insert_triple(graph, p, rdf::type_, owl::DatatypeProperty),
        PropertyKind::Object(flags) => {
            insert_triple(graph, p, rdf::type_, owl::ObjectProperty);
            if flags.symmetric {
                insert_triple(graph, p, rdf::type_, owl::SymmetricProperty);
            }
            if flags.transitive {
                insert_triple(graph, p, rdf::type_, owl::TransitiveProperty);
            }
            if flags.inverse_functional {
                insert_triple(graph, p, rdf::type_, owl::InverseFunctionalProperty);
            }
        }
    }
    if property.is_functional() {
        insert_triple(graph, p, rdf::type_, owl::FunctionalProperty);
    }
    if property.is_deprecated() {
        insert_triple(graph, p, rdf::type_, owl::DeprecatedProperty);
    }
    if let Some(domain) = property.domain() {
        insert_triple(graph, p, rdfs::domain, domain.value().clone());
    }
    if let Some(range) = property.range() {
        insert_triple(graph, p, rdfs::range, range.value().clone());
    }
}

impl AnnotatedModel for PropertyModel {
    type Entity = OntologyProperty;

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }

    fn check_annotation_target(&self, entity: &OntologyProperty) -> Result<(), Rejection> {
        if entity.is_annotation() {
            Err(Rejection::AnnotationPropertyTarget(entity.to_string()))
        } else if ns::is_reserved_property(entity.value()) {
            Err(Rejection::ReservedProperty(entity.to_string()))
        } else {
            Ok(())
        }
    }

    fn declare_entity(&mut self, property: &OntologyProperty) {
        self.register(property);
    }
}

#[cfg(test)]
mod test;
