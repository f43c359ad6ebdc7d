//! I define [`Ontology`], the top-level aggregate of this crate.
use sophia_api::ns::{rdf, rdfs};

use crate::entity::{OntologyLiteral, OntologyProperty, OntologyResource};
use crate::error::{OntologyError, Result};
use crate::metadata::{check_custom_annotation, AnnotatedModel, Annotations, Metadata};
use crate::ns::{self, owl};
use crate::outcome::{Outcome, Rejection};
use crate::property_model::export_property;
use crate::taxonomy::{insert_triple, OntologyGraph, Taxonomy, TaxonomyEntry};
use crate::term::RdfTerm;
use crate::validation::{ValidationReport, Validator};
use crate::{ClassModel, Data, PropertyModel};

mod _graph;

/// The schema of an ontology (a.k.a. its TBox).
#[derive(Clone, Debug, Default)]
pub struct OntologyModel {
    /// The classes and their relations
    pub class_model: ClassModel,
    /// The properties and their relations
    pub property_model: PropertyModel,
}

impl OntologyModel {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both models intersected with their counterparts in `other`.
    pub fn intersect_with(&self, other: &Self) -> Self {
        OntologyModel {
            class_model: self.class_model.intersect_with(&other.class_model),
            property_model: self.property_model.intersect_with(&other.property_model),
        }
    }

    /// Both models merged with their counterparts in `other`.
    pub fn union_with(&self, other: &Self) -> Self {
        OntologyModel {
            class_model: self.class_model.union_with(&other.class_model),
            property_model: self.property_model.union_with(&other.property_model),
        }
    }

    /// Both models, minus what their counterparts in `other` contain.
    pub fn difference_with(&self, other: &Self) -> Self {
        OntologyModel {
            class_model: self.class_model.difference_with(&other.class_model),
            property_model: self.property_model.difference_with(&other.property_model),
        }
    }

    /// Export the class model, then the property model.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = self.class_model.to_graph(include_inferences);
        graph.extend(self.property_model.to_graph(include_inferences));
        graph
    }
}

/// An OWL ontology: a named [model](OntologyModel), its [data](Data),
/// and the annotations of the ontology itself.
///
/// ```
/// use sophia_ontology::prelude::*;
/// # fn main() -> Result<(), OntologyError> {
/// let mut ontology = Ontology::new(RdfTerm::iri("http://example.org/zoo")?)?;
/// let label = OntologyLiteral::new(RdfTerm::lang_literal("Zoo", "en")?)?;
/// assert!(ontology.add_label_annotation(&label).is_applied());
///
/// let graph = ontology.to_graph(false);
/// assert_eq!(graph.len(), 2);
/// let copy = Ontology::from_graph(&graph)?;
/// assert_eq!(copy.to_graph(false), graph);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct Ontology {
    value: RdfTerm,
    model: OntologyModel,
    data: Data,
    annotations: Annotations,
}

impl Ontology {
    /// Build an empty ontology named `value`, which must be an IRI or a blank node.
    pub fn new(value: RdfTerm) -> Result<Self> {
        if value.is_literal() {
            return Err(OntologyError::InvalidOntologyName(value.to_string()));
        }
        Ok(Ontology {
            value,
            model: OntologyModel::default(),
            data: Data::default(),
            annotations: Annotations::default(),
        })
    }

    /// An empty ontology with a fresh name in [`DEFAULT_NAMESPACE`](ns::DEFAULT_NAMESPACE).
    fn anonymous() -> Self {
        Ontology {
            value: ns::fresh_default_name(),
            model: OntologyModel::default(),
            data: Data::default(),
            annotations: Annotations::default(),
        }
    }

    /// The name of this ontology.
    pub fn value(&self) -> &RdfTerm {
        &self.value
    }

    /// The schema of this ontology.
    pub fn model(&self) -> &OntologyModel {
        &self.model
    }

    /// The schema of this ontology, for mutation.
    pub fn model_mut(&mut self) -> &mut OntologyModel {
        &mut self.model
    }

    /// The facts and literals of this ontology.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// The facts and literals of this ontology, for mutation.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// The annotations of the ontology itself.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn annotate(
        &mut self,
        predicate: RdfTerm,
        value: &RdfTerm,
        taxonomy: fn(&mut Annotations) -> &mut Taxonomy,
    ) -> Outcome {
        let entry = TaxonomyEntry::new_unchecked(self.value.clone(), predicate, value.clone());
        Outcome::changed(taxonomy(&mut self.annotations).add_entry(entry))
    }

    fn annotate_with_ontology(
        &mut self,
        predicate: RdfTerm,
        other: &RdfTerm,
        taxonomy: fn(&mut Annotations) -> &mut Taxonomy,
    ) -> Outcome {
        if other.is_literal() {
            return Outcome::reject(Rejection::kind_mismatch(other, "an ontology"));
        }
        self.annotate(predicate, other, taxonomy)
    }

    fn unannotate(
        &mut self,
        predicate: RdfTerm,
        value: &RdfTerm,
        taxonomy: fn(&mut Annotations) -> &mut Taxonomy,
    ) -> Outcome {
        let t = taxonomy(&mut self.annotations);
        Outcome::changed(t.remove(&self.value, &predicate, value))
    }

    /// Add `owl:versionInfo`.
    pub fn add_version_info_annotation(&mut self, version_info: &OntologyLiteral) -> Outcome {
        let p = owl::versionInfo.into();
        self.annotate(p, version_info.value(), |a| &mut a.version_info)
    }

    /// Add `rdfs:comment`.
    pub fn add_comment_annotation(&mut self, comment: &OntologyLiteral) -> Outcome {
        self.annotate(rdfs::comment.into(), comment.value(), |a| &mut a.comment)
    }

    /// Add `rdfs:label`.
    pub fn add_label_annotation(&mut self, label: &OntologyLiteral) -> Outcome {
        self.annotate(rdfs::label.into(), label.value(), |a| &mut a.label)
    }

    /// Add `rdfs:seeAlso`.
    pub fn add_see_also_annotation(&mut self, see_also: &RdfTerm) -> Outcome {
        self.annotate(rdfs::seeAlso.into(), see_also, |a| &mut a.see_also)
    }

    /// Add `rdfs:isDefinedBy`.
    pub fn add_is_defined_by_annotation(&mut self, defined_by: &RdfTerm) -> Outcome {
        let p = rdfs::isDefinedBy.into();
        self.annotate(p, defined_by, |a| &mut a.is_defined_by)
    }

    /// Add `owl:priorVersion`; `prior` must name an ontology.
    pub fn add_prior_version_annotation(&mut self, prior: &RdfTerm) -> Outcome {
        let p = owl::priorVersion.into();
        self.annotate_with_ontology(p, prior, |a| &mut a.prior_version)
    }

    /// Add `owl:backwardCompatibleWith`; `other` must name an ontology.
    pub fn add_backward_compatible_with_annotation(&mut self, other: &RdfTerm) -> Outcome {
        let p = owl::backwardCompatibleWith.into();
        self.annotate_with_ontology(p, other, |a| &mut a.backward_compatible_with)
    }

    /// Add `owl:incompatibleWith`; `other` must name an ontology.
    pub fn add_incompatible_with_annotation(&mut self, other: &RdfTerm) -> Outcome {
        let p = owl::incompatibleWith.into();
        self.annotate_with_ontology(p, other, |a| &mut a.incompatible_with)
    }

    /// Add `owl:imports`; `imported` must name an ontology.
    pub fn add_imports_annotation(&mut self, imported: &RdfTerm) -> Outcome {
        let p = owl::imports.into();
        self.annotate_with_ontology(p, imported, |a| &mut a.imports)
    }

    /// Annotate the ontology through `property`,
    /// which must be an annotation property outside the reserved vocabulary.
    pub fn add_custom_annotation(&mut self, property: &OntologyProperty, value: &RdfTerm) -> Outcome {
        if let Err(rejection) = check_custom_annotation(property) {
            return Outcome::reject(rejection);
        }
        let p = property.value().clone();
        self.annotate(p, value, |a| &mut a.custom_annotations)
    }

    /// Remove `owl:versionInfo`.
    pub fn remove_version_info_annotation(&mut self, version_info: &OntologyLiteral) -> Outcome {
        let p = owl::versionInfo.into();
        self.unannotate(p, version_info.value(), |a| &mut a.version_info)
    }

    /// Remove `rdfs:comment`.
    pub fn remove_comment_annotation(&mut self, comment: &OntologyLiteral) -> Outcome {
        self.unannotate(rdfs::comment.into(), comment.value(), |a| &mut a.comment)
    }

    /// Remove `rdfs:label`.
    pub fn remove_label_annotation(&mut self, label: &OntologyLiteral) -> Outcome {
        self.unannotate(rdfs::label.into(), label.value(), |a| &mut a.label)
    }

    /// Remove `rdfs:seeAlso`.
    pub fn remove_see_also_annotation(&mut self, see_also: &RdfTerm) -> Outcome {
        self.unannotate(rdfs::seeAlso.into(), see_also, |a| &mut a.see_also)
    }

    /// Remove `rdfs:isDefinedBy`.
    pub fn remove_is_defined_by_annotation(&mut self, defined_by: &RdfTerm) -> Outcome {
        let p = rdfs::isDefinedBy.into();
        self.unannotate(p, defined_by, |a| &mut a.is_defined_by)
    }

    /// Remove `owl:priorVersion`.
    pub fn remove_prior_version_annotation(&mut self, prior: &RdfTerm) -> Outcome {
        let p = owl::priorVersion.into();
        self.unannotate(p, prior, |a| &mut a.prior_version)
    }

    /// Remove `owl:backwardCompatibleWith`.
    pub fn remove_backward_compatible_with_annotation(&mut self, other: &RdfTerm) -> Outcome {
        let p = owl::backwardCompatibleWith.into();
        self.unannotate(p, other, |a| &mut a.backward_compatible_with)
    }

    /// Remove `owl:incompatibleWith`.
    pub fn remove_incompatible_with_annotation(&mut self, other: &RdfTerm) -> Outcome {
        let p = owl::incompatibleWith.into();
        self.unannotate(p, other, |a| &mut a.incompatible_with)
    }

    /// Remove `owl:imports`.
    pub fn remove_imports_annotation(&mut self, imported: &RdfTerm) -> Outcome {
        self.unannotate(owl::imports.into(), imported, |a| &mut a.imports)
    }

    /// Remove an annotation made through `property`.
    pub fn remove_custom_annotation(
        &mut self,
        property: &OntologyProperty,
        value: &RdfTerm,
    ) -> Outcome {
        let p = property.value().clone();
        self.unannotate(p, value, |a| &mut a.custom_annotations)
    }

    /// Add everything from `other` into this ontology, which keeps its name.
    ///
    /// Entities present in both ontologies are kept as they are in `self`.
    /// Relations are merged as is, without being checked against each other.
    pub fn merge(&mut self, other: &Ontology) {
        log::trace!("merging {} into {}", other.value, self.value);
        self.model = self.model.union_with(&other.model);
        self.data = self.data.union_with(&other.data);
        self.annotations = self.annotations.union_with(&other.annotations);
    }

    /// An anonymous ontology with everything common to `self` and `other`.
    ///
    /// The annotations of the ontologies themselves are compared regardless of their names.
    pub fn intersect_with(&self, other: &Ontology) -> Ontology {
        self.combine(
            other,
            OntologyModel::intersect_with,
            Data::intersect_with,
            <Annotations as Metadata>::intersect_with,
        )
    }

    /// An anonymous ontology with everything from `self` and `other`.
    pub fn union_with(&self, other: &Ontology) -> Ontology {
        self.combine(
            other,
            OntologyModel::union_with,
            Data::union_with,
            <Annotations as Metadata>::union_with,
        )
    }

    /// An anonymous ontology with everything from `self` that is not in `other`.
    pub fn difference_with(&self, other: &Ontology) -> Ontology {
        self.combine(
            other,
            OntologyModel::difference_with,
            Data::difference_with,
            <Annotations as Metadata>::difference_with,
        )
    }

    fn combine(
        &self,
        other: &Ontology,
        model: fn(&OntologyModel, &OntologyModel) -> OntologyModel,
        data: fn(&Data, &Data) -> Data,
        annotations: fn(&Annotations, &Annotations) -> Annotations,
    ) -> Ontology {
        let mut result = Ontology::anonymous();
        result.model = model(&self.model, &other.model);
        result.data = data(&self.data, &other.data);
        let mine = self.renamed_annotations(&result.value);
        let theirs = other.renamed_annotations(&result.value);
        result.annotations = annotations(&mine, &theirs);
        result
    }

    /// The annotations of this ontology, as if it was named `name`
    fn renamed_annotations(&self, name: &RdfTerm) -> Annotations {
        let mut renamed = Annotations::default();
        for (target, source) in renamed
            .taxonomies_mut()
            .into_iter()
            .zip(self.annotations.taxonomies())
        {
            *target = source
                .iter()
                .map(|e| {
                    TaxonomyEntry::new_unchecked(
                        name.clone(),
                        e.predicate().clone(),
                        e.object().clone(),
                    )
                })
                .collect();
        }
        renamed
    }

    /// Check this ontology with `validator`.
    pub fn validate(&self, validator: &impl Validator) -> ValidationReport {
        validator.validate(self)
    }

    /// Export this ontology as a graph.
    ///
    /// Symmetric relations are asserted in one direction only;
    /// with `include_inferences`, their reverse is exported as well.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        insert_triple(&mut graph, &self.value, rdf::type_, owl::Ontology);
        for t in self.annotations.taxonomies() {
            t.export_into(&mut graph, include_inferences);
        }
        graph.extend(self.model.to_graph(include_inferences));
        graph.extend(self.data.to_graph(include_inferences));
        self.export_undeclared_properties(&mut graph);
        graph
    }

    /// Declare the properties used by restrictions or custom annotations
    /// that are missing from the property model.
    fn export_undeclared_properties(&self, graph: &mut OntologyGraph) {
        let properties = &self.model.property_model;
        for class in self.model.class_model.classes() {
            if let Some(restriction) = class.restriction_def() {
                if properties.select_property(restriction.on_property()).is_none() {
                    export_property(restriction.property(), graph);
                }
            }
        }
        let annotations = [
            &self.annotations,
            self.model.class_model.annotations(),
            self.model.property_model.annotations(),
            self.data.annotations(),
        ];
        for e in annotations.into_iter().flat_map(|a| a.custom_annotations.iter()) {
            if properties.select_property(e.predicate()).is_none() {
                insert_triple(graph, e.predicate(), rdf::type_, owl::AnnotationProperty);
            }
        }
    }
}

#[cfg(test)]
mod test;
