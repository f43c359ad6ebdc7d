//! I define the metadata bundles of ontology models,
//! i.e. named groups of [taxonomies](Taxonomy).
//!
//! Each model has an [`Annotations`] bundle,
//! and a relations bundle specific to its kind of entities
//! ([`ClassRelations`], [`PropertyRelations`] or [`DataRelations`]).
//! All bundles implement [`Metadata`].
use sophia_api::ns::rdfs;

use crate::entity::{OntologyLiteral, OntologyProperty, OntologyResource};
use crate::ns::{self, owl};
use crate::outcome::{Outcome, Rejection};
use crate::taxonomy::{OntologyGraph, Taxonomy, TaxonomyEntry};
use crate::term::RdfTerm;

/// A fixed group of taxonomies.
pub trait Metadata: Default + Sized {
    /// The taxonomies of this bundle, always in the same order
    fn taxonomies(&self) -> Vec<&Taxonomy>;

    /// The taxonomies of this bundle, in the same order as [`Metadata::taxonomies`]
    fn taxonomies_mut(&mut self) -> Vec<&mut Taxonomy>;

    /// Total number of entries
    fn entries_count(&self) -> usize {
        self.taxonomies().iter().map(|t| t.len()).sum()
    }

    /// Whether all taxonomies are empty
    fn is_empty(&self) -> bool {
        self.taxonomies().iter().all(|t| t.is_empty())
    }

    /// Intersect each taxonomy with its counterpart in `other`.
    fn intersect_with(&self, other: &Self) -> Self {
        combine(self, other, Taxonomy::intersect_with)
    }

    /// Unite each taxonomy with its counterpart in `other`.
    fn union_with(&self, other: &Self) -> Self {
        combine(self, other, Taxonomy::union_with)
    }

    /// Subtract from each taxonomy its counterpart in `other`.
    fn difference_with(&self, other: &Self) -> Self {
        combine(self, other, Taxonomy::difference_with)
    }

    /// Export all entries of this bundle.
    fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        for t in self.taxonomies() {
            t.export_into(&mut graph, include_inferences);
        }
        graph
    }
}

fn combine<M: Metadata>(a: &M, b: &M, op: fn(&Taxonomy, &Taxonomy) -> Taxonomy) -> M {
    let mut result = M::default();
    for ((r, ta), tb) in result
        .taxonomies_mut()
        .into_iter()
        .zip(a.taxonomies())
        .zip(b.taxonomies())
    {
        *r = op(ta, tb);
    }
    result
}

macro_rules! metadata {
    ($(#[$attr:meta])* $name:ident { $($(#[$fattr:meta])* $field:ident,)* }) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$fattr])*
                pub $field: Taxonomy,
            )*
        }

        impl Metadata for $name {
            fn taxonomies(&self) -> Vec<&Taxonomy> {
                vec![$(&self.$field),*]
            }

            fn taxonomies_mut(&mut self) -> Vec<&mut Taxonomy> {
                vec![$(&mut self.$field),*]
            }
        }
    };
}

metadata! {
    /// Annotations of entities (or of the ontology itself).
    Annotations {
        /// `owl:versionInfo`
        version_info,
        /// `rdfs:comment`
        comment,
        /// `rdfs:label`
        label,
        /// `rdfs:seeAlso`
        see_also,
        /// `rdfs:isDefinedBy`
        is_defined_by,
        /// `owl:priorVersion` (ontology only)
        prior_version,
        /// `owl:backwardCompatibleWith` (ontology only)
        backward_compatible_with,
        /// `owl:incompatibleWith` (ontology only)
        incompatible_with,
        /// `owl:imports` (ontology only)
        imports,
        /// Annotations through user-defined annotation properties
        custom_annotations,
    }
}

metadata! {
    /// Relations between classes.
    ClassRelations {
        /// `rdfs:subClassOf`
        sub_class_of,
        /// `owl:equivalentClass` (symmetric)
        equivalent_class,
        /// `owl:disjointWith` (symmetric)
        disjoint_with,
        /// `owl:oneOf`, members of enumerates and data ranges
        one_of,
        /// `owl:intersectionOf`, members of intersection classes
        intersection_of,
        /// `owl:unionOf`, members of union classes
        union_of,
    }
}

metadata! {
    /// Relations between properties.
    PropertyRelations {
        /// `rdfs:subPropertyOf`
        sub_property_of,
        /// `owl:equivalentProperty` (symmetric)
        equivalent_property,
        /// `owl:inverseOf` (symmetric)
        inverse_of,
    }
}

metadata! {
    /// Relations between facts, classes and literals.
    DataRelations {
        /// `rdf:type`
        class_type,
        /// `owl:sameAs` (symmetric)
        same_as,
        /// `owl:differentFrom` (symmetric)
        different_from,
        /// Facts related by object or datatype properties
        assertions,
    }
}

/// A model whose entities can be annotated.
///
/// Only [`add_custom_annotation`](AnnotatedModel::add_custom_annotation) accepts
/// an arbitrary predicate, which must be a non-reserved annotation property.
pub trait AnnotatedModel {
    /// The type of the entities of this model.
    type Entity: OntologyResource;

    /// The annotations of the entities of this model.
    fn annotations(&self) -> &Annotations;

    #[doc(hidden)]
    fn annotations_mut(&mut self) -> &mut Annotations;

    /// Check whether `entity` can be annotated.
    fn check_annotation_target(&self, _entity: &Self::Entity) -> Result<(), Rejection> {
        Ok(())
    }

    /// Add `entity` to this model, unless it is already there.
    #[doc(hidden)]
    fn declare_entity(&mut self, entity: &Self::Entity);

    /// Add `entity owl:versionInfo version_info`.
    fn add_version_info_annotation(
        &mut self,
        entity: &Self::Entity,
        version_info: &OntologyLiteral,
    ) -> Outcome {
        let p = owl::versionInfo.into();
        annotate(self, entity, p, version_info.value(), |a| &mut a.version_info)
    }

    /// Add `entity rdfs:comment comment`.
    fn add_comment_annotation(&mut self, entity: &Self::Entity, comment: &OntologyLiteral) -> Outcome {
        let p = rdfs::comment.into();
        annotate(self, entity, p, comment.value(), |a| &mut a.comment)
    }

    /// Add `entity rdfs:label label`.
    fn add_label_annotation(&mut self, entity: &Self::Entity, label: &OntologyLiteral) -> Outcome {
        let p = rdfs::label.into();
        annotate(self, entity, p, label.value(), |a| &mut a.label)
    }

    /// Add `entity rdfs:seeAlso see_also`.
    fn add_see_also_annotation(&mut self, entity: &Self::Entity, see_also: &RdfTerm) -> Outcome {
        let p = rdfs::seeAlso.into();
        annotate(self, entity, p, see_also, |a| &mut a.see_also)
    }

    /// Add `entity rdfs:isDefinedBy defined_by`.
    fn add_is_defined_by_annotation(
        &mut self,
        entity: &Self::Entity,
        defined_by: &RdfTerm,
    ) -> Outcome {
        let p = rdfs::isDefinedBy.into();
        annotate(self, entity, p, defined_by, |a| &mut a.is_defined_by)
    }

    /// Annotate `entity` through `property`,
    /// which must be an annotation property outside the reserved vocabulary.
    fn add_custom_annotation(
        &mut self,
        property: &OntologyProperty,
        entity: &Self::Entity,
        value: &RdfTerm,
    ) -> Outcome {
        if let Err(rejection) = check_custom_annotation(property) {
            return Outcome::reject(rejection);
        }
        let p = property.value().clone();
        annotate(self, entity, p, value, |a| &mut a.custom_annotations)
    }

    /// Remove `entity owl:versionInfo version_info`.
    fn remove_version_info_annotation(
        &mut self,
        entity: &Self::Entity,
        version_info: &OntologyLiteral,
    ) -> Outcome {
        let t = &mut self.annotations_mut().version_info;
        unannotate(t, entity, owl::versionInfo.into(), version_info.value())
    }

    /// Remove `entity rdfs:comment comment`.
    fn remove_comment_annotation(
        &mut self,
        entity: &Self::Entity,
        comment: &OntologyLiteral,
    ) -> Outcome {
        let t = &mut self.annotations_mut().comment;
        unannotate(t, entity, rdfs::comment.into(), comment.value())
    }

    /// Remove `entity rdfs:label label`.
    fn remove_label_annotation(&mut self, entity: &Self::Entity, label: &OntologyLiteral) -> Outcome {
        let t = &mut self.annotations_mut().label;
        unannotate(t, entity, rdfs::label.into(), label.value())
    }

    /// Remove `entity rdfs:seeAlso see_also`.
    fn remove_see_also_annotation(&mut self, entity: &Self::Entity, see_also: &RdfTerm) -> Outcome {
        let t = &mut self.annotations_mut().see_also;
        unannotate(t, entity, rdfs::seeAlso.into(), see_also)
    }

    /// Remove `entity rdfs:isDefinedBy defined_by`.
    fn remove_is_defined_by_annotation(
        &mut self,
        entity: &Self::Entity,
        defined_by: &RdfTerm,
    ) -> Outcome {
        let t = &mut self.annotations_mut().is_defined_by;
        unannotate(t, entity, rdfs::isDefinedBy.into(), defined_by)
    }

    /// Remove `entity property value`.
    fn remove_custom_annotation(
        &mut self,
        property: &OntologyProperty,
        entity: &Self::Entity,
        value: &RdfTerm,
    ) -> Outcome {
        let t = &mut self.annotations_mut().custom_annotations;
        unannotate(t, entity, property.value().clone(), value)
    }
}

/// Check that `property` can be used as a custom annotation.
pub(crate) fn check_custom_annotation(property: &OntologyProperty) -> Result<(), Rejection> {
    if ns::is_reserved_annotation(property.value()) {
        Err(Rejection::ReservedAnnotation(property.to_string()))
    } else if !property.is_annotation() {
        Err(Rejection::kind_mismatch(property, "an annotation property"))
    } else {
        Ok(())
    }
}

fn annotate<M: AnnotatedModel + ?Sized>(
    model: &mut M,
    entity: &M::Entity,
    predicate: RdfTerm,
    value: &RdfTerm,
    taxonomy: fn(&mut Annotations) -> &mut Taxonomy,
) -> Outcome {
    if let Err(rejection) = model.check_annotation_target(entity) {
        return Outcome::reject(rejection);
    }
    model.declare_entity(entity);
    let entry = TaxonomyEntry::new_unchecked(entity.value().clone(), predicate, value.clone());
    Outcome::changed(taxonomy(model.annotations_mut()).add_entry(entry))
}

fn unannotate(
    taxonomy: &mut Taxonomy,
    entity: &impl OntologyResource,
    predicate: RdfTerm,
    value: &RdfTerm,
) -> Outcome {
    Outcome::changed(taxonomy.remove(entity.value(), &predicate, value))
}
