//! Reading an [`Ontology`] from an RDF graph.
use std::collections::{HashMap, HashSet};

use sophia_api::graph::Graph;
use sophia_api::term::TryFromTerm;
use sophia_api::triple::Triple;

use super::*;
use crate::entity::{ObjectFlags, OntologyClass, OntologyFact, RestrictionFacet};
use crate::metadata::AnnotatedModel;

/// The predicates with a dedicated meaning in an ontology graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Vocab {
    Type,
    First,
    Rest,
    SubClassOf,
    EquivalentClass,
    DisjointWith,
    OneOf,
    UnionOf,
    IntersectionOf,
    ComplementOf,
    OnProperty,
    AllValuesFrom,
    SomeValuesFrom,
    HasValue,
    Cardinality,
    MinCardinality,
    MaxCardinality,
    SubPropertyOf,
    EquivalentProperty,
    InverseOf,
    Domain,
    Range,
    SameAs,
    DifferentFrom,
    Annotation(Reserved),
}

/// The reserved annotation predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reserved {
    VersionInfo,
    Comment,
    Label,
    SeeAlso,
    IsDefinedBy,
    PriorVersion,
    BackwardCompatibleWith,
    IncompatibleWith,
    Imports,
}

lazy_static::lazy_static! {
    static ref VOCAB: HashMap<String, Vocab> = {
        use Reserved::*;
        use Vocab::*;
        [
            (rdf::type_, Type),
            (rdf::first, First),
            (rdf::rest, Rest),
            (rdfs::subClassOf, SubClassOf),
            (owl::equivalentClass, EquivalentClass),
            (owl::disjointWith, DisjointWith),
            (owl::oneOf, OneOf),
            (owl::unionOf, UnionOf),
            (owl::intersectionOf, IntersectionOf),
            (owl::complementOf, ComplementOf),
            (owl::onProperty, OnProperty),
            (owl::allValuesFrom, AllValuesFrom),
            (owl::someValuesFrom, SomeValuesFrom),
            (owl::hasValue, HasValue),
            (owl::cardinality, Cardinality),
            (owl::minCardinality, MinCardinality),
            (owl::maxCardinality, MaxCardinality),
            (rdfs::subPropertyOf, SubPropertyOf),
            (owl::equivalentProperty, EquivalentProperty),
            (owl::inverseOf, InverseOf),
            (rdfs::domain, Domain),
            (rdfs::range, Range),
            (owl::sameAs, SameAs),
            (owl::differentFrom, DifferentFrom),
            (owl::versionInfo, Annotation(VersionInfo)),
            (rdfs::comment, Annotation(Comment)),
            (rdfs::label, Annotation(Label)),
            (rdfs::seeAlso, Annotation(SeeAlso)),
            (rdfs::isDefinedBy, Annotation(IsDefinedBy)),
            (owl::priorVersion, Annotation(PriorVersion)),
            (owl::backwardCompatibleWith, Annotation(BackwardCompatibleWith)),
            (owl::incompatibleWith, Annotation(IncompatibleWith)),
            (owl::imports, Annotation(Imports)),
        ]
        .into_iter()
        .map(|(iri, v)| (iri.to_string(), v))
        .collect()
    };
}

lazy_static::lazy_static! {
    /// Types used to declare the entities of an ontology.
    static ref DECLARATIONS: HashSet<String> = [
        owl::Ontology,
        owl::Class,
        owl::Restriction,
        owl::DataRange,
        owl::DeprecatedClass,
        owl::ObjectProperty,
        owl::DatatypeProperty,
        owl::AnnotationProperty,
        owl::FunctionalProperty,
        owl::InverseFunctionalProperty,
        owl::SymmetricProperty,
        owl::TransitiveProperty,
        owl::DeprecatedProperty,
        owl::NamedIndividual,
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();
}

fn vocab(term: &RdfTerm) -> Option<Vocab> {
    term.as_iri().and_then(|iri| VOCAB.get(iri).copied())
}

/// An annotation, with the predicate it was read from.
enum Annotation {
    Reserved(Reserved),
    Custom(OntologyProperty),
}

/// Turn a rejected mutation into an error about `subject`
fn accept(outcome: Outcome, subject: &RdfTerm) -> Result<()> {
    match outcome {
        Outcome::Rejected(rejection) => Err(OntologyError::malformed(subject, rejection.to_string())),
        _ => Ok(()),
    }
}

fn resource<'a>(term: &'a RdfTerm, subject: &RdfTerm, what: &str) -> Result<&'a RdfTerm> {
    if term.is_resource() {
        Ok(term)
    } else {
        Err(OntologyError::malformed(subject, format!("{what} must not be a literal")))
    }
}

/// The class named `term` in `classes`, or a new simple class
fn class_of(classes: &ClassModel, term: &RdfTerm) -> Result<OntologyClass> {
    match classes.select_class(term) {
        Some(class) => Ok(class.clone()),
        None => OntologyClass::new(term.clone()),
    }
}

fn cardinality(term: &RdfTerm, subject: &RdfTerm) -> Result<u32> {
    term.literal_value()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| OntologyError::malformed(subject, format!("invalid cardinality {term}")))
}

impl Ontology {
    /// Build an ontology from `graph`, as produced by [`Ontology::to_graph`].
    ///
    /// The graph must describe exactly one `owl:Ontology`,
    /// and every triple of the graph must be understood.
    /// In particular, this method fails on
    /// * a literal in subject position, or a term that is neither an IRI, a blank node nor a literal,
    /// * a restriction without a property or a facet,
    /// * a broken or cyclic collection,
    /// * an annotation about an undeclared subject,
    /// * a predicate that is neither part of the ontology vocabulary nor a declared property,
    /// * a relation that the models reject (e.g. two disjoint classes, one sub-class of the other).
    pub fn from_graph<G: Graph>(graph: &G) -> Result<Ontology> {
        let mut triples = Vec::new();
        for t in graph.triples() {
            let t = t.map_err(|e| OntologyError::Graph(e.to_string()))?;
            let s = RdfTerm::try_from_term(t.s())?;
            if s.is_literal() {
                return Err(OntologyError::malformed(&s, "literal in subject position"));
            }
            let p = RdfTerm::try_from_term(t.p())?;
            let o = RdfTerm::try_from_term(t.o())?;
            triples.push([s, p, o]);
        }
        log::trace!("reading an ontology from {} triples", triples.len());
        Reader::new(triples).read()
    }
}

/// Triples of a graph, indexed by subject.
struct Reader {
    triples: Vec<[RdfTerm; 3]>,
    by_subject: HashMap<RdfTerm, Vec<(RdfTerm, RdfTerm)>>,
    list_nodes: HashSet<RdfTerm>,
}

impl Reader {
    fn new(triples: Vec<[RdfTerm; 3]>) -> Self {
        let mut by_subject: HashMap<_, Vec<_>> = HashMap::new();
        for [s, p, o] in &triples {
            by_subject
                .entry(s.clone())
                .or_default()
                .push((p.clone(), o.clone()));
        }
        Reader {
            triples,
            by_subject,
            list_nodes: HashSet::new(),
        }
    }

    fn objects<'s>(&'s self, s: &RdfTerm, p: Vocab) -> impl Iterator<Item = &'s RdfTerm> + 's {
        self.by_subject
            .get(s)
            .into_iter()
            .flatten()
            .filter(move |(pi, _)| vocab(pi) == Some(p))
            .map(|(_, o)| o)
    }

    /// The only object of `s` through `p`, if any.
    fn object(&self, s: &RdfTerm, p: Vocab) -> Result<Option<&RdfTerm>> {
        let mut objects = self.objects(s, p);
        let first = objects.next();
        if objects.next().is_some() {
            return Err(OntologyError::malformed(s, format!("{p:?} must have a single value")));
        }
        Ok(first)
    }

    fn has_type(&self, s: &RdfTerm, t: impl Into<RdfTerm>) -> bool {
        let t = t.into();
        self.objects(s, Vocab::Type).any(|o| o == &t)
    }

    fn subjects_of_type(&self, t: impl Into<RdfTerm>) -> Vec<RdfTerm> {
        let t = t.into();
        let mut subjects: Vec<_> = self
            .triples
            .iter()
            .filter(|[_, p, o]| vocab(p) == Some(Vocab::Type) && o == &t)
            .map(|[s, _, _]| s.clone())
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// The items of the collection starting at `head`.
    fn list(&mut self, head: &RdfTerm) -> Result<Vec<RdfTerm>> {
        let nil = RdfTerm::from(rdf::nil);
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut node = head.clone();
        while node != nil {
            if !visited.insert(node.clone()) {
                return Err(OntologyError::malformed(head, "cyclic collection"));
            }
            let broken = || OntologyError::malformed(head, "broken collection");
            let first = self.object(&node, Vocab::First)?.ok_or_else(broken)?.clone();
            let rest = self.object(&node, Vocab::Rest)?.ok_or_else(broken)?.clone();
            items.push(first);
            node = rest;
        }
        self.list_nodes.extend(visited);
        Ok(items)
    }

    fn read(mut self) -> Result<Ontology> {
        let mut names = self.subjects_of_type(owl::Ontology);
        if names.len() != 1 {
            let reason = format!("expected exactly one owl:Ontology, found {}", names.len());
            return Err(OntologyError::malformed(owl::Ontology, reason));
        }
        let mut ontology = Ontology::new(names.remove(0))?;

        let properties = self.property_kinds()?;
        self.declare_classes(&mut ontology, &properties)?;
        self.declare_properties(&mut ontology, properties)?;
        for fact in self.subjects_of_type(owl::NamedIndividual) {
            ontology.data.add_fact(&OntologyFact::new(fact)?);
        }

        let triples = std::mem::take(&mut self.triples);
        let mut annotations = Vec::new();
        for [s, p, o] in &triples {
            if let Some(annotation) = self.relate(&mut ontology, s, p, o)? {
                annotations.push((s, annotation, o));
            }
        }
        for (s, annotation, o) in annotations {
            annotate(&mut ontology, s, &annotation, o)?;
        }
        Ok(ontology)
    }

    /// Properties declared by the graph, without their domain and range.
    fn property_kinds(&self) -> Result<HashMap<RdfTerm, OntologyProperty>> {
        let mut properties = HashMap::new();
        let declared = [
            self.subjects_of_type(owl::ObjectProperty),
            self.subjects_of_type(owl::DatatypeProperty),
            self.subjects_of_type(owl::AnnotationProperty),
        ];
        for p in declared.into_iter().flatten() {
            if properties.contains_key(&p) {
                continue;
            }
            let object = self.has_type(&p, owl::ObjectProperty);
            let datatype = self.has_type(&p, owl::DatatypeProperty);
            let annotation = self.has_type(&p, owl::AnnotationProperty);
            let property = match (object, datatype, annotation) {
                (true, false, false) => OntologyProperty::object(p.clone())?.with_object_flags(ObjectFlags {
                    symmetric: self.has_type(&p, owl::SymmetricProperty),
                    transitive: self.has_type(&p, owl::TransitiveProperty),
                    inverse_functional: self.has_type(&p, owl::InverseFunctionalProperty),
                }),
                (false, true, false) => OntologyProperty::datatype(p.clone())?,
                (false, false, true) => OntologyProperty::annotation(p.clone())?,
                _ => return Err(OntologyError::malformed(&p, "property with several kinds")),
            };
            let property = if property.is_annotation() {
                property
            } else {
                property.with_functional(self.has_type(&p, owl::FunctionalProperty))
            };
            let deprecated = self.has_type(&p, owl::DeprecatedProperty);
            properties.insert(p, property.with_deprecated(deprecated));
        }
        Ok(properties)
    }

    fn declare_classes(
        &mut self,
        ontology: &mut Ontology,
        properties: &HashMap<RdfTerm, OntologyProperty>,
    ) -> Result<()> {
        let mut declared: Vec<_> = [
            self.subjects_of_type(owl::Class),
            self.subjects_of_type(owl::Restriction),
            self.subjects_of_type(owl::DataRange),
            self.subjects_of_type(owl::DeprecatedClass),
        ]
        .into_iter()
        .flatten()
        .collect();
        declared.sort();
        declared.dedup();

        let classes = &mut ontology.model.class_model;
        let mut members = Vec::new();
        for c in declared {
            let class = if self.has_type(&c, owl::Restriction) {
                self.restriction(&c, properties)?
            } else if self.has_type(&c, owl::DataRange) {
                members.push((c.clone(), Vocab::OneOf));
                OntologyClass::data_range(c.clone())?
            } else {
                let one_of = self.object(&c, Vocab::OneOf)?.is_some();
                let union_of = self.object(&c, Vocab::UnionOf)?.is_some();
                let intersection_of = self.object(&c, Vocab::IntersectionOf)?.is_some();
                let complement_of = self.object(&c, Vocab::ComplementOf)?;
                match (one_of, union_of, intersection_of, complement_of) {
                    (false, false, false, None) => OntologyClass::new(c.clone())?,
                    (true, false, false, None) => {
                        members.push((c.clone(), Vocab::OneOf));
                        OntologyClass::enumerate(c.clone())?
                    }
                    (false, true, false, None) => {
                        members.push((c.clone(), Vocab::UnionOf));
                        OntologyClass::union(c.clone())?
                    }
                    (false, false, true, None) => {
                        members.push((c.clone(), Vocab::IntersectionOf));
                        OntologyClass::intersection(c.clone())?
                    }
                    (false, false, false, Some(of)) => {
                        let of = OntologyClass::new(resource(of, &c, "owl:complementOf")?.clone())?;
                        OntologyClass::complement(c.clone(), &of)?
                    }
                    _ => return Err(OntologyError::malformed(&c, "class with several definitions")),
                }
            };
            let deprecated = self.has_type(&c, owl::DeprecatedClass);
            classes.add_class(class.with_deprecated(deprecated));
        }

        for (c, p) in members {
            let head = self
                .object(&c, p)?
                .cloned()
                .ok_or_else(|| OntologyError::malformed(&c, format!("{p:?} without a collection")))?;
            let items = self.list(&head)?;
            let class = match classes.select_class(&c) {
                Some(class) => class.clone(),
                None => continue,
            };
            for item in items {
                let outcome = match p {
                    Vocab::OneOf if class.is_data_range() => {
                        classes.add_one_of_literal_relation(&class, &OntologyLiteral::new(item)?)
                    }
                    Vocab::OneOf => classes.add_one_of_relation(&class, &OntologyFact::new(item)?),
                    _ => {
                        let member = class_of(classes, &item)?;
                        if p == Vocab::UnionOf {
                            classes.add_union_of_relation(&class, &member)
                        } else {
                            classes.add_intersection_of_relation(&class, &member)
                        }
                    }
                };
                accept(outcome, &c)?;
            }
        }
        Ok(())
    }

    fn restriction(
        &self,
        c: &RdfTerm,
        properties: &HashMap<RdfTerm, OntologyProperty>,
    ) -> Result<OntologyClass> {
        let on = self
            .object(c, Vocab::OnProperty)?
            .ok_or_else(|| OntologyError::malformed(c, "restriction without owl:onProperty"))?;
        let property = properties
            .get(on)
            .ok_or_else(|| OntologyError::malformed(c, format!("undeclared property {on}")))?;
        let mut facets = Vec::new();
        if let Some(from) = self.object(c, Vocab::AllValuesFrom)? {
            facets.push(RestrictionFacet::AllValuesFrom(resource(from, c, "owl:allValuesFrom")?.clone()));
        }
        if let Some(from) = self.object(c, Vocab::SomeValuesFrom)? {
            facets.push(RestrictionFacet::SomeValuesFrom(resource(from, c, "owl:someValuesFrom")?.clone()));
        }
        if let Some(value) = self.object(c, Vocab::HasValue)? {
            facets.push(RestrictionFacet::HasValue(value.clone()));
        }
        let exact = self.object(c, Vocab::Cardinality)?;
        let min = self.object(c, Vocab::MinCardinality)?;
        let max = self.object(c, Vocab::MaxCardinality)?;
        match (exact, min, max) {
            (None, None, None) => {}
            (Some(n), None, None) => {
                let n = cardinality(n, c)?;
                facets.push(RestrictionFacet::Cardinality { min: n, max: n });
            }
            (None, min, max) => {
                let min = min.map(|n| cardinality(n, c)).transpose()?.unwrap_or(0);
                let max = max.map(|n| cardinality(n, c)).transpose()?.unwrap_or(0);
                facets.push(RestrictionFacet::Cardinality { min, max });
            }
            _ => return Err(OntologyError::malformed(c, "owl:cardinality mixed with bounds")),
        }
        if facets.len() != 1 {
            let reason = format!("restriction with {} facets", facets.len());
            return Err(OntologyError::malformed(c, reason));
        }
        let facet = facets.remove(0);
        OntologyClass::restriction(c.clone(), property, facet)
    }

    fn declare_properties(
        &self,
        ontology: &mut Ontology,
        properties: HashMap<RdfTerm, OntologyProperty>,
    ) -> Result<()> {
        let classes = &ontology.model.class_model;
        let mut complete = Vec::new();
        for (p, mut property) in properties {
            if let Some(domain) = self.object(&p, Vocab::Domain)? {
                let domain = resource(domain, &p, "rdfs:domain")?;
                property = property.with_domain(class_of(classes, domain)?);
            }
            if let Some(range) = self.object(&p, Vocab::Range)? {
                let range = resource(range, &p, "rdfs:range")?;
                property = property.with_range(class_of(classes, range)?);
            }
            complete.push(property);
        }
        for property in complete {
            let p = property.value().clone();
            accept(ontology.model.property_model.add_property(property), &p)?;
        }
        Ok(())
    }

    /// Add the relation `s p o` to `ontology`.
    ///
    /// Annotations are returned rather than added,
    /// since they can only be routed once all the entities are known.
    fn relate(
        &self,
        ontology: &mut Ontology,
        s: &RdfTerm,
        p: &RdfTerm,
        o: &RdfTerm,
    ) -> Result<Option<Annotation>> {
        let classes = &mut ontology.model.class_model;
        let outcome = match vocab(p) {
            Some(Vocab::Annotation(reserved)) => return Ok(Some(Annotation::Reserved(reserved))),
            Some(Vocab::Type) => {
                if o.as_iri().map_or(false, |iri| DECLARATIONS.contains(iri)) {
                    return Ok(None);
                }
                let class = class_of(classes, resource(o, s, "the type of a fact")?)?;
                ontology
                    .data
                    .add_class_type_relation(&OntologyFact::new(s.clone())?, &class)
            }
            Some(Vocab::First | Vocab::Rest) => {
                if self.list_nodes.contains(s) {
                    return Ok(None);
                }
                return Err(OntologyError::malformed(s, "collection item outside of a class definition"));
            }
            Some(
                v @ (Vocab::OneOf
                | Vocab::UnionOf
                | Vocab::IntersectionOf
                | Vocab::ComplementOf
                | Vocab::OnProperty
                | Vocab::AllValuesFrom
                | Vocab::SomeValuesFrom
                | Vocab::HasValue
                | Vocab::Cardinality
                | Vocab::MinCardinality
                | Vocab::MaxCardinality),
            ) => {
                if classes.select_class(s).map_or(false, |c| defines(c, v)) {
                    return Ok(None);
                }
                return Err(OntologyError::malformed(s, format!("{v:?} outside of a class definition")));
            }
            Some(v @ (Vocab::Domain | Vocab::Range)) => {
                if ontology.model.property_model.select_property(s).is_some() {
                    return Ok(None);
                }
                return Err(OntologyError::malformed(s, format!("{v:?} of an undeclared property")));
            }
            Some(v @ (Vocab::SubClassOf | Vocab::EquivalentClass | Vocab::DisjointWith)) => {
                let a = class_of(classes, s)?;
                let b = class_of(classes, resource(o, s, "a class")?)?;
                match v {
                    Vocab::SubClassOf => classes.add_sub_class_of_relation(&a, &b),
                    Vocab::EquivalentClass => classes.add_equivalent_class_relation(&a, &b),
                    _ => classes.add_disjoint_with_relation(&a, &b),
                }
            }
            Some(v @ (Vocab::SubPropertyOf | Vocab::EquivalentProperty | Vocab::InverseOf)) => {
                let properties = &mut ontology.model.property_model;
                let undeclared = |t: &RdfTerm| OntologyError::malformed(t, "undeclared property");
                let a = properties.select_property(s).cloned().ok_or_else(|| undeclared(s))?;
                let b = properties.select_property(o).cloned().ok_or_else(|| undeclared(o))?;
                match v {
                    Vocab::SubPropertyOf => properties.add_sub_property_of_relation(&a, &b),
                    Vocab::EquivalentProperty => properties.add_equivalent_property_relation(&a, &b),
                    _ => properties.add_inverse_of_relation(&a, &b),
                }
            }
            Some(v @ (Vocab::SameAs | Vocab::DifferentFrom)) => {
                let a = OntologyFact::new(s.clone())?;
                let b = OntologyFact::new(resource(o, s, "a fact")?.clone())?;
                if v == Vocab::SameAs {
                    ontology.data.add_same_as_relation(&a, &b)
                } else {
                    ontology.data.add_different_from_relation(&a, &b)
                }
            }
            None => {
                let property = ontology
                    .model
                    .property_model
                    .select_property(p)
                    .cloned()
                    .ok_or_else(|| OntologyError::malformed(s, format!("unrecognised predicate {p}")))?;
                let subject = OntologyFact::new(s.clone())?;
                if property.is_annotation() {
                    return Ok(Some(Annotation::Custom(property)));
                } else if property.is_object() {
                    let object = OntologyFact::new(resource(o, s, "the value of an object property")?.clone())?;
                    ontology.data.add_assertion_relation(&subject, &property, &object)
                } else {
                    let literal = OntologyLiteral::new(o.clone())
                        .map_err(|_| OntologyError::malformed(s, format!("{p} expects a literal")))?;
                    ontology
                        .data
                        .add_literal_assertion_relation(&subject, &property, &literal)
                }
            }
        };
        accept(outcome, s)?;
        Ok(None)
    }
}

/// Whether `predicate` is part of the definition of `class`
fn defines(class: &OntologyClass, predicate: Vocab) -> bool {
    use crate::entity::{ClassKind, Composite};
    match (class.kind(), predicate) {
        (ClassKind::Enumerate | ClassKind::DataRange, Vocab::OneOf) => true,
        (ClassKind::Composite(Composite::Union), Vocab::UnionOf) => true,
        (ClassKind::Composite(Composite::Intersection), Vocab::IntersectionOf) => true,
        (ClassKind::Composite(Composite::Complement(_)), Vocab::ComplementOf) => true,
        (ClassKind::Restriction(_), v) => matches!(
            v,
            Vocab::OnProperty
                | Vocab::AllValuesFrom
                | Vocab::SomeValuesFrom
                | Vocab::HasValue
                | Vocab::Cardinality
                | Vocab::MinCardinality
                | Vocab::MaxCardinality
        ),
        _ => false,
    }
}

/// Add the annotation `s annotation o` to the part of `ontology` that declares `s`.
fn annotate(ontology: &mut Ontology, s: &RdfTerm, annotation: &Annotation, o: &RdfTerm) -> Result<()> {
    let outcome = if s == &ontology.value {
        annotate_ontology(ontology, annotation, o)?
    } else if let Some(class) = ontology.model.class_model.select_class(s).cloned() {
        annotate_entity(&mut ontology.model.class_model, &class, annotation, o)?
    } else if let Some(property) = ontology.model.property_model.select_property(s).cloned() {
        annotate_entity(&mut ontology.model.property_model, &property, annotation, o)?
    } else if let Some(fact) = ontology.data.select_fact(s).cloned() {
        annotate_entity(&mut ontology.data, &fact, annotation, o)?
    } else {
        return Err(OntologyError::malformed(s, "annotation about an undeclared subject"));
    };
    accept(outcome, s)
}

fn literal(o: &RdfTerm, reserved: Reserved) -> Result<OntologyLiteral> {
    OntologyLiteral::new(o.clone())
        .map_err(|_| OntologyError::malformed(o, format!("{reserved:?} expects a literal")))
}

fn annotate_ontology(ontology: &mut Ontology, annotation: &Annotation, o: &RdfTerm) -> Result<Outcome> {
    use Reserved::*;
    Ok(match annotation {
        Annotation::Reserved(r @ VersionInfo) => ontology.add_version_info_annotation(&literal(o, *r)?),
        Annotation::Reserved(r @ Comment) => ontology.add_comment_annotation(&literal(o, *r)?),
        Annotation::Reserved(r @ Label) => ontology.add_label_annotation(&literal(o, *r)?),
        Annotation::Reserved(SeeAlso) => ontology.add_see_also_annotation(o),
        Annotation::Reserved(IsDefinedBy) => ontology.add_is_defined_by_annotation(o),
        Annotation::Reserved(PriorVersion) => ontology.add_prior_version_annotation(o),
        Annotation::Reserved(BackwardCompatibleWith) => {
            ontology.add_backward_compatible_with_annotation(o)
        }
        Annotation::Reserved(IncompatibleWith) => ontology.add_incompatible_with_annotation(o),
        Annotation::Reserved(Imports) => ontology.add_imports_annotation(o),
        Annotation::Custom(property) => ontology.add_custom_annotation(property, o),
    })
}

fn annotate_entity<M: AnnotatedModel>(
    model: &mut M,
    entity: &M::Entity,
    annotation: &Annotation,
    o: &RdfTerm,
) -> Result<Outcome> {
    use Reserved::*;
    Ok(match annotation {
        Annotation::Reserved(r @ VersionInfo) => {
            model.add_version_info_annotation(entity, &literal(o, *r)?)
        }
        Annotation::Reserved(r @ Comment) => model.add_comment_annotation(entity, &literal(o, *r)?),
        Annotation::Reserved(r @ Label) => model.add_label_annotation(entity, &literal(o, *r)?),
        Annotation::Reserved(SeeAlso) => model.add_see_also_annotation(entity, o),
        Annotation::Reserved(IsDefinedBy) => model.add_is_defined_by_annotation(entity, o),
        Annotation::Reserved(r) => {
            let reason = format!("{r:?} only applies to ontologies");
            return Err(OntologyError::malformed(entity.value(), reason));
        }
        Annotation::Custom(property) => model.add_custom_annotation(property, entity, o),
    })
}
