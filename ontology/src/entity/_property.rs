use std::fmt;
use std::hash::{Hash, Hasher};

use super::*;
use crate::error::{OntologyError, Result};

/// An ontology property.
///
/// Properties are always named by an IRI.
/// Flags that do not apply to the kind of the property
/// (e.g. `symmetric` on a datatype property) are ignored with a warning.
#[derive(Clone, Debug)]
pub struct OntologyProperty {
    value: RdfTerm,
    kind: PropertyKind,
    functional: bool,
    deprecated: bool,
    domain: Option<OntologyClass>,
    range: Option<OntologyClass>,
}

/// The different kinds of [`OntologyProperty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// `owl:AnnotationProperty`
    Annotation,
    /// `owl:ObjectProperty`, relating facts to facts
    Object(ObjectFlags),
    /// `owl:DatatypeProperty`, relating facts to literals
    Datatype,
}

/// Characteristics specific to object properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectFlags {
    /// `owl:SymmetricProperty`
    pub symmetric: bool,
    /// `owl:TransitiveProperty`
    pub transitive: bool,
    /// `owl:InverseFunctionalProperty`
    pub inverse_functional: bool,
}

impl OntologyProperty {
    fn build(value: RdfTerm, kind: PropertyKind) -> Result<Self> {
        if !value.is_iri() {
            return Err(OntologyError::UnexpectedTermKind {
                term: value.to_string(),
                expected: "a property",
            });
        }
        Ok(OntologyProperty {
            value,
            kind,
            functional: false,
            deprecated: false,
            domain: None,
            range: None,
        })
    }

    /// Build an object property with no characteristics.
    pub fn object(value: RdfTerm) -> Result<Self> {
        Self::build(value, PropertyKind::Object(ObjectFlags::default()))
    }

    /// Build a datatype property.
    pub fn datatype(value: RdfTerm) -> Result<Self> {
        Self::build(value, PropertyKind::Datatype)
    }

    /// Build an annotation property.
    pub fn annotation(value: RdfTerm) -> Result<Self> {
        Self::build(value, PropertyKind::Annotation)
    }

    /// Set the `owl:FunctionalProperty` flag (ignored on annotation properties).
    pub fn with_functional(mut self, functional: bool) -> Self {
        if self.is_annotation() {
            log::warn!("Annotation property {} can not be functional", self.value);
        } else {
            self.functional = functional;
        }
        self
    }

    /// Set the deprecation flag.
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Set the deprecation flag.
    pub fn set_deprecated(&mut self, deprecated: bool) {
        self.deprecated = deprecated;
    }

    /// Set the characteristics of an object property (ignored on other kinds).
    pub fn with_object_flags(mut self, flags: ObjectFlags) -> Self {
        match &mut self.kind {
            PropertyKind::Object(f) => *f = flags,
            _ => log::warn!("Property {} is not an object property", self.value),
        }
        self
    }

    /// Set the domain of this property (ignored on annotation properties).
    pub fn with_domain(mut self, domain: OntologyClass) -> Self {
        if self.is_annotation() {
            log::warn!("Annotation property {} can not have a domain", self.value);
        } else {
            self.domain = Some(domain);
        }
        self
    }

    /// Set the range of this property (ignored on annotation properties).
    pub fn with_range(mut self, range: OntologyClass) -> Self {
        if self.is_annotation() {
            log::warn!("Annotation property {} can not have a range", self.value);
        } else {
            self.range = Some(range);
        }
        self
    }

    /// The kind of this property
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Whether this is an annotation property
    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, PropertyKind::Annotation)
    }

    /// Whether this is an object property
    pub fn is_object(&self) -> bool {
        matches!(self.kind, PropertyKind::Object(_))
    }

    /// Whether this is a datatype property
    pub fn is_datatype(&self) -> bool {
        matches!(self.kind, PropertyKind::Datatype)
    }

    /// Whether this property is functional
    pub fn is_functional(&self) -> bool {
        self.functional
    }

    /// Whether this property is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// The characteristics of this property, if it is an object property
    pub fn object_flags(&self) -> Option<ObjectFlags> {
        match self.kind {
            PropertyKind::Object(flags) => Some(flags),
            _ => None,
        }
    }

    /// Whether this is a symmetric object property
    pub fn is_symmetric(&self) -> bool {
        self.object_flags().map_or(false, |f| f.symmetric)
    }

    /// Whether this is a transitive object property
    pub fn is_transitive(&self) -> bool {
        self.object_flags().map_or(false, |f| f.transitive)
    }

    /// Whether this is an inverse-functional object property
    pub fn is_inverse_functional(&self) -> bool {
        self.object_flags().map_or(false, |f| f.inverse_functional)
    }

    /// The declared domain of this property
    pub fn domain(&self) -> Option<&OntologyClass> {
        self.domain.as_ref()
    }

    /// The declared range of this property
    pub fn range(&self) -> Option<&OntologyClass> {
        self.range.as_ref()
    }

    /// Whether `other` has the same kind as `self`,
    /// ignoring the characteristics of object properties.
    pub(crate) fn same_kind(&self, other: &OntologyProperty) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(&other.kind)
    }
}

impl OntologyResource for OntologyProperty {
    fn value(&self) -> &RdfTerm {
        &self.value
    }
}

impl PartialEq for OntologyProperty {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for OntologyProperty {}

impl Hash for OntologyProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl fmt::Display for OntologyProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
