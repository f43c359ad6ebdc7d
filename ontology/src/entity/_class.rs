use std::fmt;
use std::hash::{Hash, Hasher};

use super::*;
use crate::error::{OntologyError, Result};

/// An ontology class.
///
/// The [`kind`](OntologyClass::kind) of a class is fixed at construction time;
/// the members of enumerate, data-range, union and intersection classes
/// are not stored in the class itself,
/// but as relations of the [`ClassModel`](crate::ClassModel) containing it.
#[derive(Clone, Debug)]
pub struct OntologyClass {
    value: RdfTerm,
    kind: ClassKind,
    deprecated: bool,
}

/// The different kinds of [`OntologyClass`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassKind {
    /// A plain named (or anonymous) class
    Simple,
    /// A class defined by a constraint on the values of a property
    Restriction(Restriction),
    /// A class defined by the enumeration of its facts (`owl:oneOf`)
    Enumerate,
    /// A class defined by the enumeration of its literals (`owl:DataRange`)
    DataRange,
    /// A class defined as a boolean combination of other classes
    Composite(Composite),
}

/// The constraint defining a restriction class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restriction {
    on_property: Box<OntologyProperty>,
    facet: RestrictionFacet,
}

impl Restriction {
    /// The name of the property whose values are constrained
    pub fn on_property(&self) -> &RdfTerm {
        self.on_property.value()
    }

    /// The property whose values are constrained, as given to the constructor
    pub fn property(&self) -> &OntologyProperty {
        &self.on_property
    }

    /// The constraint on the values of [`on_property`](Restriction::on_property)
    pub fn facet(&self) -> &RestrictionFacet {
        &self.facet
    }
}

/// The constraint of a [`Restriction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestrictionFacet {
    /// All values of the property belong to the given class
    AllValuesFrom(RdfTerm),
    /// At least one value of the property belongs to the given class
    SomeValuesFrom(RdfTerm),
    /// The property has the given value (a fact or a literal)
    HasValue(RdfTerm),
    /// The number of values of the property is bounded;
    /// a bound of 0 means "unbounded", except when `min == max`.
    Cardinality {
        /// Minimum number of values
        min: u32,
        /// Maximum number of values
        max: u32,
    },
}

/// The boolean combination of a composite class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Composite {
    /// `owl:unionOf`, members are stored in the class model
    Union,
    /// `owl:intersectionOf`, members are stored in the class model
    Intersection,
    /// `owl:complementOf` the given class
    Complement(RdfTerm),
}

impl OntologyClass {
    fn build(value: RdfTerm, kind: ClassKind) -> Result<Self> {
        ensure_resource(&value, "a class")?;
        Ok(OntologyClass {
            value,
            kind,
            deprecated: false,
        })
    }

    /// Build a simple class.
    ///
    /// `value` must be an IRI or a blank node.
    pub fn new(value: RdfTerm) -> Result<Self> {
        Self::build(value, ClassKind::Simple)
    }

    /// Build a restriction class on `on_property`.
    ///
    /// Fails if `on_property` is an annotation property,
    /// or if `facet` is a cardinality with `0 < max < min`.
    pub fn restriction(
        value: RdfTerm,
        on_property: &OntologyProperty,
        facet: RestrictionFacet,
    ) -> Result<Self> {
        if on_property.is_annotation() {
            return Err(OntologyError::UnexpectedTermKind {
                term: on_property.value().to_string(),
                expected: "the property of a restriction",
            });
        }
        if let RestrictionFacet::Cardinality { min, max } = facet {
            if max > 0 && max < min {
                return Err(OntologyError::InvalidCardinality {
                    restriction: value.to_string(),
                    min,
                    max,
                });
            }
        }
        let restriction = Restriction {
            on_property: Box::new(on_property.clone()),
            facet,
        };
        Self::build(value, ClassKind::Restriction(restriction))
    }

    /// Build an `owl:allValuesFrom` restriction.
    pub fn all_values_from(
        value: RdfTerm,
        on_property: &OntologyProperty,
        from_class: &OntologyClass,
    ) -> Result<Self> {
        let facet = RestrictionFacet::AllValuesFrom(from_class.value.clone());
        Self::restriction(value, on_property, facet)
    }

    /// Build an `owl:someValuesFrom` restriction.
    pub fn some_values_from(
        value: RdfTerm,
        on_property: &OntologyProperty,
        from_class: &OntologyClass,
    ) -> Result<Self> {
        let facet = RestrictionFacet::SomeValuesFrom(from_class.value.clone());
        Self::restriction(value, on_property, facet)
    }

    /// Build an `owl:hasValue` restriction;
    /// `required` may be a fact or a literal.
    pub fn has_value(
        value: RdfTerm,
        on_property: &OntologyProperty,
        required: &RdfTerm,
    ) -> Result<Self> {
        let facet = RestrictionFacet::HasValue(required.clone());
        Self::restriction(value, on_property, facet)
    }

    /// Build a cardinality restriction.
    pub fn cardinality(
        value: RdfTerm,
        on_property: &OntologyProperty,
        min: u32,
        max: u32,
    ) -> Result<Self> {
        Self::restriction(value, on_property, RestrictionFacet::Cardinality { min, max })
    }

    /// Build an enumerate class; its facts are added with
    /// [`ClassModel::add_one_of_relation`](crate::ClassModel::add_one_of_relation).
    pub fn enumerate(value: RdfTerm) -> Result<Self> {
        Self::build(value, ClassKind::Enumerate)
    }

    /// Build a data range; its literals are added with
    /// [`ClassModel::add_one_of_literal_relation`](crate::ClassModel::add_one_of_literal_relation).
    pub fn data_range(value: RdfTerm) -> Result<Self> {
        Self::build(value, ClassKind::DataRange)
    }

    /// Build a union class; its members are added with
    /// [`ClassModel::add_union_of_relation`](crate::ClassModel::add_union_of_relation).
    pub fn union(value: RdfTerm) -> Result<Self> {
        Self::build(value, ClassKind::Composite(Composite::Union))
    }

    /// Build an intersection class; its members are added with
    /// [`ClassModel::add_intersection_of_relation`](crate::ClassModel::add_intersection_of_relation).
    pub fn intersection(value: RdfTerm) -> Result<Self> {
        Self::build(value, ClassKind::Composite(Composite::Intersection))
    }

    /// Build the complement of `of`.
    pub fn complement(value: RdfTerm, of: &OntologyClass) -> Result<Self> {
        let kind = ClassKind::Composite(Composite::Complement(of.value.clone()));
        Self::build(value, kind)
    }

    /// Mark (or unmark) this class as deprecated.
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Mark (or unmark) this class as deprecated.
    pub fn set_deprecated(&mut self, deprecated: bool) {
        self.deprecated = deprecated;
    }

    /// The kind of this class
    pub fn kind(&self) -> &ClassKind {
        &self.kind
    }

    /// Whether this class is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Whether this class is a simple class
    pub fn is_simple(&self) -> bool {
        matches!(self.kind, ClassKind::Simple)
    }

    /// Whether this class is a restriction
    pub fn is_restriction(&self) -> bool {
        matches!(self.kind, ClassKind::Restriction(_))
    }

    /// Whether this class is an enumerate class
    pub fn is_enumerate(&self) -> bool {
        matches!(self.kind, ClassKind::Enumerate)
    }

    /// Whether this class is a data range
    pub fn is_data_range(&self) -> bool {
        matches!(self.kind, ClassKind::DataRange)
    }

    /// Whether this class is a union, intersection or complement class
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, ClassKind::Composite(_))
    }

    /// The restriction defining this class, if it is a restriction
    pub fn restriction_def(&self) -> Option<&Restriction> {
        match &self.kind {
            ClassKind::Restriction(r) => Some(r),
            _ => None,
        }
    }
}

impl OntologyResource for OntologyClass {
    fn value(&self) -> &RdfTerm {
        &self.value
    }
}

impl PartialEq for OntologyClass {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for OntologyClass {}

impl Hash for OntologyClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl fmt::Display for OntologyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
