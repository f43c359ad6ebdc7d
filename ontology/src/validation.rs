//! Consistency checks over a whole [`Ontology`].
//!
//! Gated mutations keep each model consistent with itself,
//! but [merges](Ontology::merge), set operations and [graph import](Ontology::from_graph)
//! may still produce an ontology whose data contradicts its model.
//! A [`Validator`] inspects an ontology and lists such problems in a [`ValidationReport`].
use std::collections::{HashMap, HashSet};
use std::fmt;

use sophia_api::ns::rdfs;

use crate::entity::{OntologyClass, OntologyProperty, OntologyResource};
use crate::ns::owl;
use crate::reasoning::{self, is_datatype_iri, Hierarchy};
use crate::term::RdfTerm;
use crate::Ontology;

/// Names of the rules checked by [`BasicValidator`].
pub mod rule {
    /// A fact is typed by two disjoint classes.
    pub const CLASS_TYPE_DISJOINTNESS: &str = "class-type-disjointness";
    /// Two facts are both the same and different.
    pub const SAME_DIFFERENT_CLASH: &str = "same-different-clash";
    /// A fact has several values for a functional property.
    pub const FUNCTIONAL_PROPERTY: &str = "functional-property";
    /// A fact is the value of an inverse-functional property for several subjects.
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str = "inverse-functional-property";
    /// A deprecated class or property is used.
    pub const DEPRECATED_USAGE: &str = "deprecated-usage";
    /// The subject of an assertion does not fit the domain of its property.
    pub const DOMAIN_COMPATIBILITY: &str = "domain-compatibility";
    /// The value of an assertion does not fit the range of its property.
    pub const RANGE_COMPATIBILITY: &str = "range-compatibility";
}

/// How serious a [`ValidationEntry`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Suspicious, but not contradictory
    Warning,
    /// The ontology contradicts itself
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A problem found by a [`Validator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationEntry {
    /// How serious the problem is
    pub severity: Severity,
    /// The name of the violated rule (see [`rule`])
    pub rule: &'static str,
    /// A human-readable description of the problem
    pub message: String,
}

impl fmt::Display for ValidationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.rule, self.message)
    }
}

/// The problems found by a [`Validator`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<ValidationEntry>,
}

impl ValidationReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem.
    pub fn push(&mut self, severity: Severity, rule: &'static str, message: impl Into<String>) {
        let entry = ValidationEntry {
            severity,
            rule,
            message: message.into(),
        };
        log::debug!("{entry}");
        self.entries.push(entry);
    }

    /// All entries, in the order they were recorded.
    pub fn entries(&self) -> &[ValidationEntry] {
        &self.entries
    }

    /// Entries violating `rule`
    pub fn entries_for<'s>(&'s self, rule: &'s str) -> impl Iterator<Item = &'s ValidationEntry> + 's {
        self.entries.iter().filter(move |e| e.rule == rule)
    }

    /// Whether no error was found (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        self.errors_count() == 0
    }

    /// The number of [errors](Severity::Error).
    pub fn errors_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// The number of [warnings](Severity::Warning).
    pub fn warnings_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no problem at all was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checks an [`Ontology`] as a whole.
pub trait Validator {
    /// Check `ontology` and report the problems found.
    fn validate(&self, ontology: &Ontology) -> ValidationReport;
}

/// A [`Validator`] checking the rules listed in [`rule`].
///
/// Entries are sorted by rule, then by message.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicValidator {
    skip_deprecated: bool,
}

impl BasicValidator {
    /// A validator checking every rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not report the usage of deprecated classes and properties.
    pub fn skipping_deprecated(mut self) -> Self {
        self.skip_deprecated = true;
        self
    }
}

impl Validator for BasicValidator {
    fn validate(&self, ontology: &Ontology) -> ValidationReport {
        log::trace!("validating {}", ontology.value());
        let mut checker = Checker::new(ontology);
        checker.class_types();
        checker.same_and_different();
        checker.functional_properties();
        if !self.skip_deprecated {
            checker.deprecated_usage();
        }
        checker.domains_and_ranges();
        let mut report = checker.report;
        report
            .entries
            .sort_by(|a, b| (a.rule, &a.message).cmp(&(b.rule, &b.message)));
        report
    }
}

/// Indexes shared by the rules of [`BasicValidator`].
struct Checker<'a> {
    ontology: &'a Ontology,
    classes: Hierarchy<'a>,
    properties: Hierarchy<'a>,
    facts: Hierarchy<'a>,
    /// The explicit types of each fact, shared with the facts it is the same as
    types: HashMap<&'a RdfTerm, HashSet<&'a RdfTerm>>,
    report: ValidationReport,
}

fn sorted<'a>(terms: impl IntoIterator<Item = &'a RdfTerm>) -> Vec<&'a RdfTerm> {
    let mut terms: Vec<_> = terms.into_iter().collect();
    terms.sort();
    terms
}

impl<'a> Checker<'a> {
    fn new(ontology: &'a Ontology) -> Self {
        let model = ontology.model();
        let data = ontology.data();
        let facts = Hierarchy::of_facts(data.relations());
        let mut types: HashMap<_, HashSet<_>> = HashMap::new();
        for e in &data.relations().class_type {
            for f in facts.equivalence_class(e.subject()) {
                types.entry(f).or_default().insert(e.object());
            }
        }
        Checker {
            ontology,
            classes: Hierarchy::of_classes(model.class_model.relations()),
            properties: Hierarchy::of_properties(model.property_model.relations()),
            facts,
            types,
            report: ValidationReport::new(),
        }
    }

    fn are_disjoint(&self, a: &'a RdfTerm, b: &'a RdfTerm) -> bool {
        self.classes.disjoints(a).contains(b) || self.classes.disjoints(b).contains(a)
    }

    fn class_types(&mut self) {
        let mut found = Vec::new();
        for (fact, types) in &self.types {
            let types = sorted(types.iter().copied());
            for (i, a) in types.iter().enumerate() {
                for b in &types[i + 1..] {
                    if self.are_disjoint(*a, *b) {
                        found.push(format!("{fact} is typed by disjoint classes {a} and {b}"));
                    }
                }
            }
        }
        for message in found {
            self.report
                .push(Severity::Error, rule::CLASS_TYPE_DISJOINTNESS, message);
        }
    }

    fn same_and_different(&mut self) {
        let ontology = self.ontology;
        let relations = ontology.data().relations();
        for e in relations.different_from.iter().filter(|e| !e.is_inference()) {
            if self.facts.equivalence_class(e.subject()).contains(e.object()) {
                let message = format!("{} is both the same as and different from {}", e.subject(), e.object());
                self.report
                    .push(Severity::Error, rule::SAME_DIFFERENT_CLASH, message);
            }
        }
    }

    /// Assertions of `property` or of one of its sub-properties or equivalent properties
    fn assertions_of(&self, property: &'a OntologyProperty) -> Vec<(&'a RdfTerm, &'a RdfTerm)> {
        let mut props = self.properties.equivalence_class(property.value());
        props.extend(self.properties.subs(property.value()));
        self.ontology
            .data()
            .relations()
            .assertions
            .iter()
            .filter(|e| props.contains(e.predicate()))
            .map(|e| (e.subject(), e.object()))
            .collect()
    }

    /// Number of distinct individuals among `values`, facts being identified through `owl:sameAs`
    fn distinct(&self, values: &[&'a RdfTerm]) -> usize {
        let mut seen: HashSet<&RdfTerm> = HashSet::new();
        let mut count = 0;
        for v in values {
            if seen.contains(v) {
                continue;
            }
            count += 1;
            seen.extend(self.facts.equivalence_class(*v));
        }
        count
    }

    fn functional_properties(&mut self) {
        let ontology = self.ontology;
        let mut found = Vec::new();
        for property in ontology.model().property_model.properties() {
            if !property.is_functional() && !property.is_inverse_functional() {
                continue;
            }
            let assertions = self.assertions_of(property);
            if property.is_functional() {
                let mut values: HashMap<&RdfTerm, Vec<&RdfTerm>> = HashMap::new();
                for (s, o) in &assertions {
                    values.entry(*s).or_default().push(*o);
                }
                for (s, objects) in values {
                    let n = self.distinct(&objects);
                    if n > 1 {
                        let message = format!("{s} has {n} values for functional property {property}");
                        found.push((rule::FUNCTIONAL_PROPERTY, message));
                    }
                }
            }
            if property.is_inverse_functional() {
                let mut subjects: HashMap<&RdfTerm, Vec<&RdfTerm>> = HashMap::new();
                for (s, o) in &assertions {
                    subjects.entry(*o).or_default().push(*s);
                }
                for (o, subjects) in subjects {
                    let n = self.distinct(&subjects);
                    if n > 1 {
                        let message =
                            format!("{o} is the value of {n} facts for inverse-functional property {property}");
                        found.push((rule::INVERSE_FUNCTIONAL_PROPERTY, message));
                    }
                }
            }
        }
        for (rule, message) in found {
            self.report.push(Severity::Error, rule, message);
        }
    }

    fn deprecated_usage(&mut self) {
        let ontology = self.ontology;
        let classes = &ontology.model().class_model;
        let properties = &ontology.model().property_model;
        let is_deprecated_class =
            |c: &RdfTerm| classes.select_class(c).map_or(false, OntologyClass::is_deprecated);
        let is_deprecated_property = |p: &RdfTerm| {
            properties
                .select_property(p)
                .map_or(false, OntologyProperty::is_deprecated)
        };

        let mut found = Vec::new();
        let data = ontology.data().relations();
        for e in data.class_type.iter().filter(|e| is_deprecated_class(e.object())) {
            found.push(format!("{} is typed by deprecated class {}", e.subject(), e.object()));
        }
        for e in data.assertions.iter().filter(|e| is_deprecated_property(e.predicate())) {
            found.push(format!("{} uses deprecated property {}", e.subject(), e.predicate()));
        }
        for e in classes
            .relations()
            .sub_class_of
            .iter()
            .filter(|e| is_deprecated_class(e.object()))
        {
            found.push(format!("{} specializes deprecated class {}", e.subject(), e.object()));
        }
        for e in properties
            .relations()
            .sub_property_of
            .iter()
            .filter(|e| is_deprecated_property(e.object()))
        {
            found.push(format!("{} specializes deprecated property {}", e.subject(), e.object()));
        }
        for message in found {
            self.report.push(Severity::Warning, rule::DEPRECATED_USAGE, message);
        }
    }

    fn domains_and_ranges(&mut self) {
        let ontology = self.ontology;
        let mut found = Vec::new();
        for property in ontology.model().property_model.properties() {
            if property.is_annotation() {
                continue;
            }
            for (s, o) in self.assertions_of(property) {
                if let Some(domain) = property.domain() {
                    if let Some(reason) = self.misfit(s, domain) {
                        let message = format!("{s} does not fit the domain of {property}: {reason}");
                        found.push((rule::DOMAIN_COMPATIBILITY, message));
                    }
                }
                let Some(range) = property.range() else {
                    continue;
                };
                let reason = if o.is_literal() {
                    self.literal_misfit(o, range)
                } else {
                    self.misfit(o, range)
                };
                if let Some(reason) = reason {
                    let message = format!("{o} does not fit the range of {property}: {reason}");
                    found.push((rule::RANGE_COMPATIBILITY, message));
                }
            }
        }
        for (rule, message) in found {
            self.report.push(Severity::Error, rule, message);
        }
    }

    /// Why `fact` can not belong to `class`, if it can not
    fn misfit(&self, fact: &'a RdfTerm, class: &'a OntologyClass) -> Option<String> {
        let classes = &self.ontology.model().class_model;
        let class = classes.select_class(class.value()).unwrap_or(class);
        if reasoning::is_literal_compatible_class(class, classes) {
            return Some(format!("{class} only holds literals"));
        }
        if !class.is_simple() {
            let members = reasoning::enlist_members_of(class, self.ontology);
            if members.contains(fact) {
                return None;
            }
            return Some(format!("not a member of {class}"));
        }
        let types = self.types.get(fact)?;
        sorted(types.iter().copied())
            .into_iter()
            .find(|t| self.are_disjoint(*t, class.value()))
            .map(|t| format!("its type {t} is disjoint with {class}"))
    }

    /// Why `literal` can not belong to `class`, if it can not
    fn literal_misfit(&self, literal: &'a RdfTerm, class: &'a OntologyClass) -> Option<String> {
        let classes = &self.ontology.model().class_model;
        if !reasoning::is_literal_compatible_class(class, classes) {
            return Some(format!("{class} does not hold literals"));
        }
        let mut bounds = self.classes.equivalence_class(class.value());
        bounds.extend(self.classes.supers(class.value()));
        let one_of: RdfTerm = owl::oneOf.into();
        for bound in sorted(bounds) {
            if bound == &RdfTerm::from(rdfs::Literal) {
                continue;
            }
            let is_data_range = classes
                .select_class(bound)
                .map_or(false, OntologyClass::is_data_range);
            if is_data_range && !classes.relations().one_of.contains(bound, &one_of, literal) {
                return Some(format!("not one of the literals of {bound}"));
            }
            if is_datatype_iri(bound) && literal.literal_datatype() != bound.as_iri() {
                return Some(format!("its datatype is not {bound}"));
            }
        }
        None
    }
}
