//! I define [`Taxonomy`], a deduplicated set of relations between ontology entities,
//! and [`OntologyGraph`], the graph into which ontologies are exported.
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt::Write;
use std::hash::{Hash, Hasher};

use sophia_api::ns::rdf;

use crate::error::{OntologyError, Result};
use crate::term::RdfTerm;

/// The graph produced when exporting ontologies.
///
/// As any `HashSet` of triples, it implements [`sophia_api::graph::Graph`]
/// (and [`MutableGraph`](sophia_api::graph::MutableGraph)).
pub type OntologyGraph = HashSet<[RdfTerm; 3]>;

/// A (subject, predicate, object) relation between ontology entities.
///
/// Entries flagged as [inferences](TaxonomyEntry::is_inference) were not asserted,
/// but derived automatically (e.g. the reverse of a symmetric relation).
/// Equality and hashing only consider the triple, not the inference flag.
#[derive(Clone, Debug)]
pub struct TaxonomyEntry {
    subject: RdfTerm,
    predicate: RdfTerm,
    object: RdfTerm,
    inference: bool,
    id: u64,
}

impl TaxonomyEntry {
    /// Build an asserted entry.
    ///
    /// Fails if `subject` is a literal or if `predicate` is not an IRI.
    pub fn new(subject: RdfTerm, predicate: RdfTerm, object: RdfTerm) -> Result<Self> {
        if subject.is_literal() {
            return Err(OntologyError::UnexpectedTermKind {
                term: subject.to_string(),
                expected: "the subject of a taxonomy entry",
            });
        }
        if !predicate.is_iri() {
            return Err(OntologyError::UnexpectedTermKind {
                term: predicate.to_string(),
                expected: "the predicate of a taxonomy entry",
            });
        }
        Ok(Self::new_unchecked(subject, predicate, object))
    }

    /// Build an asserted entry, without checking the kind of `subject` and `predicate`.
    pub fn new_unchecked(subject: RdfTerm, predicate: RdfTerm, object: RdfTerm) -> Self {
        let mut hasher = DefaultHasher::new();
        hasher.write(format!("{subject} {predicate} {object}").as_bytes());
        TaxonomyEntry {
            id: hasher.finish(),
            subject,
            predicate,
            object,
            inference: false,
        }
    }

    pub(crate) fn inferred(subject: RdfTerm, predicate: RdfTerm, object: RdfTerm) -> Self {
        TaxonomyEntry {
            inference: true,
            ..Self::new_unchecked(subject, predicate, object)
        }
    }

    /// The subject of this entry
    pub fn subject(&self) -> &RdfTerm {
        &self.subject
    }

    /// The predicate of this entry
    pub fn predicate(&self) -> &RdfTerm {
        &self.predicate
    }

    /// The object of this entry
    pub fn object(&self) -> &RdfTerm {
        &self.object
    }

    /// Whether this entry was derived rather than asserted
    pub fn is_inference(&self) -> bool {
        self.inference
    }

    /// A 64-bit hash of the canonical forms of the triple.
    ///
    /// It is deterministic within a build,
    /// but may change with the Rust release; do not persist it.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// This entry as a triple
    pub fn to_triple(&self) -> [RdfTerm; 3] {
        [
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        ]
    }
}

impl PartialEq for TaxonomyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl Eq for TaxonomyEntry {}

impl Hash for TaxonomyEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.id)
    }
}

/// A deduplicated set of [`TaxonomyEntry`].
///
/// Adding an entry that is already present (even with a different inference flag)
/// is a no-op, as is removing an absent entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Taxonomy {
    entries: HashSet<TaxonomyEntry>,
}

impl Taxonomy {
    /// An empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry`, return `true` if it was not already present.
    pub fn add_entry(&mut self, entry: TaxonomyEntry) -> bool {
        self.entries.insert(entry)
    }

    /// Remove `entry`, return `true` if it was present.
    pub fn remove_entry(&mut self, entry: &TaxonomyEntry) -> bool {
        self.entries.remove(entry)
    }

    /// Whether `entry` is present, regardless of its inference flag.
    pub fn contains_entry(&self, entry: &TaxonomyEntry) -> bool {
        self.entries.contains(entry)
    }

    pub(crate) fn contains(&self, s: &RdfTerm, p: &RdfTerm, o: &RdfTerm) -> bool {
        self.entries
            .contains(&TaxonomyEntry::new_unchecked(s.clone(), p.clone(), o.clone()))
    }

    pub(crate) fn remove(&mut self, s: &RdfTerm, p: &RdfTerm, o: &RdfTerm) -> bool {
        self.entries
            .remove(&TaxonomyEntry::new_unchecked(s.clone(), p.clone(), o.clone()))
    }

    /// Add `(a, p, b)`, and its reverse `(b, p, a)` as an inference.
    pub(crate) fn add_pair(&mut self, a: &RdfTerm, p: &RdfTerm, b: &RdfTerm) -> bool {
        let direct = TaxonomyEntry::new_unchecked(a.clone(), p.clone(), b.clone());
        let reverse = TaxonomyEntry::inferred(b.clone(), p.clone(), a.clone());
        let added = self.add_entry(direct);
        self.add_entry(reverse) || added
    }

    /// Remove both `(a, p, b)` and `(b, p, a)`.
    pub(crate) fn remove_pair(&mut self, a: &RdfTerm, p: &RdfTerm, b: &RdfTerm) -> bool {
        let removed = self.remove(a, p, b);
        self.remove(b, p, a) || removed
    }

    /// Remove every entry mentioning `term` as subject or object.
    pub(crate) fn purge(&mut self, term: &RdfTerm) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| &e.subject != term && &e.object != term);
        before != self.entries.len()
    }

    /// Number of entries, inferences included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this taxonomy has no entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyEntry> + '_ {
        self.entries.iter()
    }

    /// Number of entries flagged as inferences
    pub fn inferences_count(&self) -> usize {
        self.entries.iter().filter(|e| e.inference).count()
    }

    fn select(&self, pred: impl Fn(&TaxonomyEntry) -> bool) -> Self {
        self.entries.iter().filter(|e| pred(e)).cloned().collect()
    }

    /// The sub-taxonomy of entries having `subject` as their subject
    pub fn select_entries_by_subject(&self, subject: &RdfTerm) -> Self {
        self.select(|e| &e.subject == subject)
    }

    /// The sub-taxonomy of entries having `predicate` as their predicate
    pub fn select_entries_by_predicate(&self, predicate: &RdfTerm) -> Self {
        self.select(|e| &e.predicate == predicate)
    }

    /// The sub-taxonomy of entries having `object` as their object
    pub fn select_entries_by_object(&self, object: &RdfTerm) -> Self {
        self.select(|e| &e.object == object)
    }

    /// Objects of the entries whose subject is `subject`
    pub(crate) fn objects_of<'a>(
        &'a self,
        subject: &'a RdfTerm,
    ) -> impl Iterator<Item = &'a RdfTerm> + 'a {
        self.entries
            .iter()
            .filter(move |e| &e.subject == subject)
            .map(|e| &e.object)
    }

    /// Subjects of the entries whose object is `object`
    pub(crate) fn subjects_of<'a>(
        &'a self,
        object: &'a RdfTerm,
    ) -> impl Iterator<Item = &'a RdfTerm> + 'a {
        self.entries
            .iter()
            .filter(move |e| &e.object == object)
            .map(|e| &e.subject)
    }

    /// Entries present in both `self` and `other` (flags are taken from `self`).
    pub fn intersect_with(&self, other: &Self) -> Self {
        self.select(|e| other.entries.contains(e))
    }

    /// Entries present in `self` or `other` (flags are taken from `self` when both have them).
    pub fn union_with(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.entries.extend(other.entries.iter().cloned());
        result
    }

    /// Entries present in `self` but not in `other`.
    pub fn difference_with(&self, other: &Self) -> Self {
        self.select(|e| !other.entries.contains(e))
    }

    /// Export this taxonomy as triples, ignoring inferences unless `include_inferences`.
    pub fn to_graph(&self, include_inferences: bool) -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        self.export_into(&mut graph, include_inferences);
        graph
    }

    pub(crate) fn export_into(&self, graph: &mut OntologyGraph, include_inferences: bool) {
        graph.extend(
            self.entries
                .iter()
                .filter(|e| include_inferences || !e.inference)
                .map(TaxonomyEntry::to_triple),
        );
    }
}

impl FromIterator<TaxonomyEntry> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = TaxonomyEntry>>(iter: I) -> Self {
        Taxonomy {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<TaxonomyEntry> for Taxonomy {
    fn extend<I: IntoIterator<Item = TaxonomyEntry>>(&mut self, iter: I) {
        self.entries.extend(iter)
    }
}

impl<'a> IntoIterator for &'a Taxonomy {
    type Item = &'a TaxonomyEntry;
    type IntoIter = std::collections::hash_set::Iter<'a, TaxonomyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Insert the triple `(s, p, o)` in `graph`.
pub(crate) fn insert_triple(
    graph: &mut OntologyGraph,
    s: &RdfTerm,
    p: impl Into<RdfTerm>,
    o: impl Into<RdfTerm>,
) {
    graph.insert([s.clone(), p.into(), o.into()]);
}

/// Encode `members` as an RDF collection in `graph`, and return its head.
///
/// Members are sorted by canonical form,
/// and the blank nodes of the collection are derived from `owner` (see [`collection_label`]),
/// so that exporting the same collection twice yields the same triples.
pub(crate) fn insert_collection<'a>(
    graph: &mut OntologyGraph,
    owner: &RdfTerm,
    tag: &str,
    members: impl IntoIterator<Item = &'a RdfTerm>,
) -> RdfTerm {
    let mut members: Vec<_> = members.into_iter().collect();
    members.sort_by_cached_key(|m| m.to_string());
    let mut head: RdfTerm = rdf::nil.into();
    for (i, member) in members.into_iter().enumerate().rev() {
        let node = RdfTerm::BlankNode(collection_label(owner, tag, i).into());
        insert_triple(graph, &node, rdf::first, member.clone());
        insert_triple(graph, &node, rdf::rest, head);
        head = node;
    }
    head
}

/// The blank node id of the `i`-th cell of the `tag` collection of `owner`.
///
/// The id is made of the kind of `owner` (`i`, `b` or `l`)
/// followed by its text, hex-encoded;
/// distinct owners thus never share collection nodes.
fn collection_label(owner: &RdfTerm, tag: &str, i: usize) -> String {
    let (kind, text) = match owner {
        RdfTerm::Iri(iri) => ('i', iri.to_string()),
        RdfTerm::BlankNode(id) => ('b', id.to_string()),
        _ => ('l', owner.to_string()),
    };
    let mut label = format!("{tag}_{kind}");
    for byte in text.bytes() {
        write!(label, "{byte:02x}").ok();
    }
    write!(label, "_{i}").ok();
    label
}
