//! Closure computations over the relations of a model.
use std::collections::{HashMap, HashSet};

use crate::metadata::{ClassRelations, DataRelations, PropertyRelations};
use crate::taxonomy::Taxonomy;
use crate::term::RdfTerm;

/// Adjacency lists of a taxonomy, in both directions.
#[derive(Debug, Default)]
pub(crate) struct Index<'a> {
    out: HashMap<&'a RdfTerm, Vec<&'a RdfTerm>>,
    inc: HashMap<&'a RdfTerm, Vec<&'a RdfTerm>>,
}

impl<'a> Index<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        let mut index = Index::default();
        for e in taxonomy {
            index.out.entry(e.subject()).or_default().push(e.object());
            index.inc.entry(e.object()).or_default().push(e.subject());
        }
        index
    }

    /// Objects of `n`
    pub fn out(&self, n: &RdfTerm) -> &[&'a RdfTerm] {
        self.out.get(n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Subjects of `n`
    pub fn inc(&self, n: &RdfTerm) -> &[&'a RdfTerm] {
        self.inc.get(n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbours of `n`, ignoring the direction of the edges
    pub fn both(&self, n: &RdfTerm) -> impl Iterator<Item = &'a RdfTerm> + '_ {
        self.out(n).iter().chain(self.inc(n)).copied()
    }
}

/// All nodes reachable from `start` through `next`, including `start`.
///
/// Every node is expanded at most once, so this terminates on cyclic graphs.
pub(crate) fn closure<'a, I>(
    start: impl IntoIterator<Item = &'a RdfTerm>,
    mut next: impl FnMut(&'a RdfTerm) -> I,
) -> HashSet<&'a RdfTerm>
where
    I: IntoIterator<Item = &'a RdfTerm>,
{
    let mut visited = HashSet::new();
    let mut stack: Vec<&'a RdfTerm> = start.into_iter().collect();
    while let Some(node) = stack.pop() {
        if visited.insert(node) {
            stack.extend(next(node));
        }
    }
    visited
}

/// A subsumption hierarchy with an equivalence relation,
/// plus a symmetric relation of opposition
/// (disjointness for classes, inverse for properties, difference for facts).
pub(crate) struct Hierarchy<'a> {
    sub: Index<'a>,
    eq: Index<'a>,
    other: Index<'a>,
}

impl<'a> Hierarchy<'a> {
    pub fn of_classes(relations: &'a ClassRelations) -> Self {
        Hierarchy {
            sub: Index::new(&relations.sub_class_of),
            eq: Index::new(&relations.equivalent_class),
            other: Index::new(&relations.disjoint_with),
        }
    }

    pub fn of_properties(relations: &'a PropertyRelations) -> Self {
        Hierarchy {
            sub: Index::new(&relations.sub_property_of),
            eq: Index::new(&relations.equivalent_property),
            other: Index::new(&relations.inverse_of),
        }
    }

    pub fn of_facts(relations: &'a DataRelations) -> Self {
        Hierarchy {
            sub: Index::default(),
            eq: Index::new(&relations.same_as),
            other: Index::new(&relations.different_from),
        }
    }

    /// `n` and everything equivalent to it
    pub fn equivalence_class(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        closure([n], |x| self.eq.both(x))
    }

    pub fn equivalents(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let mut result = self.equivalence_class(n);
        result.remove(n);
        result
    }

    /// Strict ancestors of `n`, through subsumption and equivalence
    pub fn supers(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let start = self.equivalence_class(n);
        let reached = closure(
            start.iter().flat_map(|x| self.sub.out(x)).copied(),
            |x| self.sub.out(x).iter().copied().chain(self.eq.both(x)),
        );
        reached.difference(&start).copied().collect()
    }

    /// Strict descendants of `n`, through subsumption and equivalence
    pub fn subs(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let start = self.equivalence_class(n);
        let reached = closure(
            start.iter().flat_map(|x| self.sub.inc(x)).copied(),
            |x| self.sub.inc(x).iter().copied().chain(self.eq.both(x)),
        );
        reached.difference(&start).copied().collect()
    }

    /// Nodes opposed to `n` or to one of its equivalents,
    /// expanded through equivalence
    pub fn partners(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let direct: HashSet<_> = self
            .equivalence_class(n)
            .into_iter()
            .flat_map(|x| self.other.both(x))
            .collect();
        let mut result = HashSet::new();
        for d in direct {
            result.extend(self.equivalence_class(d));
        }
        result.remove(n);
        result
    }

    /// Like [`Hierarchy::partners`], but opposition is inherited from ancestors,
    /// and extends to the descendants of the opposed nodes.
    ///
    /// The result never contains `n` nor any node related to it by subsumption or equivalence,
    /// even when merged relations make them opposed to `n`.
    pub fn disjoints(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let mut sources = self.equivalence_class(n);
        sources.extend(self.supers(n));
        let direct: HashSet<_> = sources
            .iter()
            .flat_map(|x| self.other.both(x))
            .collect();
        let mut result = HashSet::new();
        for d in direct {
            result.extend(self.equivalence_class(d));
            result.extend(self.subs(d));
        }
        let subs = self.subs(n);
        result.retain(|x| !sources.contains(x) && !subs.contains(x));
        result
    }

    /// `n`, its equivalents and its descendants
    pub fn lower(&self, n: &'a RdfTerm) -> HashSet<&'a RdfTerm> {
        let mut result = self.equivalence_class(n);
        result.extend(self.subs(n));
        result
    }
}
