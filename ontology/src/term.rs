//! I define [`RdfTerm`], the term type on which every ontology entity is built.
//!
//! [`RdfTerm`] implements [`sophia_api::term::Term`],
//! and can be built from any other [`Term`] implementation
//! through [`TryFromTerm`].
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::Hasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sophia_api::ns::{rdf, xsd, NsTerm};
use sophia_api::term::{BnodeId, IriRef, LanguageTag, Term, TermKind, TryFromTerm, VarName};
use sophia_api::MownStr;

use crate::error::{OntologyError, Result};

lazy_static::lazy_static! {
    static ref XSD_STRING: Box<str> = xsd::string.to_string().into();
    static ref RDF_LANG_STRING: Box<str> = rdf::langString.to_string().into();
}

static FRESH_IDS: AtomicUsize = AtomicUsize::new(0);

/// A process-wide unique identifier, usable as a blank node id or an IRI suffix.
pub(crate) fn fresh_id() -> String {
    format!("ont{}", FRESH_IDS.fetch_add(1, Ordering::Relaxed))
}

/// An RDF term, as used by ontology entities and taxonomy entries.
///
/// The text of the term is shared ([`Arc<str>`]), so cloning is cheap.
/// Terms are normalized at construction time
/// (lowercase language tags, `xsd:string` literals stored as plain literals),
/// so that structural equality coincides with RDF term equality.
///
/// The [`Display`](fmt::Display) implementation yields the *canonical form* of the term:
/// * the IRI itself for IRIs,
/// * `bnode:<id>` for blank nodes,
/// * `value` or `value@lang` for plain literals,
/// * `value^^datatype` for typed literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfTerm {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri(Arc<str>),
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode(Arc<str>),
    /// A literal with an optional (lowercase) language tag
    PlainLiteral {
        /// The lexical form of the literal
        value: Arc<str>,
        /// The language tag, if any
        language: Option<Arc<str>>,
    },
    /// A literal with an explicit datatype (other than `xsd:string`)
    TypedLiteral {
        /// The lexical form of the literal
        value: Arc<str>,
        /// The datatype IRI
        datatype: Arc<str>,
    },
}

impl RdfTerm {
    /// Build an IRI term.
    ///
    /// `iri` must be a valid absolute IRI, otherwise this constructor returns an error.
    pub fn iri<T: AsRef<str>>(iri: T) -> Result<Self> {
        let iri = iri.as_ref();
        if sophia_iri::is_absolute_iri_ref(iri) {
            Ok(RdfTerm::Iri(iri.into()))
        } else {
            Err(OntologyError::InvalidIri(iri.to_string()))
        }
    }

    /// Build an IRI term without checking that `iri` is valid.
    pub fn iri_unchecked<T: AsRef<str>>(iri: T) -> Self {
        RdfTerm::Iri(iri.as_ref().into())
    }

    /// Build a blank node term.
    ///
    /// `id` must be non-empty and contain no whitespace.
    pub fn blank<T: AsRef<str>>(id: T) -> Result<Self> {
        let id = id.as_ref();
        let id = id.strip_prefix("bnode:").unwrap_or(id);
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            Err(OntologyError::InvalidBlankNodeId(id.to_string()))
        } else {
            Ok(RdfTerm::BlankNode(id.into()))
        }
    }

    /// Build a blank node term with an identifier never returned before by this method.
    pub fn fresh_blank() -> Self {
        RdfTerm::BlankNode(fresh_id().into())
    }

    /// Build a plain literal (with no language tag).
    pub fn plain_literal<T: AsRef<str>>(value: T) -> Self {
        RdfTerm::PlainLiteral {
            value: value.as_ref().into(),
            language: None,
        }
    }

    /// Build a language-tagged literal.
    ///
    /// `language` must be a valid BCP47 tag; it is stored in lowercase.
    pub fn lang_literal<T: AsRef<str>, L: AsRef<str>>(value: T, language: L) -> Result<Self> {
        let language = language.as_ref();
        if LanguageTag::new(language).is_err() {
            return Err(OntologyError::InvalidLanguageTag(language.to_string()));
        }
        Ok(RdfTerm::PlainLiteral {
            value: value.as_ref().into(),
            language: Some(language.to_ascii_lowercase().into()),
        })
    }

    /// Build a typed literal.
    ///
    /// `datatype` must be a valid absolute IRI.
    /// Literals typed with `xsd:string` are normalized to plain literals.
    pub fn typed_literal<T: AsRef<str>, D: AsRef<str>>(value: T, datatype: D) -> Result<Self> {
        let datatype = datatype.as_ref();
        if !sophia_iri::is_absolute_iri_ref(datatype) {
            return Err(OntologyError::InvalidIri(datatype.to_string()));
        }
        if datatype == &XSD_STRING[..] {
            return Ok(Self::plain_literal(value));
        }
        Ok(RdfTerm::TypedLiteral {
            value: value.as_ref().into(),
            datatype: datatype.into(),
        })
    }

    /// Whether this term is an IRI
    pub fn is_iri(&self) -> bool {
        matches!(self, RdfTerm::Iri(_))
    }

    /// Whether this term is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfTerm::BlankNode(_))
    }

    /// Whether this term is a literal (plain or typed)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            RdfTerm::PlainLiteral { .. } | RdfTerm::TypedLiteral { .. }
        )
    }

    /// Whether this term is a resource, i.e. an IRI or a blank node
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// The IRI of this term, if it is an IRI
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            RdfTerm::Iri(iri) => Some(&iri[..]),
            _ => None,
        }
    }

    /// The lexical form of this term, if it is a literal
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            RdfTerm::PlainLiteral { value, .. } | RdfTerm::TypedLiteral { value, .. } => {
                Some(&value[..])
            }
            _ => None,
        }
    }

    /// The datatype IRI of this term, if it is a literal
    /// (`xsd:string` or `rdf:langString` for plain literals).
    pub fn literal_datatype(&self) -> Option<&str> {
        match self {
            RdfTerm::PlainLiteral { language: None, .. } => Some(&XSD_STRING[..]),
            RdfTerm::PlainLiteral { language: Some(_), .. } => Some(&RDF_LANG_STRING[..]),
            RdfTerm::TypedLiteral { datatype, .. } => Some(&datatype[..]),
            _ => None,
        }
    }

    /// A 64-bit hash of the canonical form of this term.
    ///
    /// Equal canonical forms always yield equal identifiers within a build.
    /// The hash function is [`DefaultHasher`], whose output may change
    /// from one Rust release to another, so this identifier must not be persisted.
    /// Collections in this crate are keyed by the term itself,
    /// so this identifier is informative only.
    pub fn pattern_member_id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hasher.write(self.to_string().as_bytes());
        hasher.finish()
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::Iri(iri) => write!(f, "{iri}"),
            RdfTerm::BlankNode(id) => write!(f, "bnode:{id}"),
            RdfTerm::PlainLiteral {
                value,
                language: None,
            } => write!(f, "{value}"),
            RdfTerm::PlainLiteral {
                value,
                language: Some(lang),
            } => write!(f, "{value}@{lang}"),
            RdfTerm::TypedLiteral { value, datatype } => write!(f, "{value}^^{datatype}"),
        }
    }
}

impl<'a> From<NsTerm<'a>> for RdfTerm {
    fn from(value: NsTerm<'a>) -> Self {
        RdfTerm::Iri(value.to_string().into())
    }
}

impl Term for RdfTerm {
    type BorrowTerm<'x> = &'x Self where Self: 'x;

    fn kind(&self) -> TermKind {
        match self {
            RdfTerm::Iri(_) => TermKind::Iri,
            RdfTerm::BlankNode(_) => TermKind::BlankNode,
            RdfTerm::PlainLiteral { .. } | RdfTerm::TypedLiteral { .. } => TermKind::Literal,
        }
    }

    fn borrow_term(&self) -> Self::BorrowTerm<'_> {
        self
    }

    fn iri(&self) -> Option<IriRef<MownStr>> {
        self.as_iri()
            .map(|iri| IriRef::new_unchecked(MownStr::from(iri)))
    }

    fn bnode_id(&self) -> Option<BnodeId<MownStr>> {
        if let RdfTerm::BlankNode(id) = self {
            Some(BnodeId::new_unchecked(MownStr::from(&id[..])))
        } else {
            None
        }
    }

    fn lexical_form(&self) -> Option<MownStr> {
        self.literal_value().map(MownStr::from)
    }

    fn datatype(&self) -> Option<IriRef<MownStr>> {
        self.literal_datatype()
            .map(|dt| IriRef::new_unchecked(MownStr::from(dt)))
    }

    fn language_tag(&self) -> Option<LanguageTag<MownStr>> {
        if let RdfTerm::PlainLiteral {
            language: Some(lang),
            ..
        } = self
        {
            Some(LanguageTag::new_unchecked(MownStr::from(&lang[..])))
        } else {
            None
        }
    }

    fn variable(&self) -> Option<VarName<MownStr>> {
        None
    }

    fn triple(&self) -> Option<[Self::BorrowTerm<'_>; 3]> {
        None
    }

    fn to_triple(self) -> Option<[Self; 3]>
    where
        Self: Sized,
    {
        None
    }
}

impl TryFromTerm for RdfTerm {
    type Error = OntologyError;

    fn try_from_term<T: Term>(term: T) -> Result<Self> {
        let unsupported = || OntologyError::UnsupportedTerm(format!("{term:?}"));
        match term.kind() {
            TermKind::Iri => {
                let iri = term.iri().ok_or_else(unsupported)?;
                Ok(RdfTerm::Iri(iri.as_str().into()))
            }
            TermKind::BlankNode => {
                let id = term.bnode_id().ok_or_else(unsupported)?;
                Ok(RdfTerm::BlankNode(id.as_str().into()))
            }
            TermKind::Literal => {
                let lex = term.lexical_form().ok_or_else(unsupported)?;
                if let Some(tag) = term.language_tag() {
                    RdfTerm::lang_literal(&lex[..], tag.as_str())
                } else {
                    let dt = term.datatype().ok_or_else(unsupported)?;
                    RdfTerm::typed_literal(&lex[..], dt.as_str())
                }
            }
            TermKind::Triple | TermKind::Variable => Err(unsupported()),
        }
    }
}
