use test_case::test_case;

use super::*;
use crate::OntologyError;

fn ex(suffix: &str) -> RdfTerm {
    RdfTerm::iri_unchecked(format!("http://example.org/{suffix}"))
}

#[test]
fn class_kinds() -> crate::Result<()> {
    let p = OntologyProperty::object(ex("hasPet"))?;
    let animal = OntologyClass::new(ex("Animal"))?;
    assert!(animal.is_simple());
    let r = OntologyClass::some_values_from(RdfTerm::fresh_blank(), &p, &animal)?;
    assert!(r.is_restriction());
    assert!(r.is_blank());
    let def = r.restriction_def().unwrap();
    assert_eq!(def.on_property(), &ex("hasPet"));
    assert!(def.property().is_object());
    assert_eq!(def.facet(), &RestrictionFacet::SomeValuesFrom(ex("Animal")));
    assert!(OntologyClass::enumerate(ex("E"))?.is_enumerate());
    assert!(OntologyClass::data_range(ex("D"))?.is_data_range());
    assert!(OntologyClass::union(ex("U"))?.is_composite());
    let c = OntologyClass::complement(ex("C"), &animal)?;
    assert_eq!(
        c.kind(),
        &ClassKind::Composite(Composite::Complement(ex("Animal")))
    );
    Ok(())
}

#[test]
fn class_on_literal_fails() {
    let err = OntologyClass::new(RdfTerm::plain_literal("x")).unwrap_err();
    assert!(matches!(err, OntologyError::UnexpectedTermKind { .. }));
}

#[test_case(0, 0, true; "unbounded")]
#[test_case(1, 0, true; "min only")]
#[test_case(2, 2, true; "exact")]
#[test_case(1, 3, true; "range")]
#[test_case(3, 1, false; "max below min")]
fn cardinality_bounds(min: u32, max: u32, ok: bool) -> crate::Result<()> {
    let p = OntologyProperty::datatype(ex("age"))?;
    let res = OntologyClass::cardinality(ex("R"), &p, min, max);
    assert_eq!(res.is_ok(), ok);
    if !ok {
        assert!(matches!(
            res.unwrap_err(),
            OntologyError::InvalidCardinality { .. }
        ));
    }
    Ok(())
}

#[test]
fn restriction_on_annotation_property_fails() -> crate::Result<()> {
    let p = OntologyProperty::annotation(ex("note"))?;
    let thing = OntologyClass::new(ex("Thing"))?;
    assert!(OntologyClass::all_values_from(ex("R"), &p, &thing).is_err());
    Ok(())
}

#[test]
fn class_identity_ignores_flags() -> crate::Result<()> {
    let c1 = OntologyClass::new(ex("A"))?;
    let c2 = OntologyClass::new(ex("A"))?.with_deprecated(true);
    assert_eq!(c1, c2);
    assert!(c2.is_deprecated());
    assert_eq!(c1.pattern_member_id(), c2.pattern_member_id());
    Ok(())
}

#[test_case(ex("p"), true; "iri")]
#[test_case(RdfTerm::blank("b").unwrap(), false; "blank node")]
#[test_case(RdfTerm::plain_literal("p"), false; "literal")]
fn property_requires_iri(value: RdfTerm, ok: bool) {
    assert_eq!(OntologyProperty::object(value).is_ok(), ok);
}

#[test]
fn property_flags() -> crate::Result<()> {
    let flags = ObjectFlags {
        symmetric: true,
        transitive: true,
        inverse_functional: false,
    };
    let knows = OntologyProperty::object(ex("knows"))?
        .with_object_flags(flags)
        .with_functional(true);
    assert!(knows.is_symmetric());
    assert!(knows.is_transitive());
    assert!(!knows.is_inverse_functional());
    assert!(knows.is_functional());

    let age = OntologyProperty::datatype(ex("age"))?.with_object_flags(flags);
    assert!(!age.is_symmetric());
    assert_eq!(age.object_flags(), None);

    let note = OntologyProperty::annotation(ex("note"))?
        .with_functional(true)
        .with_domain(OntologyClass::new(ex("A"))?);
    assert!(!note.is_functional());
    assert!(note.domain().is_none());
    assert!(!note.same_kind(&age));
    assert!(knows.same_kind(&OntologyProperty::object(ex("likes"))?));
    Ok(())
}

#[test]
fn facts_and_literals() -> crate::Result<()> {
    assert!(OntologyFact::new(ex("john")).is_ok());
    assert!(OntologyFact::new(RdfTerm::plain_literal("john")).is_err());
    let lit = OntologyLiteral::new(RdfTerm::lang_literal("chat", "FR")?)?;
    assert_eq!(lit.to_string(), "chat@fr");
    assert!(!lit.is_blank());
    assert!(OntologyLiteral::new(ex("john")).is_err());
    Ok(())
}
