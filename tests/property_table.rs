//! Integration tests for lazy property tables and template fallback.

use fbx_properties::dom::{Element, Scope, Token, TokenLocation};
use fbx_properties::props::{decode, PropertyKind, TYPE_TAGS};
use fbx_properties::util::{Color4, Vec3};
use fbx_properties::{Error, PropertyTable, TypedValue};
use std::sync::Arc;

fn record(name: &str, tag: &str, values: &[&str], line: u32) -> Element {
    let mut tokens = vec![
        Token::quoted(name, line),
        Token::quoted(tag, line),
        Token::quoted("", line),
        Token::quoted("", line),
    ];
    tokens.extend(values.iter().map(|v| Token::text(*v, line)));
    Element::property(TokenLocation::Line(line), tokens)
}

fn properties(records: Vec<Element>) -> Arc<Element> {
    let scope: Scope = records.into_iter().collect();
    Arc::new(Element::new("Properties70", TokenLocation::Line(0), []).with_scope(scope))
}

fn table(records: Vec<Element>, template: Option<Arc<PropertyTable>>) -> PropertyTable {
    PropertyTable::new(&properties(records), template)
}

/// Minimal well-formed value tokens for a kind.
fn sample_values(kind: PropertyKind) -> &'static [&'static str] {
    match kind {
        PropertyKind::String => &["\"text\""],
        PropertyKind::Vector3 => &["1", "2", "3"],
        PropertyKind::ColorRGBA => &["1", "2", "3", "4"],
        _ => &["1"],
    }
}

#[test]
fn test_every_tag_decodes_to_its_kind() {
    for (tag, kind) in TYPE_TAGS {
        let values = sample_values(*kind);
        let e = record("X", tag, values, 1);
        assert_eq!(e.tokens().len(), kind.min_tokens());

        let value = decode(&e)
            .unwrap_or_else(|err| panic!("{tag}: {err}"))
            .unwrap_or_else(|| panic!("{tag}: no value"));
        assert_eq!(value.kind(), *kind, "tag {tag}");
    }
}

#[test]
fn test_common_scene_properties() {
    let t = table(
        vec![
            record("UnitScaleFactor", "UnitScaleFactor", &["100"], 1),
            record("Greeting", "KString", &["\"Hello\""], 2),
            record("Diffuse", "ColorAndAlpha", &["0.5", "0.5", "0.5", "1"], 3),
        ],
        None,
    );

    assert_eq!(*t.get("UnitScaleFactor").unwrap().unwrap(), TypedValue::Float32(100.0));
    assert_eq!(*t.get("Greeting").unwrap().unwrap(), TypedValue::String("Hello".into()));
    assert_eq!(
        t.get_as::<Color4>("Diffuse").unwrap(),
        Some(Color4::new(0.5, 0.5, 0.5, 1.0))
    );
}

#[test]
fn test_duplicate_names_first_wins() {
    // The first record is the one kept, even though the second is well-formed.
    let t = table(
        vec![
            record("X", "Vector3D", &["1"], 1),
            record("X", "int", &["5"], 2),
        ],
        None,
    );

    assert_eq!(t.len(), 1);
    let err = t.get("X").unwrap_err();
    assert_eq!(err.location(), Some(TokenLocation::Line(1)));

    let t = table(
        vec![record("X", "int", &["1"], 1), record("X", "int", &["2"], 2)],
        None,
    );
    assert_eq!(t.get_as::<i32>("X").unwrap(), Some(1));
}

#[test]
fn test_template_chain_fallback() {
    let c = Arc::new(table(vec![record("Y", "KTime", &["1924423250"], 1)], None));
    let b = Arc::new(table(vec![record("Z", "int", &["2"], 2)], Some(Arc::clone(&c))));
    let a = table(vec![record("W", "int", &["3"], 3)], Some(Arc::clone(&b)));

    assert_eq!(a.template_depth(), 2);
    assert_eq!(a.get_as::<i64>("Y").unwrap(), Some(1924423250));
    assert_eq!(a.get_as::<i32>("Z").unwrap(), Some(2));
    assert_eq!(a.get_as::<i32>("W").unwrap(), Some(3));

    // The value was decoded and cached where it lives, not in `a`.
    assert!(c.is_cached("Y"));
    assert_eq!(c.decode_count(), 1);
    assert!(!a.is_cached("Y"));
    assert!(!b.is_cached("Y"));

    // A second lookup through another table reuses the template's cache.
    let other = table(vec![], Some(Arc::clone(&b)));
    let first = a.get("Y").unwrap().unwrap();
    let second = other.get("Y").unwrap().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(c.decode_count(), 1);
}

#[test]
fn test_local_overrides_template() {
    let template = Arc::new(table(
        vec![
            record("Lcl Scaling", "Lcl Scaling", &["1", "1", "1"], 1),
            record("Visibility", "bool", &["1"], 2),
        ],
        None,
    ));
    let t = table(
        vec![record("Lcl Scaling", "Lcl Scaling", &["2", "3", "4"], 3)],
        Some(Arc::clone(&template)),
    );

    assert_eq!(t.get_as::<Vec3>("Lcl Scaling").unwrap(), Some(Vec3::new(2.0, 3.0, 4.0)));
    assert_eq!(t.get_as::<bool>("Visibility").unwrap(), Some(true));
    assert!(!template.is_cached("Lcl Scaling"));
}

#[test]
fn test_arity_failure_is_an_error() {
    // Six tokens for a seven-token type.
    let t = table(vec![record("Pos", "Vector3D", &["1", "2"], 42)], None);

    match t.get("Pos") {
        Err(Error::InsufficientTokens { declared_type, location }) => {
            assert_eq!(declared_type, "Vector3D");
            assert_eq!(location, TokenLocation::Line(42));
        }
        other => panic!("expected arity error, got {other:?}"),
    }
    assert!(t.unparsed_properties().is_err());
}

#[test]
fn test_decode_errors_are_not_cached() {
    let t = table(vec![record("Pos", "Vector3D", &["1", "2"], 7)], None);

    assert!(matches!(t.get("Pos"), Err(Error::InsufficientTokens { .. })));
    assert!(matches!(t.get("Pos"), Err(Error::InsufficientTokens { .. })));
    assert!(!t.is_cached("Pos"));
    assert_eq!(t.decode_count(), 2);
}

#[test]
fn test_binary_string_value_kept_raw() {
    let e = Element::property(
        TokenLocation::Offset(0),
        [
            Token::binary_string("Link", 4),
            Token::binary_string("KString", 12),
            Token::binary_string("", 24),
            Token::binary_string("", 29),
            Token::binary(
                fbx_properties::dom::binary_type::STRING,
                b"Cube\x00\x01Model".to_vec(),
                34,
            ),
        ],
    );
    let t = table(vec![e], None);
    assert_eq!(
        *t.get("Link").unwrap().unwrap(),
        TypedValue::String("Cube\0\u{1}Model".into())
    );
}

#[test]
fn test_arity_failure_binary_location() {
    let e = Element::property(
        TokenLocation::Offset(2000),
        [
            Token::binary_string("Pos", 2004),
            Token::binary_string("Vector3D", 2012),
            Token::binary_string("Vector", 2025),
            Token::binary_string("", 2036),
            Token::binary_f64(1.0, 2041),
            Token::binary_f64(2.0, 2050),
        ],
    );
    let t = table(vec![e], None);
    let err = t.get("Pos").unwrap_err();
    assert_eq!(err.location(), Some(TokenLocation::Offset(2012)));
}

#[test]
fn test_unparsed_properties() {
    let template = Arc::new(table(vec![record("OnlyInTemplate", "int", &["1"], 1)], None));
    let t = table(
        vec![
            record("A", "int", &["1"], 2),
            record("B", "double", &["2"], 3),
            record("Blob", "Blob", &["?"], 4),
        ],
        Some(template),
    );

    t.get("A").unwrap();
    let snapshot = t.unparsed_properties().unwrap();

    assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["B"]);
    assert_eq!(*snapshot["B"], TypedValue::Float32(2.0));
    // snapshot neither caches nor counts
    assert!(!t.is_cached("B"));
    assert_eq!(t.decode_count(), 1);
}

#[test]
fn test_idempotent_get() {
    let t = table(vec![record("Color", "ColorRGB", &["0.2", "0.4", "0.6"], 1)], None);

    let a = t.get("Color").unwrap().unwrap();
    let b = t.get("Color").unwrap().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a, b);
    assert_eq!(t.decode_count(), 1);
}

#[test]
fn test_unknown_tag_is_not_an_error() {
    let t = table(vec![record("Data", "Blob", &["1"], 1)], None);

    assert_eq!(t.get("Data").unwrap(), None);
    // absence is cached like any other result
    assert!(t.is_cached("Data"));
    t.get("Data").unwrap();
    assert_eq!(t.decode_count(), 1);
    assert!(t.unparsed_properties().unwrap().is_empty());
}

#[test]
fn test_missing_and_valueless_look_the_same() {
    // Documented behavior: `get` does not distinguish a name that exists
    // nowhere from one whose record decodes to no value.
    let t = table(vec![record("Data", "Blob", &["1"], 1)], None);
    assert_eq!(t.get("Data").unwrap(), t.get("Nowhere").unwrap());

    // A local no-value record also hides the template's value.
    let template = Arc::new(table(vec![record("Data", "int", &["1"], 2)], None));
    let t = table(vec![record("Data", "Blob", &["1"], 3)], Some(template));
    assert_eq!(t.get("Data").unwrap(), None);
}

#[test]
fn test_construction_warnings_do_not_abort() {
    let odd = Element::new("C", TokenLocation::Line(1), [Token::quoted("OO", 1)]);
    let short = Element::property(
        TokenLocation::Line(2),
        [Token::quoted("Short", 2), Token::quoted("int", 2)],
    );
    let t = table(vec![odd, short, record("Kept", "int", &["1"], 3)], None);

    assert_eq!(t.len(), 1);
    assert!(t.contains_local("Kept"));
    assert!(!t.contains_local("Short"));
}

#[test]
fn test_shared_between_threads() {
    let template = Arc::new(table(vec![record("Shared", "int", &["7"], 1)], None));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let template = Arc::clone(&template);
            std::thread::spawn(move || {
                let t = PropertyTable::empty(Some(template));
                t.get_as::<i32>("Shared").unwrap()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), Some(7));
    }
    assert!(template.is_cached("Shared"));
}
