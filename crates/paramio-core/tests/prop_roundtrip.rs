//! Property-based round-trip tests.
//!
//! Random PARAM documents and DOC values are generated and pushed through
//! `to_text` / `from_text`, verifying structural equality and emission
//! idempotence. This catches edge cases hand-written tests miss: hash keys
//! that collide with generated names, strings that mimic other scalar
//! shapes, deeply mixed nesting.
//!
//! NaN is excluded (it never compares equal); everything else finite is fair
//! game, including negative zero and subnormals.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

use paramio_core::{
    Color4f, Curve, DocValue, FixedStr32, Name, ParamDoc, ParamList, ParamObject, Parameter,
    Quatf, Vector2f, Vector3f, Vector4f,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite floats only", |f| f.is_finite())
}

/// Strings that stress the quoting rules: plain words, scalar lookalikes,
/// whitespace and escape characters.
fn arb_string() -> impl Strategy<Value = String> {
    let lookalikes = prop_oneof![
        Just("true".to_string()),
        Just("null".to_string()),
        Just("42".to_string()),
        Just("-3.5".to_string()),
        Just("0x10".to_string()),
        Just(".inf".to_string()),
    ];
    prop_oneof![
        "[a-zA-Z][a-zA-Z0-9_ ]{0,14}",
        Just(String::new()),
        lookalikes,
        Just("with \"quotes\" and \\slashes".to_string()),
        Just("tab\tand\nnewline".to_string()),
        Just("caf\u{e9} \u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_name() -> impl Strategy<Value = Name> {
    prop_oneof![
        any::<u32>().prop_map(Name),
        "[A-Z][a-zA-Z0-9]{0,11}".prop_map(|s| Name::from_str(&s)),
    ]
}

fn arb_curve() -> impl Strategy<Value = Curve> {
    (any::<u32>(), any::<u32>(), vec(arb_f32(), 30)).prop_map(|(a, b, floats)| {
        let mut curve = Curve {
            a,
            b,
            ..Default::default()
        };
        curve.floats.copy_from_slice(&floats);
        curve
    })
}

fn arb_parameter() -> impl Strategy<Value = Parameter> {
    let scalars = prop_oneof![
        any::<bool>().prop_map(Parameter::from),
        any::<i32>().prop_map(Parameter::from),
        any::<u32>().prop_map(Parameter::from),
        arb_f32().prop_map(Parameter::from),
        arb_string().prop_map(Parameter::String),
        "[a-z]{0,20}".prop_map(|s| Parameter::from(FixedStr32::new(s).unwrap())),
    ];
    let aggregates = prop_oneof![
        (arb_f32(), arb_f32()).prop_map(|(x, y)| Parameter::from(Vector2f { x, y })),
        (arb_f32(), arb_f32(), arb_f32())
            .prop_map(|(x, y, z)| Parameter::from(Vector3f { x, y, z })),
        (arb_f32(), arb_f32(), arb_f32(), arb_f32())
            .prop_map(|(x, y, z, t)| Parameter::from(Vector4f { x, y, z, t })),
        (arb_f32(), arb_f32(), arb_f32(), arb_f32())
            .prop_map(|(r, g, b, a)| Parameter::from(Color4f { r, g, b, a })),
        (arb_f32(), arb_f32(), arb_f32(), arb_f32())
            .prop_map(|(a, b, c, d)| Parameter::from(Quatf { a, b, c, d })),
        arb_curve().prop_map(|c| Parameter::from([c])),
        (arb_curve(), arb_curve()).prop_map(|(a, b)| Parameter::from([a, b])),
    ];
    let buffers = prop_oneof![
        vec(any::<i32>(), 0..6).prop_map(Parameter::from),
        vec(arb_f32(), 0..6).prop_map(Parameter::from),
        vec(any::<u32>(), 0..6).prop_map(Parameter::from),
        vec(any::<u8>(), 0..6).prop_map(Parameter::from),
    ];
    prop_oneof![scalars, aggregates, buffers]
}

fn arb_object() -> impl Strategy<Value = ParamObject> {
    vec((arb_name(), arb_parameter()), 0..5).prop_map(|params| ParamObject {
        params: params.into_iter().collect(),
    })
}

fn arb_list(depth: u32) -> BoxedStrategy<ParamList> {
    let objects = vec((arb_name(), arb_object()), 0..4);
    if depth == 0 {
        objects
            .prop_map(|objects| ParamList {
                objects: objects.into_iter().collect(),
                lists: Default::default(),
            })
            .boxed()
    } else {
        (objects, vec((arb_name(), arb_list(depth - 1)), 0..3))
            .prop_map(|(objects, lists)| ParamList {
                objects: objects.into_iter().collect(),
                lists: lists.into_iter().collect(),
            })
            .boxed()
    }
}

fn arb_doc() -> impl Strategy<Value = ParamDoc> {
    (any::<u32>(), "[a-z]{1,8}", arb_list(2)).prop_map(|(version, doc_type, param_root)| {
        ParamDoc {
            version,
            doc_type,
            param_root,
        }
    })
}

fn arb_doc_value() -> impl Strategy<Value = DocValue> {
    let leaf = prop_oneof![
        Just(DocValue::Null),
        any::<bool>().prop_map(DocValue::Bool),
        any::<i32>().prop_map(DocValue::Int),
        any::<u32>().prop_map(DocValue::UInt),
        any::<i64>().prop_map(DocValue::Int64),
        any::<u64>().prop_map(DocValue::UInt64),
        arb_f32().prop_map(DocValue::Float),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(DocValue::Double),
        arb_string().prop_map(DocValue::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..5).prop_map(DocValue::Array),
            btree_map("[a-z0-9 :]{0,8}", inner, 0..5).prop_map(DocValue::Hash),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn param_documents_roundtrip(doc in arb_doc()) {
        let text = doc.to_text();
        let back = ParamDoc::from_text(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\ntext:\n{text}"));
        prop_assert_eq!(&back, &doc, "roundtrip changed the document; text:\n{}", text);
        prop_assert_eq!(back.to_text(), text, "emission is not idempotent");
    }

    #[test]
    fn doc_values_roundtrip(value in arb_doc_value()) {
        let text = value.to_text();
        let back = DocValue::from_text(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\ntext:\n{text}"));
        prop_assert_eq!(&back, &value, "roundtrip changed the value; text:\n{}", text);
        prop_assert_eq!(back.to_text(), text, "emission is not idempotent");
    }
}
