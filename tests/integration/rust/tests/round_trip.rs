//! Round-trip and idempotence suites
//!
//! Rendering a tree and parsing the text again yields the same tree shape for
//! the pretty and compact styles, and every style is a fixed point after one
//! pass.

use integration_tests::{reparse, round_trips, shape};
use js_syntax::{parse, render, FormattingOptions, ParseOptions};
use proptest::prelude::*;

fn styles() -> Vec<FormattingOptions> {
    vec![
        FormattingOptions::pretty_print(),
        FormattingOptions::compact(),
        FormattingOptions {
            indent_unit: "  ".to_string(),
            space_inside_parens: true,
            ..FormattingOptions::default()
        },
    ]
}

// =============================================================================
// Fixed inputs
// =============================================================================

#[test]
fn test_asi_sources_round_trip() {
    let sources = [
        "a = b\n(c)",
        "a\n++b",
        "x = y\n[1, 2].forEach(f)",
        "return_ = 1\nthrow_ = 2",
        "var a = 1\nvar b = 2",
        "do x(); while (y) z()",
        "if (a) b\nelse c",
    ];
    for source in sources {
        for options in styles() {
            assert_eq!(round_trips(source, ParseOptions::script(), &options), Ok(true), "{}", source);
        }
    }
}

#[test]
fn test_nested_functions_round_trip() {
    let source = "function a() { return function b() { return () => { return class { m() { return { n() { return [function* () {}]; } }; } }; }; }; }";
    for options in styles() {
        assert_eq!(round_trips(source, ParseOptions::script(), &options), Ok(true));
    }
}

#[test]
fn test_render_is_a_fixed_point() {
    let source = "if (a) b(); else if (c) { d() } else e()\nfor (var i in o) if (i) continue;\nwhile (x) y: z();";
    let mut styles = styles();
    styles.push(FormattingOptions::expanded());
    for options in styles {
        let (first, _, reparsed) = reparse(source, ParseOptions::script(), &options).unwrap();
        assert_eq!(render(&reparsed, &options), first);
    }
}

#[test]
fn test_expanded_only_adds_blocks() {
    let source = "if (a) b(); else c(); while (d) e();";
    let options = FormattingOptions::expanded();
    let (text, original, reparsed) = reparse(source, ParseOptions::script(), &options).unwrap();
    assert_ne!(shape(&original).unwrap(), shape(&reparsed).unwrap());

    // Unwrapping the blocks again brings the trees back together
    let wrapped = parse(
        "if (a) { b(); } else { c(); } while (d) { e(); }",
        ParseOptions::script(),
    )
    .unwrap();
    assert_eq!(shape(&wrapped).unwrap(), shape(&reparsed).unwrap(), "{}", text);
}

// =============================================================================
// Generated inputs
// =============================================================================

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        prop::sample::select(vec!["a", "b", "c", "obj.key", "arr[0]", "this", "null", "true"])
            .prop_map(String::from),
        (0u32..100).prop_map(|n| n.to_string()),
        Just("'text'".to_string()),
        Just("`t${a}`".to_string()),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "<", "===", "&&", "||"]), inner.clone())
                .prop_map(|(left, operator, right)| format!("{} {} {}", left, operator, right)),
            (prop::sample::select(vec!["-", "!", "typeof", "void"]), inner.clone())
                .prop_map(|(operator, argument)| format!("{} {}", operator, argument)),
            inner.clone().prop_map(|argument| format!("f({})", argument)),
            inner.clone().prop_map(|element| format!("[{}, , {}]", element, element)),
            inner.clone().prop_map(|value| format!("({{ k: {}, [a]: 1 }})", value)),
            inner.clone().prop_map(|body| format!("(x => {})", body)),
            inner.prop_map(|expression| format!("({})", expression)),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        expression().prop_map(|expression| format!("x = {};", expression)),
        expression().prop_map(|expression| format!("var v = {};", expression)),
        Just(";".to_string()),
        Just("debugger;".to_string()),
    ];
    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            (expression(), inner.clone())
                .prop_map(|(test, body)| format!("if ({}) {}", test, body)),
            (expression(), inner.clone(), inner.clone())
                .prop_map(|(test, consequent, alternate)| format!(
                    "if ({}) {} else {}",
                    test, consequent, alternate
                )),
            (expression(), inner.clone())
                .prop_map(|(test, body)| format!("while ({}) {}", test, body)),
            (inner.clone(), expression())
                .prop_map(|(body, test)| format!("do {} while ({});", body, test)),
            inner.clone().prop_map(|body| format!("for (var i = 0; i < 3; i++) {}", body)),
            inner.clone().prop_map(|body| format!("for (var k in obj) {}", body)),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|statements| format!("{{ {} }}", statements.join(" "))),
            inner.clone().prop_map(|body| format!("try {{ {} }} catch (e) {{}}", body)),
            inner.prop_map(|body| format!("{{ function g(p, q = 1) {{ {} return p; }} }}", body)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_statements_round_trip(source in statement()) {
        for options in [FormattingOptions::pretty_print(), FormattingOptions::compact()] {
            let (text, original, reparsed) = reparse(&source, ParseOptions::script(), &options)
                .map_err(TestCaseError::fail)?;
            prop_assert_eq!(shape(&original).unwrap(), shape(&reparsed).unwrap(), "{}", text);
        }
    }

    #[test]
    fn generated_statements_are_idempotent(source in statement()) {
        let options = FormattingOptions::expanded();
        let (first, _, reparsed) = reparse(&source, ParseOptions::script(), &options)
            .map_err(TestCaseError::fail)?;
        prop_assert_eq!(render(&reparsed, &options), first);
    }
}
