//! Error surface across scanner and parser
//!
//! Every failure reaches the caller as a `core_types::SyntaxError` carrying
//! the stage that produced it and a position in the source.

use core_types::{ErrorKind, Position, SyntaxError};
use js_syntax::{parse, ParseOptions};

fn script_error(source: &str) -> SyntaxError {
    match parse(source, ParseOptions::script()) {
        Ok(program) => panic!("{:?} parsed as {:?}", source, program),
        Err(err) => err,
    }
}

fn module_error(source: &str) -> SyntaxError {
    match parse(source, ParseOptions::module()) {
        Ok(program) => panic!("{:?} parsed as {:?}", source, program),
        Err(err) => err,
    }
}

#[test]
fn test_scan_errors() {
    let cases = [
        ("'abc", "Unterminated string"),
        ("`abc${", "Unterminated template"),
        ("/* abc", "Unterminated comment"),
        ("x = /abc", "Unterminated regular expression"),
        ("'\\x1'", "Invalid hexadecimal escape sequence"),
        ("'\\u12'", "Invalid Unicode escape sequence"),
        ("'\\u{110000}'", "Undefined Unicode code-point"),
        ("0x", "Missing digits after radix prefix"),
        ("1e", "Missing exponent"),
        ("3in x", "Invalid or unexpected token after numeric literal"),
        ("a = (b", "Unclosed ("),
        ("a = [b", "Unclosed ["),
        ("function f() {", "Unclosed {"),
    ];
    for (source, message) in cases {
        let err = script_error(source);
        assert_eq!(err.kind, ErrorKind::ScanError, "{}", source);
        assert_eq!(err.message, message, "{}", source);
    }
}

#[test]
fn test_parse_errors() {
    let cases = [
        ("a +", "Unexpected end of input"),
        ("if (a) let x = 1;", "Unexpected identifier"),
        ("switch (a) { default: default: }", "Multiple default clause in switch statement"),
        ("({ get a(b) {} })", "Getter must not have any formal parameters"),
        ("({ set a() {} })", "Setter must have exactly one formal parameter"),
        ("[a, ...b, c] = d", "Rest element must be last element"),
        ("1 = a", "Invalid assignment target"),
        ("'use strict'; eval = 1", "Unexpected eval or arguments in strict mode"),
    ];
    for (source, message) in cases {
        let err = script_error(source);
        assert_eq!(err.kind, ErrorKind::ParseError, "{}", source);
        if message == "Unexpected identifier" {
            assert!(err.message.starts_with("Unexpected"), "{}: {}", source, err.message);
        } else {
            assert_eq!(err.message, message, "{}", source);
        }
    }
}

#[test]
fn test_strict_mode_errors() {
    assert_eq!(script_error("'use strict'; with (a) {}").kind, ErrorKind::ParseError);
    assert_eq!(module_error("with (a) {}").kind, ErrorKind::ParseError);
    assert_eq!(module_error("var let = 1;").kind, ErrorKind::ParseError);
    assert!(parse("var let_ = 1; var yield_ = 2;", ParseOptions::module()).is_ok());
}

#[test]
fn test_module_only_syntax() {
    let err = script_error("import a from 'a';");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.position, Position::new(1, 0, 0));
}

#[test]
fn test_error_positions_count_code_points() {
    let err = script_error("var s = '日本語';\nvar = 1;");
    assert_eq!(err.position.line, 2);
    assert_eq!(err.position.column, 4);
    assert_eq!(err.position.index, 19);
}

#[test]
fn test_errors_display_their_stage() {
    let scan = script_error("'abc");
    assert!(scan.to_string().starts_with("ScanError: Unterminated string"));

    let parse_err = script_error("a b");
    assert_eq!(parse_err.to_string(), "ParseError: Unexpected b (line 1, column 2)");
}

#[test]
fn test_depth_limit_is_configurable() {
    let nested = format!("{}a{}", "(".repeat(20), ")".repeat(20));
    assert!(parse(&nested, ParseOptions::script()).is_ok());

    let err = parse(&nested, ParseOptions::script().with_max_depth(8)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.message, "Maximum nesting depth exceeded");
}
