//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Scanner -> Parser -> Tree -> Renderer -> Source

use integration_tests::{init_logging, reparse, shape};
use js_syntax::ast::{Expression, Statement};
use js_syntax::{parse, tokenize, FormattingOptions, ParseOptions, SourceType, TokenKind};

const MODULE: &str = r#"
import { EventEmitter } from 'events';
import * as path from "path";

const DEFAULTS = { retries: 3, delay: 100 };

export class Queue extends EventEmitter {
    constructor(options = {}) {
        super();
        this.items = [];
        this.options = Object.assign({}, DEFAULTS, options);
    }

    get size() { return this.items.length; }

    push(...items) {
        for (const item of items) {
            this.items.push(item);
            this.emit('push', item);
        }
        return this;
    }

    *drain() {
        while (this.items.length) yield this.items.shift();
    }
}

export function resolve(base, { dir = '.', ext } = {}) {
    const file = ext ? `${base}.${ext}` : base;
    return path.join(dir, file);
}

export default (a, b) => a.priority - b.priority || a.id - b.id;
"#;

const SCRIPT: &str = r#"
var counter = 0;
function tick(n) {
    'use strict';
    if (typeof n !== 'number') throw new TypeError('n');
    label: for (var i = 0; i < n; i++) {
        switch (i % 3) {
            case 0: continue label;
            case 1: counter += i; break;
            default: counter -= 1;
        }
    }
    try { return /^\d+$/.test(String(counter)); } catch (e) { return false; } finally { counter = 0; }
}
"#;

#[test]
fn test_module_pipeline() {
    init_logging();
    let program = parse(MODULE, ParseOptions::module()).expect("Parse failed");
    assert_eq!(program.source_type, SourceType::Module);

    let types: Vec<&str> = program.body.iter().map(|s| s.type_name()).collect();
    assert_eq!(
        types,
        vec![
            "ImportDeclaration",
            "ImportDeclaration",
            "VariableDeclaration",
            "ExportNamedDeclaration",
            "ExportNamedDeclaration",
            "ExportDefaultDeclaration",
        ]
    );

    for options in [FormattingOptions::pretty_print(), FormattingOptions::compact()] {
        let (text, original, reparsed) =
            reparse(MODULE, ParseOptions::module(), &options).expect("Pipeline failed");
        assert_eq!(shape(&original).unwrap(), shape(&reparsed).unwrap(), "{}", text);
    }
}

#[test]
fn test_script_pipeline() {
    init_logging();
    for options in [FormattingOptions::pretty_print(), FormattingOptions::compact()] {
        let (text, original, reparsed) =
            reparse(SCRIPT, ParseOptions::script(), &options).expect("Pipeline failed");
        assert_eq!(shape(&original).unwrap(), shape(&reparsed).unwrap(), "{}", text);
    }
}

#[test]
fn test_directive_enables_strict_mode_in_function_only() {
    let program = parse(SCRIPT, ParseOptions::script()).unwrap();
    let Statement::FunctionDeclaration(function) = &program.body[1] else {
        panic!("expected function declaration");
    };
    let Statement::ExpressionStatement(first) = &function.body.body[0] else {
        panic!("expected directive");
    };
    assert_eq!(first.directive.as_deref(), Some("use strict"));

    // `with` is still fine at the top level of the script
    assert!(parse(&format!("{}\nwith (a) {{}}", SCRIPT), ParseOptions::script()).is_ok());
}

#[test]
fn test_tokens_match_rendered_compact_text() {
    let program = parse(SCRIPT, ParseOptions::script()).unwrap();
    let compact = js_syntax::render(&program, &FormattingOptions::compact());

    let original = tokenize(SCRIPT, ParseOptions::script()).unwrap();
    let rendered = tokenize(&compact, ParseOptions::script()).unwrap();
    let values = |tokens: &[js_syntax::Token]| -> Vec<String> {
        tokens.iter().map(|token| token.value().to_string()).collect()
    };
    // Rendering adds optional semicolons but never drops a token
    let original_values = values(&original);
    let rendered_values = values(&rendered);
    assert!(rendered_values.len() >= original_values.len());
    let mut remaining = rendered_values.iter();
    for value in &original_values {
        assert!(
            remaining.any(|candidate| candidate == value),
            "token {} missing from {}",
            value,
            compact
        );
    }
}

#[test]
fn test_regexp_tokens_survive_the_pipeline() {
    let tokens = tokenize(SCRIPT, ParseOptions::script()).unwrap();
    let regexps: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind() == TokenKind::RegularExpression)
        .map(|token| token.value())
        .collect();
    assert_eq!(regexps, vec![r"/^\d+$/"]);
}

#[test]
fn test_default_export_arrow() {
    let program = parse(MODULE, ParseOptions::module()).unwrap();
    let Some(Statement::ExportDefaultDeclaration(export)) = program.body.last() else {
        panic!("expected default export");
    };
    let js_syntax::ast::ExportDefault::Expression(Expression::ArrowFunctionExpression(arrow)) =
        &export.declaration
    else {
        panic!("expected arrow function");
    };
    assert_eq!(arrow.params.len(), 2);
}
