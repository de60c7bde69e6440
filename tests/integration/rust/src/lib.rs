//! Integration test suite for the JavaScript syntax tools
//!
//! This crate provides helpers shared by the cross-component suites: source
//! goes through the scanner and parser from `js_syntax`, errors come back as
//! `core_types` values, and trees are compared structurally through their
//! JSON form.

use js_syntax::{parse, render, FormattingOptions, ParseOptions, Program};
use serde_json::Value;

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use js_syntax;
}

/// Install a test-writer subscriber so scanner and parser events show up in
/// failing test output. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Remove every `loc` entry from a serialized tree
pub fn strip_locations(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("loc");
            for child in map.values_mut() {
                strip_locations(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_locations),
        _ => {}
    }
}

/// Tree shape without source locations
pub fn shape(program: &Program) -> Result<Value, String> {
    let mut json = program
        .to_json()
        .map_err(|e| format!("Serialization error: {}", e))?;
    strip_locations(&mut json);
    Ok(json)
}

/// Parse, render and parse again, returning the rendered text and both trees
pub fn reparse(
    source: &str,
    parse_options: ParseOptions,
    options: &FormattingOptions,
) -> Result<(String, Program, Program), String> {
    let program = parse(source, parse_options).map_err(|e| format!("Parse error: {}", e))?;
    let text = render(&program, options);
    let reparsed =
        parse(&text, parse_options).map_err(|e| format!("Reparse error: {} in {:?}", e, text))?;
    Ok((text, program, reparsed))
}

/// Whether rendering with `options` preserves the tree shape of `source`
pub fn round_trips(
    source: &str,
    parse_options: ParseOptions,
    options: &FormattingOptions,
) -> Result<bool, String> {
    let (_, program, reparsed) = reparse(source, parse_options, options)?;
    Ok(shape(&program)? == shape(&reparsed)?)
}
