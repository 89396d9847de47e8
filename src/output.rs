//! JSON rendering of parsed SimpleQL documents.
//!
//! The JSON form is what downstream evaluation engines consume, so it mirrors
//! the tree field for field:
//!
//! ```text
//! a: B(k: $c[$$d.e]) | P("x > 1")
//! ```
//!
//! renders as
//!
//! ```text
//! [{"name":"a","type":{"name":"B","param":[{"key":"k","value":["$c","$$d.e"]}],
//!   "processors":[{"name":"P","params":["\"x > 1\""]}]}}]
//! ```
//!
//! - `field` and `type` never appear together
//! - `param`, `processors` and `props` appear only when written in the source
//! - indexed references become two-element arrays `[base, index]`
//!
//! Object keys are sorted, so output is deterministic.

use crate::ast::{AstTree, Param, ParamValue, ProcessorCall, Source, TypeSpec};
use serde_json::{Map, Value};

/// Converts root-level statements into a JSON array.
pub fn to_value(nodes: &[AstTree]) -> Value {
    Value::Array(nodes.iter().map(tree_to_json).collect())
}

/// Compact JSON, no extra whitespace.
///
/// ```
/// let tree = simpleql::parse("a: b").unwrap();
/// assert_eq!(simpleql::to_json(&tree), r#"[{"field":"b","name":"a"}]"#);
/// ```
pub fn to_json(nodes: &[AstTree]) -> String {
    to_value(nodes).to_string()
}

/// JSON with 2-space indentation.
pub fn to_json_pretty(nodes: &[AstTree]) -> String {
    format!("{:#}", to_value(nodes))
}

fn tree_to_json(node: &AstTree) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), Value::String(node.name.clone()));

    match &node.source {
        Some(Source::Field(field)) => {
            obj.insert("field".into(), Value::String(field.clone()));
        }
        Some(Source::Type(spec)) => {
            obj.insert("type".into(), type_to_json(spec));
        }
        None => {}
    }

    if let Some(props) = &node.props {
        obj.insert("props".into(), to_value(props));
    }
    Value::Object(obj)
}

fn type_to_json(spec: &TypeSpec) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), Value::String(spec.name.clone()));

    if let Some(params) = &spec.params {
        obj.insert(
            "param".into(),
            Value::Array(params.iter().map(param_to_json).collect()),
        );
    }
    if let Some(processors) = &spec.processors {
        obj.insert(
            "processors".into(),
            Value::Array(processors.iter().map(processor_to_json).collect()),
        );
    }
    Value::Object(obj)
}

fn param_to_json(param: &Param) -> Value {
    let mut obj = Map::new();
    obj.insert("key".into(), Value::String(param.key.clone()));
    if let Some(value) = &param.value {
        obj.insert("value".into(), value_to_json(value));
    }
    Value::Object(obj)
}

fn processor_to_json(processor: &ProcessorCall) -> Value {
    let mut obj = Map::new();
    obj.insert("name".into(), Value::String(processor.name.clone()));
    obj.insert(
        "params".into(),
        Value::Array(processor.params.iter().map(value_to_json).collect()),
    );
    Value::Object(obj)
}

fn value_to_json(value: &ParamValue) -> Value {
    match value {
        ParamValue::Scalar(s) => Value::String(s.clone()),
        ParamValue::Indexed { base, index } => Value::Array(vec![
            Value::String(base.clone()),
            Value::String(index.clone()),
        ]),
    }
}

#[test]
fn test_field_and_type_are_exclusive() {
    let nodes = vec![
        AstTree::new("a").with_field("b"),
        AstTree::new("c").with_type(TypeSpec::new("D")),
        AstTree::new("e"),
    ];
    assert_eq!(
        to_value(&nodes),
        serde_json::json!([
            {"name": "a", "field": "b"},
            {"name": "c", "type": {"name": "D"}},
            {"name": "e"}
        ])
    );
}

#[test]
fn test_indexed_value_is_a_pair() {
    let spec = TypeSpec::new("B")
        .with_params(vec![
            Param::with_value("k", ParamValue::indexed("$c", "$$d.e")),
            Param::key("flag"),
        ])
        .with_processors(vec![ProcessorCall::new("P", vec![])]);
    let nodes = vec![AstTree::new("a").with_type(spec)];
    assert_eq!(
        to_value(&nodes),
        serde_json::json!([{
            "name": "a",
            "type": {
                "name": "B",
                "param": [{"key": "k", "value": ["$c", "$$d.e"]}, {"key": "flag"}],
                "processors": [{"name": "P", "params": []}]
            }
        }])
    );
}

#[test]
fn test_pretty_output_is_indented() {
    let nodes = vec![AstTree::new("a").with_props(vec![])];
    assert_eq!(to_json_pretty(&nodes), "[\n  {\n    \"name\": \"a\",\n    \"props\": []\n  }\n]");
}
