//! Conversion of JSON schema objects into [`SchemaNode`]s
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use crate::schema::{
    Composition, IntegerFormat, NumberFormat, Properties, SchemaKind, SchemaNode, XmlHints,
};
use serde_json::{Map, Value};

/// Convert one schema object. Anything that is not an object converts to an
/// untyped node.
pub fn convert_schema(value: &Value) -> SchemaNode {
    let Some(obj) = value.as_object() else {
        return SchemaNode::default();
    };

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return SchemaNode::reference(reference);
    }

    let mut node = SchemaNode::new(convert_kind(obj));
    node.format = obj.get("format").and_then(Value::as_str).map(str::to_string);
    node.example = obj
        .get("example")
        .cloned()
        .or_else(|| obj.get("examples").and_then(Value::as_array).and_then(|e| e.first().cloned()));
    node.default = obj.get("default").cloned();
    node.minimum = obj.get("minimum").and_then(Value::as_f64);
    node.maximum = obj.get("maximum").and_then(Value::as_f64);
    node.max_items = obj
        .get("maxItems")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());
    node.enum_values = obj
        .get("enum")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    node.xml = obj.get("xml").and_then(Value::as_object).map(convert_xml);
    node
}

fn convert_kind(obj: &Map<String, Value>) -> SchemaKind {
    for (keyword, composition) in [
        ("allOf", Composition::AllOf),
        ("anyOf", Composition::AnyOf),
        ("oneOf", Composition::OneOf),
    ] {
        if let Some(members) = obj.get(keyword).and_then(Value::as_array) {
            return SchemaKind::Composed {
                composition,
                members: members.iter().map(convert_schema).collect(),
                properties: convert_properties(obj),
            };
        }
    }

    let format = obj.get("format").and_then(Value::as_str);
    match declared_type(obj).or_else(|| inferred_type(obj)) {
        Some("boolean") => SchemaKind::Boolean,
        Some("integer") => match format {
            Some("int64") => SchemaKind::Integer(IntegerFormat::Int64),
            _ => SchemaKind::Integer(IntegerFormat::Int32),
        },
        Some("number") => SchemaKind::Number(match format {
            Some("float") => NumberFormat::Float,
            Some("double") => NumberFormat::Double,
            _ => NumberFormat::Unspecified,
        }),
        Some("string") => match format {
            Some("date") => SchemaKind::Date,
            Some("date-time") => SchemaKind::DateTime,
            Some("uuid") => SchemaKind::Uuid,
            Some("uri") => SchemaKind::Uri,
            Some("binary") | Some("byte") => SchemaKind::Binary,
            _ => SchemaKind::String,
        },
        Some("file") => SchemaKind::Binary,
        Some("array") => SchemaKind::Array {
            items: obj.get("items").map(|items| Box::new(convert_schema(items))),
        },
        Some("object") => convert_object(obj),
        _ => SchemaKind::Any,
    }
}

/// `type` as a string, or the first non-null entry of a type array
fn declared_type(obj: &Map<String, Value>) -> Option<&str> {
    match obj.get("type")? {
        Value::String(name) => Some(name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .find(|name| *name != "null"),
        _ => None,
    }
}

fn inferred_type(obj: &Map<String, Value>) -> Option<&'static str> {
    if obj.contains_key("properties") || obj.contains_key("additionalProperties") {
        return Some("object");
    }
    if obj.contains_key("items") {
        return Some("array");
    }
    match obj.get("enum").and_then(Value::as_array)?.first()? {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some("integer"),
        Value::Number(_) => Some("number"),
        _ => None,
    }
}

fn convert_object(obj: &Map<String, Value>) -> SchemaKind {
    let properties = convert_properties(obj);
    if !properties.is_empty() {
        return SchemaKind::Object { properties };
    }
    match obj.get("additionalProperties") {
        Some(Value::Bool(true)) => SchemaKind::Map {
            values: Box::new(SchemaNode::default()),
        },
        Some(values @ Value::Object(_)) => SchemaKind::Map {
            values: Box::new(convert_schema(values)),
        },
        _ => SchemaKind::Object { properties },
    }
}

fn convert_properties(obj: &Map<String, Value>) -> Properties {
    let Some(properties) = obj.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    properties
        .iter()
        .map(|(key, schema)| (key.clone(), convert_schema(schema).with_name(key.clone())))
        .collect()
}

fn convert_xml(obj: &Map<String, Value>) -> XmlHints {
    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
    let flag = |key: &str| obj.get(key).and_then(Value::as_bool).unwrap_or(false);
    XmlHints {
        name: text("name"),
        namespace: text("namespace"),
        prefix: text("prefix"),
        attribute: flag("attribute"),
        wrapped: flag("wrapped"),
    }
}
