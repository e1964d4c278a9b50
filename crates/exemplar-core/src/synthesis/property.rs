//! Property resolver: one example value per schema node, by kind
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use super::{ExampleGenerator, Sampler, TraversalContext};
use crate::schema::{IntegerFormat, NumberFormat, SchemaKind, SchemaNode};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Number, Value};

/// Length of an array example when `maxItems` is absent
pub const DEFAULT_ARRAY_LENGTH: usize = 2;
/// Upper bound on array example length
pub const MAX_ARRAY_LENGTH: usize = 5;

pub const EXAMPLE_DATE: &str = "2000-01-23";
pub const EXAMPLE_DATE_TIME: &str = "2000-01-23T04:56:07.000+00:00";
pub const EXAMPLE_UUID: &str = "046b6c7f-0b8a-43b9-b35d-6489e6daee91";
pub const EXAMPLE_URI: &str = "https://openapi-generator.tech";
pub const EXAMPLE_URL_STRING: &str = "http://example.com/aeiou";
/// Placeholder for plain objects and unresolvable references
pub const EMPTY_OBJECT_PLACEHOLDER: &str = "{}";
const DEFAULT_MAP_KEY: &str = "key";

impl<'r, S: Sampler> ExampleGenerator<'r, S> {
    /// Produce the example for a single schema node.
    ///
    /// `property_name` is the declared field name and serves as the last
    /// resort for strings. Returns `None` only where no value can exist at
    /// all: an array without an item schema, or a model that yields nothing.
    pub fn resolve_property(
        &mut self,
        property_name: &str,
        media_type: &str,
        schema: Option<&SchemaNode>,
        ctx: &mut TraversalContext,
    ) -> Option<Value> {
        let Some(schema) = schema else {
            log::error!("No schema for property '{}'", property_name);
            return Some(Value::String(String::new()));
        };

        if let Some(example) = &schema.example {
            return Some(author_example(schema, example));
        }
        if let Some(cached) = schema.cached_example() {
            return Some(cached.clone());
        }

        let resolved = self.resolve_kind(property_name, media_type, schema, ctx)?;
        Some(schema.cache_example(resolved).clone())
    }

    fn resolve_kind(
        &mut self,
        property_name: &str,
        media_type: &str,
        schema: &SchemaNode,
        ctx: &mut TraversalContext,
    ) -> Option<Value> {
        let value = match &schema.kind {
            SchemaKind::Boolean => schema.default.clone().unwrap_or(Value::Bool(true)),
            SchemaKind::Array { items } => {
                let items = items.as_deref()?;
                let length = schema
                    .max_items
                    .unwrap_or(DEFAULT_ARRAY_LENGTH)
                    .min(MAX_ARRAY_LENGTH);
                let item = self
                    .resolve_property(property_name, media_type, Some(items), ctx)
                    .unwrap_or(Value::Null);
                Value::Array(vec![item; length])
            }
            SchemaKind::Date => Value::String(EXAMPLE_DATE.to_string()),
            SchemaKind::DateTime => Value::String(EXAMPLE_DATE_TIME.to_string()),
            SchemaKind::Number(format) => {
                let sampled = self.sampler.sample(schema.minimum, schema.maximum);
                number_value(*format, sampled)
            }
            SchemaKind::Binary => Value::String(String::new()),
            SchemaKind::Integer(format) => {
                let sampled = self.sampler.sample(schema.minimum, schema.maximum);
                match format {
                    IntegerFormat::Int64 => Value::from(sampled as i64),
                    IntegerFormat::Int32 => Value::from(sampled as i32),
                }
            }
            SchemaKind::Map { values } => {
                let key = schema.name.as_deref().unwrap_or(DEFAULT_MAP_KEY);
                let value = self
                    .resolve_property(property_name, media_type, Some(values), ctx)
                    .unwrap_or(Value::Null);
                let mut entry = Map::new();
                entry.insert(key.to_string(), value);
                Value::Object(entry)
            }
            SchemaKind::Uuid => Value::String(EXAMPLE_UUID.to_string()),
            SchemaKind::Uri => Value::String(EXAMPLE_URI.to_string()),
            SchemaKind::String => Value::String(string_example(property_name, schema)),
            SchemaKind::Reference(name) => {
                let registry = self.registry;
                return match registry.lookup(name) {
                    Some(model) => self.resolve_model(name, media_type, model, ctx),
                    None => {
                        log::warn!(
                            "Reference '{}' of property '{}' does not resolve to a known model",
                            name,
                            property_name
                        );
                        Some(Value::String(EMPTY_OBJECT_PLACEHOLDER.to_string()))
                    }
                };
            }
            SchemaKind::Object { properties } if properties.is_empty() => {
                Value::String(EMPTY_OBJECT_PLACEHOLDER.to_string())
            }
            // Inline structures cannot refer to themselves, only references can
            SchemaKind::Object { .. } | SchemaKind::Composed { .. } => {
                return self.resolve_structure(property_name, media_type, schema, ctx);
            }
            SchemaKind::Any => Value::String(String::new()),
        };
        Some(value)
    }
}

fn author_example(schema: &SchemaNode, example: &Value) -> Value {
    if let (SchemaKind::Date, Value::String(text)) = (&schema.kind, example) {
        if let Some(date) = parse_date(text) {
            return Value::String(date.format("%Y-%m-%d").to_string());
        }
    }
    example.clone()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn number_value(format: NumberFormat, sampled: f64) -> Value {
    let value = match format {
        // Round-trip through f32 text so the example reads at single precision
        NumberFormat::Float => (sampled as f32).to_string().parse().unwrap_or(sampled),
        NumberFormat::Double | NumberFormat::Unspecified => sampled,
    };
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn string_example(property_name: &str, schema: &SchemaNode) -> String {
    if let Some(default) = &schema.default {
        return stringify(default);
    }
    if let Some(first) = schema.enum_values.first() {
        return stringify(first);
    }
    if matches!(schema.format.as_deref(), Some("uri") | Some("url")) {
        return EXAMPLE_URL_STRING.to_string();
    }
    property_name.to_string()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelRegistry;
    use crate::synthesis::FixedSampler;
    use serde_json::json;

    fn resolve(registry: &ModelRegistry, name: &str, schema: &SchemaNode) -> Option<Value> {
        let mut generator = ExampleGenerator::new(registry).with_sampler(FixedSampler::new(vec![0.25]));
        let mut ctx = TraversalContext::new();
        generator.resolve_property(name, "application/json", Some(schema), &mut ctx)
    }

    #[test]
    fn test_primitive_stand_ins() {
        let registry = ModelRegistry::new();
        assert_eq!(resolve(&registry, "flag", &SchemaNode::boolean()), Some(json!(true)));
        assert_eq!(
            resolve(&registry, "flag", &SchemaNode::boolean().with_default(json!(false))),
            Some(json!(false))
        );
        assert_eq!(resolve(&registry, "born", &SchemaNode::date()), Some(json!("2000-01-23")));
        assert_eq!(
            resolve(&registry, "at", &SchemaNode::date_time()),
            Some(json!("2000-01-23T04:56:07.000+00:00"))
        );
        assert_eq!(resolve(&registry, "id", &SchemaNode::uuid()), Some(json!(EXAMPLE_UUID)));
        assert_eq!(resolve(&registry, "home", &SchemaNode::uri()), Some(json!(EXAMPLE_URI)));
        assert_eq!(resolve(&registry, "blob", &SchemaNode::binary()), Some(json!("")));
        assert_eq!(resolve(&registry, "anything", &SchemaNode::default()), Some(json!("")));
        assert_eq!(resolve(&registry, "meta", &SchemaNode::object(Vec::<(String, SchemaNode)>::new())), Some(json!("{}")));
    }

    #[test]
    fn test_numbers_follow_format() {
        let registry = ModelRegistry::new();
        assert_eq!(resolve(&registry, "n", &SchemaNode::number()), Some(json!(2.5)));
        assert_eq!(resolve(&registry, "n", &SchemaNode::double()), Some(json!(2.5)));
        assert_eq!(resolve(&registry, "n", &SchemaNode::float()), Some(json!(2.5)));
        assert_eq!(resolve(&registry, "n", &SchemaNode::integer()), Some(json!(2)));
        assert_eq!(
            resolve(&registry, "n", &SchemaNode::long().with_minimum(100.0).with_maximum(200.0)),
            Some(json!(125))
        );
    }

    #[test]
    fn test_float_is_rounded_to_single_precision() {
        assert_eq!(number_value(NumberFormat::Float, 0.1f64 + 0.2f64), json!(0.3));
        assert_eq!(number_value(NumberFormat::Double, 1.5), json!(1.5));
        assert_eq!(number_value(NumberFormat::Unspecified, f64::NAN), Value::Null);
    }

    #[test]
    fn test_string_fallback_order() {
        let registry = ModelRegistry::new();
        let full = SchemaNode::string()
            .with_default(json!("fido"))
            .with_enum(vec![json!("available")])
            .with_format("url");
        assert_eq!(resolve(&registry, "petName", &full), Some(json!("fido")));

        let no_default = SchemaNode::string()
            .with_enum(vec![json!("available"), json!("sold")])
            .with_format("url");
        assert_eq!(resolve(&registry, "petName", &no_default), Some(json!("available")));

        let url = SchemaNode::string().with_format("url");
        assert_eq!(resolve(&registry, "petName", &url), Some(json!(EXAMPLE_URL_STRING)));

        assert_eq!(resolve(&registry, "petName", &SchemaNode::string()), Some(json!("petName")));

        let numeric_default = SchemaNode::string().with_default(json!(42));
        assert_eq!(resolve(&registry, "code", &numeric_default), Some(json!("42")));
    }

    #[test]
    fn test_author_example_wins() {
        let registry = ModelRegistry::new();
        let schema = SchemaNode::integer().with_example(json!(7));
        assert_eq!(resolve(&registry, "count", &schema), Some(json!(7)));
    }

    #[test]
    fn test_date_example_is_normalized() {
        let registry = ModelRegistry::new();
        let timestamp = SchemaNode::date().with_example(json!("2021-03-04T23:30:00-02:00"));
        assert_eq!(resolve(&registry, "d", &timestamp), Some(json!("2021-03-05")));

        let plain = SchemaNode::date().with_example(json!("2021-03-04"));
        assert_eq!(resolve(&registry, "d", &plain), Some(json!("2021-03-04")));

        let garbage = SchemaNode::date().with_example(json!("soon"));
        assert_eq!(resolve(&registry, "d", &garbage), Some(json!("soon")));
    }

    #[test]
    fn test_arrays() {
        let registry = ModelRegistry::new();
        let default_length = SchemaNode::array(SchemaNode::string());
        assert_eq!(resolve(&registry, "tags", &default_length), Some(json!(["tags", "tags"])));

        let capped = SchemaNode::array(SchemaNode::integer()).with_max_items(1000);
        let value = resolve(&registry, "ids", &capped).unwrap();
        assert_eq!(value, json!([2, 2, 2, 2, 2]));

        let empty = SchemaNode::array(SchemaNode::boolean()).with_max_items(0);
        assert_eq!(resolve(&registry, "flags", &empty), Some(json!([])));

        let untyped = SchemaNode::new(SchemaKind::Array { items: None });
        assert_eq!(resolve(&registry, "raw", &untyped), None);
    }

    #[test]
    fn test_map_key() {
        let registry = ModelRegistry::new();
        let named = SchemaNode::map(SchemaNode::integer()).with_name("counts");
        assert_eq!(resolve(&registry, "counts", &named), Some(json!({"counts": 2})));

        let anonymous = SchemaNode::map(SchemaNode::boolean());
        assert_eq!(resolve(&registry, "x", &anonymous), Some(json!({"key": true})));
    }

    #[test]
    fn test_references() {
        let mut registry = ModelRegistry::new();
        registry.insert("Tag", SchemaNode::object([("label", SchemaNode::string())]));

        let tag = SchemaNode::reference("#/components/schemas/Tag");
        assert_eq!(resolve(&registry, "tag", &tag), Some(json!({"label": "label"})));

        let dangling = SchemaNode::reference("#/components/schemas/Missing");
        assert_eq!(resolve(&registry, "other", &dangling), Some(json!("{}")));
    }

    #[test]
    fn test_missing_schema_yields_empty_string() {
        let registry = ModelRegistry::new();
        let mut generator = ExampleGenerator::new(&registry);
        let mut ctx = TraversalContext::new();
        assert_eq!(
            generator.resolve_property("ghost", "application/json", None, &mut ctx),
            Some(json!(""))
        );
    }

    #[test]
    fn test_resolution_is_memoized_per_node() {
        let registry = ModelRegistry::new();
        let schema = SchemaNode::double();
        let mut generator = ExampleGenerator::new(&registry).with_sampler(FixedSampler::new(vec![0.1, 0.9]));
        let mut ctx = TraversalContext::new();

        let first = generator.resolve_property("x", "application/json", Some(&schema), &mut ctx);
        let second = generator.resolve_property("x", "application/json", Some(&schema), &mut ctx);
        assert_eq!(first, Some(json!(1.0)));
        assert_eq!(first, second);
        assert_eq!(schema.cached_example(), Some(&json!(1.0)));
    }
}
