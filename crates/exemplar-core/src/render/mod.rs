//! Media rendering of synthesized examples
//!
//! Every entry point returns an ordered list of [`ExampleRecord`]s, one per
//! requested media type. When nothing could be produced the list holds the
//! single [`ExampleRecord::none`] sentinel, which callers treat as "omit the
//! example" rather than as an error.
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

pub mod xml;

use crate::schema::{SchemaKind, SchemaNode};
use crate::synthesis::{ExampleGenerator, Sampler, TraversalContext};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MIME_TYPE_JSON: &str = "application/json";
pub const MIME_TYPE_XML: &str = "application/xml";

/// How a media type is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFamily {
    Json,
    Xml,
    Other,
}

impl MediaFamily {
    pub fn classify(media_type: &str) -> Self {
        if media_type.starts_with(MIME_TYPE_JSON) || media_type.contains("*/*") {
            MediaFamily::Json
        } else if media_type.starts_with(MIME_TYPE_XML) {
            MediaFamily::Xml
        } else {
            MediaFamily::Other
        }
    }
}

/// Format the example text was generated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedContentType {
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "XML")]
    Xml,
}

impl GeneratedContentType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            GeneratedContentType::Json => MIME_TYPE_JSON,
            GeneratedContentType::Xml => MIME_TYPE_XML,
        }
    }
}

/// One rendered example for one media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedExample {
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content_type: Option<GeneratedContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
}

impl RenderedExample {
    fn json(content_type: &str, value: &Value) -> Self {
        Self {
            content_type: content_type.to_string(),
            example: Some(pretty(value)),
            generated_content_type: Some(GeneratedContentType::Json),
            status_code: None,
        }
    }

    fn xml(content_type: &str, text: String) -> Self {
        Self {
            content_type: content_type.to_string(),
            example: Some(text),
            generated_content_type: Some(GeneratedContentType::Xml),
            status_code: None,
        }
    }

    /// Author example rendered verbatim, whatever its content type
    fn authored(content_type: &str, value: &Value) -> Self {
        Self {
            content_type: content_type.to_string(),
            example: Some(pretty(value)),
            generated_content_type: None,
            status_code: None,
        }
    }

    fn unsupported(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            example: Some(format!(
                "Custom MIME type example not yet supported: {}",
                content_type
            )),
            generated_content_type: None,
            status_code: None,
        }
    }
}

/// Marker value of the sentinel record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoExampleMarker {
    None,
}

/// Output record of every rendering entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleRecord {
    Rendered(RenderedExample),
    /// Serializes as `{"output": "none"}`
    NoExample { output: NoExampleMarker },
}

impl ExampleRecord {
    /// The "no example available" sentinel
    pub fn none() -> Self {
        ExampleRecord::NoExample {
            output: NoExampleMarker::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ExampleRecord::NoExample { .. })
    }

    pub fn as_rendered(&self) -> Option<&RenderedExample> {
        match self {
            ExampleRecord::Rendered(rendered) => Some(rendered),
            ExampleRecord::NoExample { .. } => None,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.as_rendered().map(|r| r.content_type.as_str())
    }

    pub fn example(&self) -> Option<&str> {
        self.as_rendered().and_then(|r| r.example.as_deref())
    }

    pub fn status_code(&self) -> Option<&str> {
        self.as_rendered().and_then(|r| r.status_code.as_deref())
    }

    fn set_status_code(&mut self, status_code: &str) {
        if let ExampleRecord::Rendered(rendered) = self {
            rendered.status_code = Some(status_code.to_string());
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn finish(records: Vec<ExampleRecord>) -> Vec<ExampleRecord> {
    if records.is_empty() {
        vec![ExampleRecord::none()]
    } else {
        records
    }
}

fn authored_records(examples: &Map<String, Value>) -> Vec<ExampleRecord> {
    let records = examples
        .iter()
        .map(|(content_type, value)| ExampleRecord::Rendered(RenderedExample::authored(content_type, value)))
        .collect();
    finish(records)
}

impl<'r, S: Sampler> ExampleGenerator<'r, S> {
    /// Examples for an operation response.
    ///
    /// Returns `None` when the schema carries no hint worth rendering: no
    /// example, no reference and not an array. Every rendered record is
    /// tagged with `status_code`.
    pub fn generate_from_response_schema(
        &mut self,
        status_code: &str,
        schema: &SchemaNode,
        produces: &[String],
    ) -> Option<Vec<ExampleRecord>> {
        let mut records = self.generate_for_response(schema, produces)?;
        for record in &mut records {
            record.set_status_code(status_code);
        }
        Some(records)
    }

    fn generate_for_response(&mut self, schema: &SchemaNode, produces: &[String]) -> Option<Vec<ExampleRecord>> {
        if schema.example.is_none() && schema.reference_name().is_none() && !schema.is_array() {
            log::debug!("Response schema has no example, reference or array shape");
            return None;
        }

        let examples = match &schema.example {
            Some(Value::Object(examples)) => Some(examples),
            Some(value) => return Some(self.generate_for_value(value, Some(produces))),
            None => None,
        };

        if let SchemaKind::Array { items } = &schema.kind {
            if items.is_none() {
                log::warn!("Array response schema without items is not supported");
                return None;
            }
            return Some(self.generate_for_schema(examples, Some(produces), schema));
        }

        match schema.reference_name() {
            Some(model_name) => Some(self.generate_for_model(examples, Some(produces), model_name)),
            None => Some(self.generate_for_schema(examples, Some(produces), schema)),
        }
    }

    /// Examples for the registry model `model_name`
    pub fn generate_for_model(
        &mut self,
        examples: Option<&Map<String, Value>>,
        media_types: Option<&[String]>,
        model_name: &str,
    ) -> Vec<ExampleRecord> {
        if let Some(examples) = examples {
            return authored_records(examples);
        }

        let registry = self.registry;
        let model = registry.lookup(model_name);
        if model.is_none() {
            log::warn!("Model '{}' is not in the registry", model_name);
        }

        let mut ctx = TraversalContext::new();
        let mut records = Vec::new();
        for media_type in self.media_types_or_default(media_types) {
            let rendered = match MediaFamily::classify(&media_type) {
                MediaFamily::Json => model
                    .and_then(|schema| self.resolve_model(model_name, &media_type, schema, &mut ctx))
                    .map(|value| RenderedExample::json(&media_type, &value)),
                MediaFamily::Xml => self
                    .xml_encoder
                    .encode(model, registry)
                    .map(|text| RenderedExample::xml(&media_type, text)),
                MediaFamily::Other => Some(RenderedExample::unsupported(&media_type)),
            };
            records.extend(rendered.map(ExampleRecord::Rendered));
        }
        finish(records)
    }

    /// Examples for an inline schema
    pub fn generate_for_schema(
        &mut self,
        examples: Option<&Map<String, Value>>,
        media_types: Option<&[String]>,
        schema: &SchemaNode,
    ) -> Vec<ExampleRecord> {
        if let Some(examples) = examples {
            return authored_records(examples);
        }

        let property_name = schema.name.clone().unwrap_or_default();
        let mut ctx = TraversalContext::new();
        let mut records = Vec::new();
        for media_type in self.media_types_or_default(media_types) {
            let rendered = match MediaFamily::classify(&media_type) {
                MediaFamily::Json => self
                    .resolve_property(&property_name, &media_type, Some(schema), &mut ctx)
                    .map(|value| RenderedExample::json(&media_type, &value)),
                MediaFamily::Xml => self
                    .xml_encoder
                    .encode(Some(schema), self.registry)
                    .map(|text| RenderedExample::xml(&media_type, text)),
                MediaFamily::Other => Some(RenderedExample::unsupported(&media_type)),
            };
            records.extend(rendered.map(ExampleRecord::Rendered));
        }
        finish(records)
    }

    /// Examples for an author-supplied value that is not keyed by content
    /// type
    pub fn generate_for_value(&mut self, value: &Value, media_types: Option<&[String]>) -> Vec<ExampleRecord> {
        let mut records = Vec::new();
        for media_type in self.media_types_or_default(media_types) {
            match MediaFamily::classify(&media_type) {
                MediaFamily::Json => {
                    records.push(ExampleRecord::Rendered(RenderedExample::json(&media_type, value)));
                }
                MediaFamily::Xml => {
                    log::warn!("XML rendering of a raw example value is not supported: {}", value);
                }
                MediaFamily::Other => {
                    records.push(ExampleRecord::Rendered(RenderedExample::unsupported(&media_type)));
                }
            }
        }
        finish(records)
    }

    fn media_types_or_default(&self, media_types: Option<&[String]>) -> Vec<String> {
        match media_types {
            Some(media_types) => media_types.to_vec(),
            None => self.config.default_media_types.clone(),
        }
    }
}
