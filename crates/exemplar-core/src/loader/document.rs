//! API document loader
//!
//! Builds a [`ModelRegistry`] from the reusable models of an OpenAPI 3 or
//! Swagger 2 document and lists the schema of every operation response.
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use crate::loader::convert::convert_schema;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::{DocumentFlavor, DocumentParser, Format};
use crate::render::MIME_TYPE_JSON;
use crate::schema::{ModelRegistry, SchemaNode};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// HTTP methods of a path item, in the order responses are listed
pub const OPERATION_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Whether to collect operation responses
    pub include_responses: bool,
    /// Media types assumed for Swagger 2 operations without `produces`
    pub default_produces: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            include_responses: true,
            default_produces: vec![MIME_TYPE_JSON.to_string()],
        }
    }
}

/// One operation response and the schema its examples are built from
#[derive(Debug, Clone)]
pub struct ResponseExample {
    pub path: String,
    pub method: String,
    pub status_code: String,
    /// Declared media types in document order
    pub media_types: Vec<String>,
    /// Response schema. Media-level examples are attached as an example
    /// keyed by content type.
    pub schema: Option<SchemaNode>,
}

/// A loaded API document
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub path: PathBuf,
    pub flavor: DocumentFlavor,
    pub registry: ModelRegistry,
    pub responses: Vec<ResponseExample>,
}

impl ApiDocument {
    /// Look up a model, failing with [`LoaderError::UnknownModel`]
    pub fn model(&self, name: &str) -> LoaderResult<&SchemaNode> {
        self.registry
            .get(name)
            .ok_or_else(|| LoaderError::unknown_model(name, self.path.clone()))
    }
}

/// Loads API documents from disk or memory
#[derive(Debug, Default)]
pub struct DocumentLoader {
    config: LoaderConfig,
    parser: DocumentParser,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: DocumentParser::new(),
        }
    }

    /// Load and convert the document at `path`
    pub fn load(&self, path: &Path) -> LoaderResult<ApiDocument> {
        let value = self.parser.parse_file(path)?;
        self.load_value(value, path)
    }

    /// Load a document held in memory. `path` is only used for error context.
    pub fn load_str(&self, content: &str, format: Format, path: &Path) -> LoaderResult<ApiDocument> {
        let value = self.parser.parse_content(content, format, path)?;
        self.load_value(value, path)
    }

    pub fn load_value(&self, value: Value, path: &Path) -> LoaderResult<ApiDocument> {
        let flavor = self.parser.detect_flavor(&value, path)?;
        let registry = build_registry(&value, flavor, path)?;
        let responses = if self.config.include_responses {
            self.collect_responses(&value, flavor, path)?
        } else {
            Vec::new()
        };
        log::debug!(
            "Loaded {} models and {} responses from {}",
            registry.len(),
            responses.len(),
            path.display()
        );

        Ok(ApiDocument {
            path: path.to_path_buf(),
            flavor,
            registry,
            responses,
        })
    }

    fn collect_responses(&self, root: &Value, flavor: DocumentFlavor, path: &Path) -> LoaderResult<Vec<ResponseExample>> {
        let Some(paths) = root.get("paths") else {
            return Ok(Vec::new());
        };
        let paths = paths
            .as_object()
            .ok_or_else(|| LoaderError::invalid_document(path.to_path_buf(), "'paths' must be an object"))?;

        let root_produces = string_list(root.get("produces"));
        let mut out = Vec::new();
        for (route, item) in paths {
            for method in OPERATION_METHODS {
                let Some(operation) = item.get(method) else {
                    continue;
                };
                let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
                    continue;
                };
                for (status_code, response) in responses {
                    let response = dereference(root, response);
                    let (media_types, schema) = match flavor {
                        DocumentFlavor::OpenApi3 => openapi3_response(response),
                        DocumentFlavor::Swagger2 => {
                            let produces = string_list(operation.get("produces"))
                                .or_else(|| root_produces.clone())
                                .unwrap_or_else(|| self.config.default_produces.clone());
                            swagger2_response(response, produces)
                        }
                    };
                    out.push(ResponseExample {
                        path: route.clone(),
                        method: method.to_string(),
                        status_code: status_code.clone(),
                        media_types,
                        schema,
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Convenience wrapper around [`DocumentLoader::load`]
pub fn load_document(path: &Path) -> LoaderResult<ApiDocument> {
    DocumentLoader::new().load(path)
}

fn build_registry(root: &Value, flavor: DocumentFlavor, path: &Path) -> LoaderResult<ModelRegistry> {
    let Some(models) = root.pointer(flavor.models_pointer()) else {
        log::debug!("{} declares no reusable models", path.display());
        return Ok(ModelRegistry::new());
    };
    let models = models.as_object().ok_or_else(|| {
        LoaderError::invalid_document(
            path.to_path_buf(),
            format!("'{}' must be an object", flavor.models_pointer()),
        )
    })?;

    Ok(models
        .iter()
        .map(|(name, schema)| (name.clone(), convert_schema(schema)))
        .collect())
}

/// Follow a local `$ref` such as `#/components/responses/NotFound`
fn dereference<'a>(root: &'a Value, value: &'a Value) -> &'a Value {
    match value.get("$ref").and_then(Value::as_str) {
        Some(reference) => match reference.strip_prefix('#').and_then(|pointer| root.pointer(pointer)) {
            Some(target) => target,
            None => {
                log::warn!("Unresolvable response reference '{}'", reference);
                value
            }
        },
        None => value,
    }
}

fn openapi3_response(response: &Value) -> (Vec<String>, Option<SchemaNode>) {
    let Some(content) = response.get("content").and_then(Value::as_object) else {
        return (Vec::new(), None);
    };

    let media_types: Vec<String> = content.keys().cloned().collect();
    let schema = content
        .values()
        .find_map(|media| media.get("schema"))
        .map(convert_schema);

    let mut examples = Map::new();
    for (media_type, media) in content {
        let example = media.get("example").cloned().or_else(|| {
            media
                .get("examples")
                .and_then(Value::as_object)
                .and_then(|named| named.values().find_map(|e| e.get("value").cloned()))
        });
        if let Some(example) = example {
            examples.insert(media_type.clone(), example);
        }
    }

    (media_types, attach_examples(schema, examples))
}

fn swagger2_response(response: &Value, produces: Vec<String>) -> (Vec<String>, Option<SchemaNode>) {
    let schema = response.get("schema").map(convert_schema);
    let examples = response
        .get("examples")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    (produces, attach_examples(schema, examples))
}

fn attach_examples(schema: Option<SchemaNode>, examples: Map<String, Value>) -> Option<SchemaNode> {
    if examples.is_empty() {
        return schema;
    }
    let schema = schema.unwrap_or_default();
    if schema.example.is_some() {
        return Some(schema);
    }
    Some(schema.with_example(Value::Object(examples)))
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let list = value?.as_array()?;
    Some(list.iter().filter_map(Value::as_str).map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;
    use serde_json::json;

    fn load(value: Value) -> ApiDocument {
        DocumentLoader::new()
            .load_value(value, Path::new("petstore.yaml"))
            .unwrap()
    }

    #[test]
    fn test_openapi3_models_and_responses() {
        let document = load(json!({
            "openapi": "3.0.3",
            "paths": {
                "/pets/{id}": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {"schema": {"$ref": "#/components/schemas/Pet"}},
                                    "application/xml": {"schema": {"$ref": "#/components/schemas/Pet"}}
                                }
                            },
                            "404": {"$ref": "#/components/responses/NotFound"}
                        }
                    },
                    "delete": {"responses": {"204": {"description": "gone"}}}
                }
            },
            "components": {
                "schemas": {
                    "Pet": {"type": "object", "properties": {"name": {"type": "string"}}},
                    "Error": {"type": "object", "properties": {"message": {"type": "string"}}}
                },
                "responses": {
                    "NotFound": {
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}}
                    }
                }
            }
        }));

        assert_eq!(document.flavor, DocumentFlavor::OpenApi3);
        assert_eq!(document.registry.names().collect::<Vec<_>>(), ["Error", "Pet"]);
        assert_eq!(document.responses.len(), 3);

        let ok = &document.responses[0];
        assert_eq!((ok.method.as_str(), ok.status_code.as_str()), ("get", "200"));
        assert_eq!(ok.media_types, ["application/json", "application/xml"]);
        assert_eq!(ok.schema.as_ref().and_then(|s| s.reference_name()), Some("Pet"));

        let not_found = &document.responses[1];
        assert_eq!(not_found.schema.as_ref().and_then(|s| s.reference_name()), Some("Error"));

        let deleted = &document.responses[2];
        assert_eq!(deleted.method, "delete");
        assert!(deleted.schema.is_none());
    }

    #[test]
    fn test_swagger2_produces_and_examples() {
        let document = load(json!({
            "swagger": "2.0",
            "produces": ["application/xml"],
            "paths": {
                "/orders": {
                    "post": {
                        "produces": ["application/json"],
                        "responses": {
                            "200": {
                                "schema": {"type": "array", "items": {"$ref": "#/definitions/Order"}},
                                "examples": {"application/json": [{"id": 1}]}
                            }
                        }
                    },
                    "get": {
                        "responses": {"200": {"schema": {"$ref": "#/definitions/Order"}}}
                    }
                }
            },
            "definitions": {
                "Order": {"type": "object", "properties": {"id": {"type": "integer", "format": "int64"}}}
            }
        }));

        assert_eq!(document.flavor, DocumentFlavor::Swagger2);
        assert!(document.model("Order").is_ok());
        assert!(matches!(document.model("Missing"), Err(LoaderError::UnknownModel { .. })));

        let get = &document.responses[0];
        assert_eq!(get.method, "get");
        assert_eq!(get.media_types, ["application/xml"]);

        let post = &document.responses[1];
        assert_eq!(post.media_types, ["application/json"]);
        let schema = post.schema.as_ref().unwrap();
        assert!(matches!(schema.kind, SchemaKind::Array { .. }));
        assert_eq!(schema.example, Some(json!({"application/json": [{"id": 1}]})));
    }

    #[test]
    fn test_openapi3_media_examples() {
        let document = load(json!({
            "openapi": "3.1.0",
            "paths": {
                "/ping": {
                    "get": {
                        "responses": {
                            "200": {
                                "content": {
                                    "text/plain": {"schema": {"type": "string"}, "example": "pong"},
                                    "application/json": {
                                        "examples": {"first": {"value": {"reply": "pong"}}}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let schema = document.responses[0].schema.as_ref().unwrap();
        assert_eq!(
            schema.example,
            Some(json!({"text/plain": "pong", "application/json": {"reply": "pong"}}))
        );
        assert!(document.registry.is_empty());
    }

    #[test]
    fn test_skip_responses() {
        let loader = DocumentLoader::with_config(LoaderConfig {
            include_responses: false,
            ..LoaderConfig::default()
        });
        let document = loader
            .load_value(
                json!({"openapi": "3.0.0", "paths": {"/x": {"get": {"responses": {"200": {}}}}}}),
                Path::new("api.json"),
            )
            .unwrap();
        assert!(document.responses.is_empty());
    }

    #[test]
    fn test_invalid_documents() {
        let loader = DocumentLoader::new();
        let path = Path::new("broken.yaml");
        assert!(loader.load_value(json!({"info": {}}), path).is_err());
        assert!(loader
            .load_value(json!({"openapi": "3.0.0", "components": {"schemas": []}}), path)
            .is_err());
        assert!(loader.load_value(json!({"openapi": "3.0.0", "paths": []}), path).is_err());
    }
}
