//! Document parsing for YAML and JSON API descriptions
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for API documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Which flavour of API description a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFlavor {
    /// OpenAPI 3.x (`openapi: 3.x`, models under `components/schemas`)
    OpenApi3,
    /// Swagger 2.0 (`swagger: "2.0"`, models under `definitions`)
    Swagger2,
}

impl DocumentFlavor {
    /// Pointer prefix under which this flavour stores reusable models
    pub fn models_pointer(&self) -> &'static str {
        match self {
            DocumentFlavor::OpenApi3 => "/components/schemas",
            DocumentFlavor::Swagger2 => "/definitions",
        }
    }
}

/// Parser for API description documents
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new document parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file, detecting format from extension and falling
    /// back to content sniffing for unknown extensions
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        match Format::from_path(path) {
            Ok(format) => self.parse_content(&content, format, path),
            Err(_) => self.parse_with_fallback(&content, path).map(|(value, _)| value),
        }
    }

    /// Parse document content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // Parse as YAML first so YAML-specific errors keep their location
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Try JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }

    /// Check the document root and report which flavour it is
    pub fn detect_flavor(&self, value: &Value, path: &Path) -> LoaderResult<DocumentFlavor> {
        let obj = value.as_object().ok_or_else(|| {
            LoaderError::invalid_document(
                path.to_path_buf(),
                "API document must be an object at the root level",
            )
        })?;

        if let Some(version) = obj.get("openapi") {
            let version = version.as_str().ok_or_else(|| {
                LoaderError::invalid_document(path.to_path_buf(), "'openapi' field must be a string")
            })?;
            if !version.starts_with('3') {
                return Err(LoaderError::invalid_document(
                    path.to_path_buf(),
                    format!("Unsupported OpenAPI version '{}'", version),
                ));
            }
            return Ok(DocumentFlavor::OpenApi3);
        }

        if obj.contains_key("swagger") {
            return Ok(DocumentFlavor::Swagger2);
        }

        // Bare component bundles are accepted as OpenAPI 3
        if obj.contains_key("components") {
            return Ok(DocumentFlavor::OpenApi3);
        }

        Err(LoaderError::invalid_document(
            path.to_path_buf(),
            "Document must contain either an 'openapi' or a 'swagger' field",
        ))
    }
}
