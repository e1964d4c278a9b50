//! API document loading
//!
//! This module turns OpenAPI 3.x and Swagger 2.0 documents into the schema
//! graph the synthesizer consumes:
//! - YAML and JSON parsing, by extension with a content-sniffing fallback
//! - Conversion of JSON schema objects into [`SchemaNode`](crate::schema::SchemaNode)s
//! - A [`ModelRegistry`](crate::schema::ModelRegistry) of reusable models
//! - One [`ResponseExample`] per operation response
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use exemplar_core::loader::DocumentLoader;
//! use std::path::Path;
//!
//! let document = DocumentLoader::new().load(Path::new("petstore.yaml"))?;
//! for name in document.registry.names() {
//!     println!("{}", name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

pub mod convert;
pub mod document;
pub mod error;
pub mod parser;

pub use convert::convert_schema;
pub use document::{
    load_document, ApiDocument, DocumentLoader, LoaderConfig, ResponseExample, OPERATION_METHODS,
};
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentFlavor, DocumentParser, Format};
